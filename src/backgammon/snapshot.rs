//! Serializable game state exchanged between two engine instances.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::backgammon::{Board, Player, NUM_POINTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRecord {
    pub index: u8,
    pub white: u8,
    pub black: u8,
}

/// Per-point counts plus bar and borne-off counters.
///
/// Indices are relative to the home-right side of the board that produced
/// the snapshot. Crossing to a peer whose home-right side is the other
/// player requires [`GameSnapshot::to_relative`] with [`Frame::Mirrored`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub points: Vec<PointRecord>,
    pub bar_white: u8,
    pub bar_black: u8,
    pub off_white: u8,
    pub off_black: u8,
}

/// How the indices of two boards relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Same,
    Mirrored,
}

impl Frame {
    pub fn between(source_home_right: Player, target_home_right: Player) -> Frame {
        if source_home_right == target_home_right {
            Frame::Same
        } else {
            Frame::Mirrored
        }
    }
}

impl GameSnapshot {
    /// Re-indexes the points for a board in `frame` relative to this one.
    pub fn to_relative(&self, frame: Frame) -> GameSnapshot {
        match frame {
            Frame::Same => self.clone(),
            Frame::Mirrored => {
                let mut points: Vec<PointRecord> = self
                    .points
                    .iter()
                    .filter(|p| p.index < NUM_POINTS)
                    .map(|p| PointRecord { index: NUM_POINTS - 1 - p.index, ..*p })
                    .collect();
                points.sort_by_key(|p| p.index);
                GameSnapshot { points, ..*self }
            }
        }
    }

    pub fn bar(&self, player: Player) -> u8 {
        match player {
            Player::White => self.bar_white,
            Player::Black => self.bar_black,
        }
    }

    pub fn off(&self, player: Player) -> u8 {
        match player {
            Player::White => self.off_white,
            Player::Black => self.off_black,
        }
    }
}

impl Board {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            points: self
                .points()
                .iter()
                .enumerate()
                .map(|(i, p)| PointRecord {
                    index: i as u8,
                    white: p.count(Player::White),
                    black: p.count(Player::Black),
                })
                .collect(),
            bar_white: self.bar(Player::White),
            bar_black: self.bar(Player::Black),
            off_white: self.off(Player::White),
            off_black: self.off(Player::Black),
        }
    }

    pub fn from_snapshot(snapshot: &GameSnapshot, home_right: Player) -> Board {
        let mut board = Board::empty(home_right);
        board.apply_snapshot(snapshot);
        board
    }

    /// Overwrites points and counters with `snapshot`. The remote side is
    /// authoritative, so an inconsistent snapshot is still applied.
    pub fn apply_snapshot(&mut self, snapshot: &GameSnapshot) {
        let home_right = self.home_right();
        *self = Board::empty(home_right);
        for record in &snapshot.points {
            if record.index >= NUM_POINTS {
                warn!("Snapshot point index {} out of range", record.index);
                continue;
            }
            self.set_point(record.index, record.white, record.black);
        }
        for player in Player::ALL {
            self.set_bar(player, snapshot.bar(player));
            self.set_off(player, snapshot.off(player));
        }
        if !self.is_consistent() {
            warn!(
                "Applied inconsistent snapshot: white {} checkers, black {} checkers",
                self.checker_total(Player::White),
                self.checker_total(Player::Black)
            );
        }
    }
}
