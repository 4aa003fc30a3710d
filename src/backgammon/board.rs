use std::fmt;

use log::warn;

use crate::backgammon::{GameOutcome, Orientation, Player, Point, NUM_POINTS};

pub const CHECKERS_PER_PLAYER: u8 = 15;

/// Opening layout of the home-right side as (point, checkers).
const HOME_RIGHT_LAYOUT: [(u8, u8); 4] = [(23, 2), (12, 5), (7, 3), (5, 5)];

/// Opening layout of the other side.
const HOME_LEFT_LAYOUT: [(u8, u8); 4] = [(0, 2), (11, 5), (16, 3), (18, 5)];

/// What a placement did to the destination point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Placed,
    /// A lone opposing checker was sent to the bar first.
    Hit,
    /// Preconditions did not hold; nothing changed.
    Ignored,
}

/// The 24 points plus bar and borne-off counters for both players.
///
/// Indices are relative to this board's home-right player, who moves from 23
/// toward 0. Mutations do not check legality: callers validate moves first.
/// Broken preconditions degrade to a logged no-op so that a desynced peer
/// cannot crash the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    points: [Point; NUM_POINTS as usize],
    bar: [u8; 2],
    off: [u8; 2],
    home_right: Player,
}

impl Board {
    /// Creates a board with the standard opening position.
    pub fn new(home_right: Player) -> Self {
        let mut board = Board::empty(home_right);
        for (index, count) in HOME_RIGHT_LAYOUT {
            board.points[index as usize].set_count(home_right, count);
        }
        for (index, count) in HOME_LEFT_LAYOUT {
            board.points[index as usize].set_count(home_right.opposite(), count);
        }
        board
    }

    /// Creates a board with no checkers anywhere.
    pub fn empty(home_right: Player) -> Self {
        Board {
            points: [Point::default(); NUM_POINTS as usize],
            bar: [0; 2],
            off: [0; 2],
            home_right,
        }
    }

    pub fn home_right(&self) -> Player {
        self.home_right
    }

    pub fn orientation(&self, player: Player) -> Orientation {
        if player == self.home_right {
            Orientation::Descending
        } else {
            Orientation::Ascending
        }
    }

    pub fn point(&self, index: u8) -> Option<&Point> {
        self.points.get(index as usize)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Checkers of `player` on `index`; zero for an invalid index.
    pub fn count(&self, index: u8, player: Player) -> u8 {
        self.point(index).map_or(0, |p| p.count(player))
    }

    pub fn can_accept(&self, index: u8, player: Player) -> bool {
        self.point(index).is_some_and(|p| p.can_accept(player))
    }

    pub fn bar(&self, player: Player) -> u8 {
        self.bar[player.index()]
    }

    pub fn off(&self, player: Player) -> u8 {
        self.off[player.index()]
    }

    pub fn set_point(&mut self, index: u8, white: u8, black: u8) {
        if let Some(point) = self.points.get_mut(index as usize) {
            *point = Point::new(white, black);
        }
    }

    pub fn set_bar(&mut self, player: Player, value: u8) {
        self.bar[player.index()] = value;
    }

    pub fn set_off(&mut self, player: Player, value: u8) {
        self.off[player.index()] = value;
    }

    /// Moves one checker of `player` from `from` to `to`, hitting a blot there.
    pub fn move_piece(&mut self, player: Player, from: u8, to: u8) -> Landing {
        if from >= NUM_POINTS || to >= NUM_POINTS || self.count(from, player) == 0 {
            warn!("Ignoring move of {} from {} to {}: no checker to move", player, from, to);
            return Landing::Ignored;
        }
        self.points[from as usize].remove_checker(player);
        self.land(player, to)
    }

    /// Brings one checker of `player` from the bar onto `to`, hitting a blot there.
    pub fn reenter(&mut self, player: Player, to: u8) -> Landing {
        if to >= NUM_POINTS || self.bar(player) == 0 {
            warn!("Ignoring re-entry of {} on {}: bar is empty", player, to);
            return Landing::Ignored;
        }
        self.bar[player.index()] -= 1;
        self.land(player, to)
    }

    /// Removes one checker of `player` from `from` and counts it as borne off.
    pub fn bear_off(&mut self, player: Player, from: u8) -> bool {
        if self.count(from, player) == 0 {
            warn!("Ignoring bear-off of {} from {}: no checker there", player, from);
            return false;
        }
        self.points[from as usize].remove_checker(player);
        self.off[player.index()] = self.off[player.index()].saturating_add(1);
        true
    }

    fn land(&mut self, player: Player, to: u8) -> Landing {
        let opponent = player.opposite();
        let point = &mut self.points[to as usize];
        let landing = if point.is_blot_of(opponent) {
            point.remove_checker(opponent);
            self.bar[opponent.index()] = self.bar[opponent.index()].saturating_add(1);
            Landing::Hit
        } else {
            Landing::Placed
        };
        self.points[to as usize].add_checker(player);
        landing
    }

    // Counts are summed in u16: a desynced snapshot may carry any u8 per field.
    pub fn home_zone_occupancy(&self, player: Player) -> u16 {
        self.orientation(player)
            .home_range()
            .map(|i| u16::from(self.count(i, player)))
            .sum()
    }

    pub fn outside_home_count(&self, player: Player) -> u16 {
        let orientation = self.orientation(player);
        (0..NUM_POINTS)
            .filter(|&i| !orientation.is_home(i))
            .map(|i| u16::from(self.count(i, player)))
            .sum()
    }

    pub fn checkers_on_points(&self, player: Player) -> u16 {
        self.points.iter().map(|p| u16::from(p.count(player))).sum()
    }

    /// Checkers on points, on the bar and borne off. Fifteen in a consistent game.
    pub fn checker_total(&self, player: Player) -> u16 {
        self.checkers_on_points(player) + u16::from(self.bar(player)) + u16::from(self.off(player))
    }

    /// Both players account for all fifteen checkers and no point is shared.
    pub fn is_consistent(&self) -> bool {
        Player::ALL
            .iter()
            .all(|&p| self.checker_total(p) == u16::from(CHECKERS_PER_PLAYER))
            && self.points.iter().all(|p| p.is_empty() || p.owner().is_some())
    }

    pub fn outcome(&self) -> GameOutcome {
        Player::ALL
            .into_iter()
            .find(|&p| self.off(p) >= CHECKERS_PER_PLAYER)
            .map_or(GameOutcome::Ongoing, GameOutcome::Win)
    }
}

impl fmt::Display for Board {
    /// Points 12-23 on top, 11-0 below. White counts are positive, black negative.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signed = |i: u8| {
            let point = &self.points[i as usize];
            i16::from(point.count(Player::White)) - i16::from(point.count(Player::Black))
        };
        for i in 12..18 {
            write!(f, "{:3} ", signed(i))?;
        }
        write!(f, "| W{:<2}|", self.bar(Player::White))?;
        for i in 18..24 {
            write!(f, " {:3}", signed(i))?;
        }
        writeln!(f, "   off W{}", self.off(Player::White))?;
        writeln!(f, "{}", "=".repeat(56))?;
        for i in (6..12).rev() {
            write!(f, "{:3} ", signed(i))?;
        }
        write!(f, "| B{:<2}|", self.bar(Player::Black))?;
        for i in (0..6).rev() {
            write!(f, " {:3}", signed(i))?;
        }
        write!(f, "   off B{}", self.off(Player::Black))
    }
}
