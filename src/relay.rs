//! Two-seat relay between networked peers.
//!
//! The relay owns whose turn it is and the last known board. Each peer's
//! board puts its own side on the right, so states crossing between the two
//! seats are mirrored. The stored state is kept in White's frame.

use log::{debug, info, warn};
use thiserror::Error;

use crate::backgammon::{Frame, GameSnapshot, Player};
use crate::protocol::PeerMessage;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("both seats are taken")]
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub to: Player,
    pub message: PeerMessage,
}

#[derive(Debug, Clone)]
pub struct Relay {
    seated: usize,
    to_move: Player,
    snapshot: Option<GameSnapshot>,
}

impl Default for Relay {
    fn default() -> Self {
        Relay::new()
    }
}

impl Relay {
    pub fn new() -> Self {
        Relay {
            seated: 0,
            to_move: Player::White,
            snapshot: None,
        }
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn seats_taken(&self) -> usize {
        self.seated
    }

    /// Last state received, in White's frame.
    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    fn is_seated(&self, player: Player) -> bool {
        player.index() < self.seated
    }

    /// Seats the next peer: White first, then Black. Once both are seated
    /// each is told whether it moves.
    pub fn join(&mut self) -> Result<(Player, Vec<Outbound>), RelayError> {
        let Some(&color) = Player::ALL.get(self.seated) else {
            warn!("Join rejected: relay is full");
            return Err(RelayError::Full);
        };
        self.seated += 1;
        info!("Peer joined as {}", color);

        let mut outbound = vec![Outbound {
            to: color,
            message: PeerMessage::Welcome { color },
        }];
        if let Some(snapshot) = &self.snapshot {
            let relative = snapshot.to_relative(Frame::between(Player::White, color));
            outbound.push(Outbound {
                to: color,
                message: PeerMessage::GameState(relative),
            });
        }
        if self.seated == Player::ALL.len() {
            outbound.extend(self.turn_notices());
        }
        Ok((color, outbound))
    }

    pub fn handle(&mut self, from: Player, message: PeerMessage) -> Vec<Outbound> {
        if !self.is_seated(from) {
            warn!("Ignoring message from unseated {}", from);
            return Vec::new();
        }
        match message {
            PeerMessage::GameState(snapshot) if from == self.to_move => {
                let stored = snapshot.to_relative(Frame::between(from, Player::White));
                let other = from.opposite();
                let mut outbound = Vec::new();
                if self.is_seated(other) {
                    let relative = stored.to_relative(Frame::between(Player::White, other));
                    outbound.push(Outbound {
                        to: other,
                        message: PeerMessage::GameState(relative),
                    });
                }
                debug!("Stored game state from {}", from);
                self.snapshot = Some(stored);
                outbound
            }
            PeerMessage::TurnEnd if from == self.to_move => {
                self.to_move = self.to_move.opposite();
                info!("Turn passes to {}", self.to_move);
                self.turn_notices()
            }
            PeerMessage::GameState(_) | PeerMessage::TurnEnd => {
                let kind = message_kind(&message);
                warn!("Ignoring {} from {}: {} is to move", kind, from, self.to_move);
                Vec::new()
            }
            other => {
                warn!("Ignoring unexpected {} from {}", message_kind(&other), from);
                Vec::new()
            }
        }
    }

    fn turn_notices(&self) -> Vec<Outbound> {
        Player::ALL
            .iter()
            .filter(|&&p| self.is_seated(p))
            .map(|&p| Outbound {
                to: p,
                message: PeerMessage::Turn(p == self.to_move),
            })
            .collect()
    }
}

fn message_kind(message: &PeerMessage) -> &'static str {
    match message {
        PeerMessage::Welcome { .. } => "welcome",
        PeerMessage::GameState(_) => "game_state",
        PeerMessage::Turn(_) => "turn",
        PeerMessage::TurnEnd => "turn_end",
    }
}
