//! Messages exchanged between a peer and the relay, and the glue between
//! them and a [`TurnController`]. Transport and framing are the caller's.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backgammon::{GameSnapshot, Player};
use crate::game::{GameEvent, TurnController};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PeerMessage {
    /// Relay to peer on joining: the side the peer plays.
    Welcome { color: Player },
    /// Full board state, in the receiving board's frame when sent by the relay.
    GameState(GameSnapshot),
    /// Relay to peer: whether the peer is to move.
    Turn(bool),
    /// Peer to relay: the peer finished its turn.
    TurnEnd,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed peer message: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn encode(message: &PeerMessage) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(message)?)
}

pub fn decode(text: &str) -> Result<PeerMessage, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

impl GameEvent {
    /// The message a networked peer sends for this event, if any.
    pub fn to_peer_message(&self) -> Option<PeerMessage> {
        match self {
            GameEvent::StateChanged(snapshot) => Some(PeerMessage::GameState(snapshot.clone())),
            GameEvent::TurnEnded { .. } => Some(PeerMessage::TurnEnd),
            _ => None,
        }
    }
}

impl TurnController {
    /// Drains the outbox into the messages to send to the relay.
    pub fn outgoing_messages(&mut self) -> Vec<PeerMessage> {
        self.take_events()
            .iter()
            .filter_map(GameEvent::to_peer_message)
            .collect()
    }

    pub fn handle_peer_message(&mut self, message: PeerMessage) {
        match message {
            PeerMessage::Welcome { color } => {
                if color != self.config().home_right {
                    let local = self.config().home_right;
                    warn!("Relay seated us as {} but this board plays {}", color, local);
                } else {
                    info!("Connected as {}", color);
                }
            }
            PeerMessage::GameState(snapshot) => {
                debug!("Received game state");
                self.apply_remote_snapshot(&snapshot);
            }
            PeerMessage::Turn(your_turn) => self.receive_turn_signal(your_turn),
            PeerMessage::TurnEnd => warn!("Unexpected turn_end from relay"),
        }
    }
}
