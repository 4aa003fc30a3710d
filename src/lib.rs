pub mod backgammon;
pub mod config;
pub mod engine;
pub mod game;
pub mod misc;
pub mod protocol;
pub mod relay;
pub mod selfplay;

pub use backgammon::{Board, DiceSet, GameOutcome, GameSnapshot, HalfMove, Player, Role};
pub use config::GameConfig;
pub use game::{ActionError, GameEvent, Phase, TurnController};
