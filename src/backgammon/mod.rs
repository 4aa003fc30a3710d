mod board;
pub use board::{Board, Landing, CHECKERS_PER_PLAYER};

mod player;
pub use player::{Player, Role};

mod point;
pub use point::Point;

mod position;
pub use position::{Orientation, Position, NUM_POINTS};

mod outcome;
pub use outcome::GameOutcome;

mod halfmove;
pub use halfmove::HalfMove;

mod dice;
pub use dice::{DicePhase, DiceSet, DiceValues};

mod legality;

mod snapshot;
pub use snapshot::{Frame, GameSnapshot, PointRecord};
