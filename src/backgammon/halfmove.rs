use std::fmt::{self, Debug};

use crate::backgammon::Position;

/// One checker movement: a move between points, a re-entry from the bar or
/// a bear-off. `distance` is the number of pips the dice paid for it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HalfMove {
    from: Position,
    to: Position,
    distance: u8,
}

impl HalfMove {
    pub fn new(from: Position, to: Position, distance: u8) -> Self {
        HalfMove { from, to, distance }
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    pub fn distance(&self) -> u8 {
        self.distance
    }
}

impl fmt::Display for HalfMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

impl Debug for HalfMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -> {:?} ({})", self.from, self.to, self.distance)
    }
}
