use std::fmt;
use std::ops::RangeInclusive;

pub const NUM_POINTS: u8 = 24;

/// Where a checker can be: on the bar, borne off, or on a point (0-23).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Bar,
    Off,
    Point(u8),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Bar => write!(f, "B"),
            Position::Off => write!(f, "O"),
            Position::Point(index) => write!(f, "{}", index),
        }
    }
}

/// Direction a side travels across the 0-23 indices.
///
/// The home-right side of a board moves `Descending`: it bears off past
/// index 0 and re-enters from the bar into 18-23. The other side moves
/// `Ascending`, bears off past index 23 and re-enters into 0-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Descending,
    Ascending,
}

impl Orientation {
    /// Destination after moving `distance` pips from `start`, or `None` if
    /// it would leave the board.
    pub fn target_index(&self, start: u8, distance: u8) -> Option<u8> {
        if start >= NUM_POINTS {
            return None;
        }
        match self {
            Orientation::Descending => start.checked_sub(distance),
            Orientation::Ascending => {
                let target = start as u16 + distance as u16;
                (target < NUM_POINTS as u16).then_some(target as u8)
            }
        }
    }

    pub fn home_range(&self) -> RangeInclusive<u8> {
        match self {
            Orientation::Descending => 0..=5,
            Orientation::Ascending => 18..=23,
        }
    }

    pub fn is_home(&self, index: u8) -> bool {
        self.home_range().contains(&index)
    }

    /// Point a bar checker enters on with a die of `die`.
    pub fn entry_point(&self, die: u8) -> Option<u8> {
        if !(1..=6).contains(&die) {
            return None;
        }
        match self {
            Orientation::Descending => Some(NUM_POINTS - die),
            Orientation::Ascending => Some(die - 1),
        }
    }

    /// Die value that enters a bar checker on `index`, if it is an entry point.
    pub fn entry_distance(&self, index: u8) -> Option<u8> {
        match self {
            Orientation::Descending if (18..NUM_POINTS).contains(&index) => {
                Some(NUM_POINTS - index)
            }
            Orientation::Ascending if index < 6 => Some(index + 1),
            _ => None,
        }
    }

    /// Pips a checker on `index` needs to leave the board.
    pub fn bear_off_distance(&self, index: u8) -> u8 {
        match self {
            Orientation::Descending => index + 1,
            Orientation::Ascending => NUM_POINTS - index,
        }
    }

    /// Home point that is exactly `distance` pips from the exit.
    pub fn point_at_bear_off_distance(&self, distance: u8) -> Option<u8> {
        if !(1..=6).contains(&distance) {
            return None;
        }
        match self {
            Orientation::Descending => Some(distance - 1),
            Orientation::Ascending => Some(NUM_POINTS - distance),
        }
    }

    /// Pip distance between two points along this direction, if `to` lies ahead of `from`.
    pub fn distance(&self, from: u8, to: u8) -> Option<u8> {
        match self {
            Orientation::Descending => from.checked_sub(to).filter(|&d| d > 0),
            Orientation::Ascending => to.checked_sub(from).filter(|&d| d > 0),
        }
    }
}
