use crate::backgammon::Player;

/// One of the 24 points. Counts are kept per player; outside of the
/// capture step at most one of them is nonzero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    white: u8,
    black: u8,
}

impl Point {
    pub fn new(white: u8, black: u8) -> Self {
        Point { white, black }
    }

    pub fn count(&self, player: Player) -> u8 {
        match player {
            Player::White => self.white,
            Player::Black => self.black,
        }
    }

    pub fn set_count(&mut self, player: Player, value: u8) {
        match player {
            Player::White => self.white = value,
            Player::Black => self.black = value,
        }
    }

    pub fn add_checker(&mut self, player: Player) {
        let count = self.count(player);
        self.set_count(player, count.saturating_add(1));
    }

    /// Removing from an empty point is a no-op.
    pub fn remove_checker(&mut self, player: Player) {
        let count = self.count(player);
        self.set_count(player, count.saturating_sub(1));
    }

    /// A checker of `player` may land here unless the opponent holds the point.
    pub fn can_accept(&self, player: Player) -> bool {
        self.count(player.opposite()) < 2
    }

    /// True if exactly one opposing checker sits here.
    pub fn is_blot_of(&self, player: Player) -> bool {
        self.count(player) == 1
    }

    pub fn owner(&self) -> Option<Player> {
        match (self.white, self.black) {
            (0, 0) => None,
            (_, 0) => Some(Player::White),
            (0, _) => Some(Player::Black),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.white == 0 && self.black == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_by_two_opponents() {
        let mut point = Point::default();
        assert!(point.can_accept(Player::White));
        point.add_checker(Player::Black);
        assert!(point.can_accept(Player::White));
        point.add_checker(Player::Black);
        assert!(!point.can_accept(Player::White));
        assert!(point.can_accept(Player::Black));
    }

    #[test]
    fn remove_from_empty_is_noop() {
        let mut point = Point::new(0, 3);
        point.remove_checker(Player::White);
        assert_eq!(point, Point::new(0, 3));
        assert_eq!(point.owner(), Some(Player::Black));
    }
}
