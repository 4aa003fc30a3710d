//! Move legality: read-only queries over a [`Board`] and the dice of the turn.

use hashbrown::HashSet;
use log::debug;

use crate::backgammon::{
    Board, DiceSet, HalfMove, Player, Position, CHECKERS_PER_PLAYER, NUM_POINTS,
};

impl Board {
    /// Landing point `distance` pips ahead of `start` for `player`.
    pub fn target_index(&self, player: Player, start: u8, distance: u8) -> Option<u8> {
        self.orientation(player).target_index(start, distance)
    }

    fn open_target(&self, player: Player, start: u8, distance: u8) -> Option<u8> {
        self.target_index(player, start, distance)
            .filter(|&t| self.can_accept(t, player))
    }

    /// Entry points open to a bar checker of `player` with the remaining dice.
    pub fn reentry_targets(&self, player: Player, dice: &DiceSet) -> HashSet<u8> {
        let orientation = self.orientation(player);
        dice.unique_remaining()
            .iter()
            .filter_map(|&die| orientation.entry_point(die))
            .filter(|&t| self.can_accept(t, player))
            .collect()
    }

    /// Points a checker of `player` on `start` can reach this turn.
    ///
    /// Single dice, the sum of two different dice (if one of the two
    /// intermediate points is open), and on doubles each step of the chain
    /// up to the first blocked or off-board step.
    pub fn reachable_targets(&self, player: Player, start: u8, dice: &DiceSet) -> HashSet<u8> {
        let mut targets = HashSet::new();
        let remaining = dice.remaining();
        if remaining.is_empty() || self.count(start, player) == 0 {
            return targets;
        }

        for &die in dice.unique_remaining().iter() {
            if let Some(t) = self.open_target(player, start, die) {
                targets.insert(t);
            }
        }

        if remaining.len() >= 2 {
            match dice.shared_face() {
                Some(face) => {
                    let mut current = start;
                    for step in 1..=remaining.len() {
                        let Some(next) = self.open_target(player, current, face) else {
                            break;
                        };
                        if step >= 2 {
                            targets.insert(next);
                        }
                        current = next;
                    }
                }
                None => {
                    let (a, b) = (remaining[0], remaining[1]);
                    let via_open = self.open_target(player, start, a).is_some()
                        || self.open_target(player, start, b).is_some();
                    if via_open {
                        if let Some(t) = self.open_target(player, start, a + b) {
                            targets.insert(t);
                        }
                    }
                }
            }
        }

        debug!("Reachable from {} for {}: {:?}", start, player, targets);
        targets
    }

    /// All fifteen checkers accounted for, none on the bar and none outside home.
    pub fn can_bear_off(&self, player: Player) -> bool {
        let home = self.home_zone_occupancy(player);
        let outside = self.outside_home_count(player);
        let total = u16::from(self.off(player)) + u16::from(self.bar(player)) + home + outside;
        total == u16::from(CHECKERS_PER_PLAYER) && outside == 0 && self.bar(player) == 0
    }

    /// Home point `player` bears off from with a die of `die`.
    ///
    /// The checker exactly `die` pips from the exit goes first. A larger die
    /// may only take the farthest checker, and only if nothing sits farther
    /// back than `die`.
    pub fn bear_off_move(&self, player: Player, die: u8) -> Option<u8> {
        if !self.can_bear_off(player) {
            return None;
        }
        let orientation = self.orientation(player);
        if let Some(exact) = orientation.point_at_bear_off_distance(die) {
            if self.count(exact, player) > 0 {
                return Some(exact);
            }
        }
        let farthest = orientation
            .home_range()
            .filter(|&i| self.count(i, player) > 0)
            .max_by_key(|&i| orientation.bear_off_distance(i))?;
        (orientation.bear_off_distance(farthest) < die).then_some(farthest)
    }

    /// First (die, point) pair that bears off, trying the largest die first.
    pub fn bear_off_plan(&self, player: Player, dice: &DiceSet) -> Option<(u8, u8)> {
        dice.unique_remaining()
            .iter()
            .find_map(|&die| self.bear_off_move(player, die).map(|point| (die, point)))
    }

    pub fn bear_off_available(&self, player: Player, dice: &DiceSet) -> bool {
        self.bear_off_plan(player, dice).is_some()
    }

    /// Every single-die movement open to `player`: re-entries while the bar
    /// is occupied, otherwise point-to-point moves in index order followed by
    /// bear-offs.
    pub fn legal_half_moves(&self, player: Player, dice: &DiceSet) -> Vec<HalfMove> {
        let mut half_moves = Vec::new();
        let faces = dice.unique_remaining();
        let orientation = self.orientation(player);

        if self.bar(player) > 0 {
            for &die in faces.iter() {
                let target = orientation.entry_point(die).filter(|&t| self.can_accept(t, player));
                if let Some(t) = target {
                    half_moves.push(HalfMove::new(Position::Bar, Position::Point(t), die));
                }
            }
            return half_moves;
        }

        for i in 0..NUM_POINTS {
            if self.count(i, player) == 0 {
                continue;
            }
            for &die in faces.iter() {
                if let Some(t) = self.open_target(player, i, die) {
                    half_moves.push(HalfMove::new(Position::Point(i), Position::Point(t), die));
                }
            }
        }

        for &die in faces.iter() {
            if let Some(point) = self.bear_off_move(player, die) {
                half_moves.push(HalfMove::new(Position::Point(point), Position::Off, die));
            }
        }

        half_moves
    }

    /// Whether `player` can play anything at all with the remaining dice.
    /// Checkers on the bar must enter first, so only entries count then.
    pub fn has_any_legal_move(&self, player: Player, dice: &DiceSet) -> bool {
        if dice.remaining().is_empty() {
            return false;
        }
        if self.bar(player) > 0 {
            return !self.reentry_targets(player, dice).is_empty();
        }
        let faces = dice.unique_remaining();
        let any_move = (0..NUM_POINTS)
            .filter(|&i| self.count(i, player) > 0)
            .any(|i| faces.iter().any(|&die| self.open_target(player, i, die).is_some()));
        any_move || self.bear_off_available(player, dice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[u8]) -> HashSet<u8> {
        values.iter().copied().collect()
    }

    #[test]
    fn opening_targets_for_white() {
        let board = Board::new(Player::White);
        let dice = DiceSet::from_roll(3, 1);
        // 12 -> 9 (3), 12 -> 11 is black's point, 12 -> 8 via 9.
        assert_eq!(board.reachable_targets(Player::White, 12, &dice), set(&[9, 8]));
        assert_eq!(board.reachable_targets(Player::White, 7, &dice), set(&[4, 6, 3]));
    }

    #[test]
    fn ascending_side_targets() {
        let board = Board::new(Player::White);
        let dice = DiceSet::from_roll(6, 5);
        // 0 -> 5 lands on white's five point; the sum goes through 6.
        assert_eq!(board.reachable_targets(Player::Black, 0, &dice), set(&[6, 11]));
    }

    #[test]
    fn empty_or_foreign_origin_has_no_targets() {
        let board = Board::new(Player::White);
        let dice = DiceSet::from_roll(3, 1);
        assert!(board.reachable_targets(Player::White, 10, &dice).is_empty());
        assert!(board.reachable_targets(Player::White, 0, &dice).is_empty());
    }

    #[test]
    fn doubles_chain_stops_at_block() {
        let mut board = Board::empty(Player::White);
        board.set_point(20, 15, 0);
        board.set_point(12, 0, 2);
        board.set_point(0, 0, 13);
        let dice = DiceSet::from_roll(4, 4);
        // 20 -> 16 -> 12 (blocked) so only 16 is offered.
        assert_eq!(board.reachable_targets(Player::White, 20, &dice), set(&[16]));

        board.set_point(12, 0, 0);
        board.set_point(0, 0, 15);
        assert_eq!(board.reachable_targets(Player::White, 20, &dice), set(&[16, 12, 8, 4]));
    }

    #[test]
    fn sum_needs_an_open_intermediate() {
        let mut board = Board::empty(Player::White);
        board.set_point(20, 15, 0);
        board.set_point(17, 0, 2);
        board.set_point(18, 0, 2);
        board.set_point(0, 0, 11);
        let dice = DiceSet::from_roll(3, 2);
        assert!(board.reachable_targets(Player::White, 20, &dice).is_empty());
        assert!(!board.has_any_legal_move(Player::White, &dice));
    }

    #[test]
    fn reentry_target_for_descending_side() {
        let mut board = Board::new(Player::White);
        board.set_point(23, 1, 0);
        board.set_bar(Player::White, 1);
        let dice = DiceSet::from_roll(3, 3);
        assert_eq!(board.reentry_targets(Player::White, &dice), set(&[21]));
        assert!(board.has_any_legal_move(Player::White, &dice));
        // Bar checkers restrict the moves to entries.
        let moves = board.legal_half_moves(Player::White, &dice);
        assert_eq!(moves, vec![HalfMove::new(Position::Bar, Position::Point(21), 3)]);
    }

    #[test]
    fn closed_board_blocks_reentry() {
        let mut board = Board::empty(Player::White);
        board.set_bar(Player::White, 1);
        board.set_point(0, 14, 0);
        for i in 18..24 {
            board.set_point(i, 0, 2);
        }
        board.set_point(10, 0, 3);
        let dice = DiceSet::from_roll(6, 5);
        assert!(board.reentry_targets(Player::White, &dice).is_empty());
        assert!(!board.has_any_legal_move(Player::White, &dice));
    }

    #[test]
    fn bear_off_eligibility() {
        let mut board = Board::empty(Player::White);
        board.set_point(0, 5, 0);
        board.set_point(3, 5, 0);
        board.set_point(5, 5, 0);
        board.set_point(20, 0, 15);
        assert!(board.can_bear_off(Player::White));

        board.set_point(5, 4, 0);
        board.set_point(6, 1, 0);
        assert!(!board.can_bear_off(Player::White));

        board.set_point(6, 0, 0);
        board.set_bar(Player::White, 1);
        assert!(!board.can_bear_off(Player::White));

        board.set_bar(Player::White, 0);
        assert!(!board.can_bear_off(Player::White), "only 14 checkers accounted for");
    }

    #[test]
    fn bear_off_move_rules() {
        let mut board = Board::empty(Player::White);
        board.set_point(1, 10, 0);
        board.set_point(3, 5, 0);
        board.set_point(20, 0, 15);
        assert_eq!(board.bear_off_move(Player::White, 4), Some(3));
        assert_eq!(board.bear_off_move(Player::White, 2), Some(1));
        // Nothing on the 3 pip point and a checker farther back: no bear-off.
        assert_eq!(board.bear_off_move(Player::White, 3), None);
        // Larger than the farthest checker takes the farthest one.
        assert_eq!(board.bear_off_move(Player::White, 6), Some(3));

        let dice = DiceSet::from_roll(3, 6);
        assert_eq!(board.bear_off_plan(Player::White, &dice), Some((6, 3)));
    }

    #[test]
    fn bear_off_for_ascending_side() {
        let mut board = Board::empty(Player::White);
        board.set_point(23, 0, 5);
        board.set_point(19, 0, 10);
        board.set_point(2, 15, 0);
        assert!(board.can_bear_off(Player::Black));
        assert_eq!(board.bear_off_move(Player::Black, 1), Some(23));
        assert_eq!(board.bear_off_move(Player::Black, 5), Some(19));
        assert_eq!(board.bear_off_move(Player::Black, 6), Some(19));
        assert_eq!(board.bear_off_move(Player::Black, 3), None);
    }

    #[test]
    fn no_dice_means_no_move() {
        let board = Board::new(Player::White);
        assert!(!board.has_any_legal_move(Player::White, &DiceSet::new()));
    }
}
