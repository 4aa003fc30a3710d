use std::fmt::Debug;

use log::{debug, info, warn};
use rand::Rng;

use crate::misc::TinyVec;

/// Dice spent by one movement, or the whole roll of a turn. Never more than four.
pub type DiceValues = TinyVec<u8, 4>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DicePhase {
    Unrolled,
    Rolled,
    Exhausted,
}

/// The dice of the current turn.
///
/// A roll of two equal faces yields four dice of that face. Every die rolled
/// this turn is either in `remaining` or in `used`; consuming moves dice from
/// the first to the second and never partially.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct DiceSet {
    rolled: DiceValues,
    remaining: DiceValues,
    used: DiceValues,
    has_rolled: bool,
}

impl DiceSet {
    pub fn new() -> Self {
        DiceSet::default()
    }

    /// Dice already rolled with the given faces, as if `set_roll` was called.
    pub fn from_roll(die1: u8, die2: u8) -> Self {
        let mut dice = DiceSet::new();
        dice.set_roll(die1, die2);
        dice
    }

    /// Draws two faces from `rng`. Does nothing if this turn already rolled.
    pub fn roll<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.has_rolled {
            info!("Already rolled: {:?}", &*self.remaining);
            return false;
        }
        let die1 = rng.random_range(1..=6);
        let die2 = rng.random_range(1..=6);
        self.set_roll(die1, die2)
    }

    /// Loads fixed faces. Rejected if already rolled or if a face is outside 1-6.
    pub fn set_roll(&mut self, die1: u8, die2: u8) -> bool {
        if self.has_rolled {
            info!("Already rolled: {:?}", &*self.remaining);
            return false;
        }
        if !(1..=6).contains(&die1) || !(1..=6).contains(&die2) {
            warn!("Invalid dice faces {}/{}", die1, die2);
            return false;
        }
        self.rolled = if die1 == die2 {
            DiceValues::from_slice(&[die1; 4])
        } else {
            DiceValues::from_slice(&[die1, die2])
        };
        self.remaining = self.rolled;
        self.used.clear();
        self.has_rolled = true;
        debug!("Dice rolled: {:?}", &*self.remaining);
        true
    }

    pub fn reset_for_next_turn(&mut self) {
        *self = DiceSet::default();
    }

    pub fn has_rolled(&self) -> bool {
        self.has_rolled
    }

    pub fn rolled(&self) -> &[u8] {
        &self.rolled
    }

    pub fn remaining(&self) -> &[u8] {
        &self.remaining
    }

    pub fn used(&self) -> &[u8] {
        &self.used
    }

    pub fn is_double(&self) -> bool {
        self.rolled.len() == 4
    }

    pub fn is_exhausted(&self) -> bool {
        self.has_rolled && self.remaining.is_empty()
    }

    pub fn phase(&self) -> DicePhase {
        match (self.has_rolled, self.remaining.is_empty()) {
            (false, _) => DicePhase::Unrolled,
            (true, false) => DicePhase::Rolled,
            (true, true) => DicePhase::Exhausted,
        }
    }

    /// Remaining faces without repetition, largest first.
    pub fn unique_remaining(&self) -> DiceValues {
        let mut faces = self.remaining.to_vec();
        faces.sort_unstable_by(|a, b| b.cmp(a));
        faces.dedup();
        DiceValues::from_slice(&faces)
    }

    /// The face every remaining die shows, if they all agree.
    pub fn shared_face(&self) -> Option<u8> {
        let first = *self.remaining.first()?;
        self.remaining.iter().all(|&d| d == first).then_some(first)
    }

    /// Dice `consume(distance)` would take, without touching the state.
    ///
    /// An exact single die wins over several dice. Next, when all remaining
    /// dice share a face, a whole multiple of that face. Last, the smallest
    /// group of remaining dice adding up to `distance`.
    pub fn plan(&self, distance: u8) -> Option<DiceValues> {
        if distance == 0 || self.remaining.is_empty() {
            return None;
        }

        if self.remaining.contains(&distance) {
            return Some(DiceValues::from_slice(&[distance]));
        }

        if let Some(face) = self.shared_face() {
            if distance % face == 0 {
                let k = (distance / face) as usize;
                if k <= self.remaining.len() as usize {
                    let mut plan = DiceValues::new();
                    for _ in 0..k {
                        plan.push(face);
                    }
                    return Some(plan);
                }
            }
        }

        // At most four dice, so the search below is a handful of steps.
        for size in 2..=self.remaining.len() as usize {
            let mut chosen = DiceValues::new();
            if find_subset(&self.remaining, distance, size, 0, &mut chosen) {
                return Some(chosen);
            }
        }
        None
    }

    /// Moves the planned dice from `remaining` to `used`. All or nothing.
    pub fn commit(&mut self, plan: &[u8]) -> bool {
        let mut remaining = self.remaining;
        for &die in plan {
            if !remaining.remove_value(die) {
                return false;
            }
        }
        self.remaining = remaining;
        for &die in plan {
            self.used.push(die);
        }
        true
    }

    pub fn consume(&mut self, distance: u8) -> bool {
        match self.plan(distance) {
            Some(plan) => {
                let ok = self.commit(&plan);
                debug!("Used {:?} for distance {}", &*plan, distance);
                ok
            }
            None => {
                warn!("Could not use distance {} with dice {:?}", distance, &*self.remaining);
                false
            }
        }
    }
}

/// Backtracking search for exactly `size` dice starting at `start` summing to `target`.
fn find_subset(
    dice: &[u8],
    target: u8,
    size: usize,
    start: usize,
    chosen: &mut DiceValues,
) -> bool {
    if size == 0 {
        return target == 0;
    }
    for i in start..dice.len() {
        let die = dice[i];
        if die > target {
            continue;
        }
        chosen.push(die);
        if find_subset(dice, target - die, size - 1, i + 1, chosen) {
            return true;
        }
        chosen.pop();
    }
    false
}

impl Debug for DiceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.has_rolled {
            return write!(f, "Dice(unrolled)");
        }
        write!(f, "Dice(remaining {:?}, used {:?})", &*self.remaining, &*self.used)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    use super::*;

    fn total(dice: &DiceSet) -> usize {
        dice.remaining().len() + dice.used().len()
    }

    #[test]
    fn test_dice_roll() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        for _ in 0..200 {
            let mut dice = DiceSet::new();
            assert!(dice.roll(&mut rng));
            assert!(dice.remaining().iter().all(|d| (1..=6).contains(d)));
            if dice.is_double() {
                assert_eq!(dice.remaining().len(), 4);
                assert!(dice.shared_face().is_some());
            } else {
                assert_eq!(dice.remaining().len(), 2);
                assert_ne!(dice.remaining()[0], dice.remaining()[1]);
            }
        }
    }

    #[test]
    fn second_roll_is_ignored() {
        let mut dice = DiceSet::from_roll(3, 5);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        assert!(!dice.roll(&mut rng));
        assert!(!dice.set_roll(6, 6));
        assert_eq!(dice.remaining(), &[3, 5]);
    }

    #[test]
    fn exact_die_preferred_over_sum() {
        let mut dice = DiceSet::from_roll(2, 4);
        assert_eq!(dice.plan(4).as_deref(), Some(&[4][..]));
        assert!(dice.consume(4));
        assert_eq!(dice.remaining(), &[2]);
        assert_eq!(dice.used(), &[4]);
    }

    #[test]
    fn sum_of_two_dice() {
        let mut dice = DiceSet::from_roll(3, 5);
        assert!(dice.consume(8));
        assert!(dice.remaining().is_empty());
        assert_eq!(dice.used(), &[3, 5]);
        assert_eq!(dice.phase(), DicePhase::Exhausted);
    }

    #[test]
    fn doubles_multiple_of_face() {
        let mut dice = DiceSet::from_roll(2, 2);
        assert_eq!(dice.rolled(), &[2, 2, 2, 2]);
        assert!(dice.consume(6));
        assert_eq!(dice.remaining(), &[2]);
        assert_eq!(dice.used(), &[2, 2, 2]);
        assert_eq!(total(&dice), 4);
        assert!(!dice.consume(4));
        assert_eq!(dice.remaining(), &[2]);
    }

    #[test]
    fn unusable_distance_changes_nothing() {
        let mut dice = DiceSet::from_roll(6, 5);
        let before = dice;
        assert!(!dice.consume(4));
        assert!(!dice.consume(12));
        assert!(!dice.consume(0));
        assert_eq!(dice, before);
        assert_eq!(total(&dice), 2);
    }

    #[test]
    fn reset_returns_to_unrolled() {
        let mut dice = DiceSet::from_roll(1, 2);
        dice.consume(1);
        dice.reset_for_next_turn();
        assert_eq!(dice.phase(), DicePhase::Unrolled);
        assert!(dice.remaining().is_empty());
        assert!(dice.used().is_empty());
        assert!(dice.set_roll(4, 4));
    }

    #[test]
    fn unique_remaining_is_sorted_desc() {
        let dice = DiceSet::from_roll(2, 6);
        assert_eq!(&*dice.unique_remaining(), &[6, 2]);
        let dice = DiceSet::from_roll(3, 3);
        assert_eq!(&*dice.unique_remaining(), &[3]);
    }

    #[test]
    fn invalid_faces_rejected() {
        let mut dice = DiceSet::new();
        assert!(!dice.set_roll(0, 3));
        assert!(!dice.set_roll(3, 7));
        assert_eq!(dice.phase(), DicePhase::Unrolled);
    }
}
