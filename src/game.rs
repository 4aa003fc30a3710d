//! Turn controller: the state machine that drives a game.
//!
//! Every command runs to completion before the next one is accepted; callers
//! serialize access. Rejected commands return an [`ActionError`], are logged,
//! and leave the game untouched. A click on a destination that is not
//! highlighted is a deselect, not a rejection.

use std::mem;

use hashbrown::HashSet;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use thiserror::Error;

use crate::backgammon::{
    Board, DiceSet, GameOutcome, GameSnapshot, HalfMove, Landing, Player, Position, Role,
    NUM_POINTS,
};
use crate::config::GameConfig;
use crate::engine::play_greedy_turn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingRoll,
    /// Checkers on the bar; only entry points are selectable.
    AwaitingReentry,
    /// Pick an origin, then a highlighted destination, or bear off.
    AwaitingSelection,
    GameOver(Player),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Rolled { player: Player, dice: Vec<u8> },
    StateChanged(GameSnapshot),
    /// The side to move had nothing to play with its roll.
    Passed { player: Player },
    TurnEnded { next: Player },
    GameOver { winner: Player },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,
    #[error("not a local turn: {0} is to move")]
    NotYourTurn(Player),
    #[error("dice already rolled this turn")]
    AlreadyRolled,
    #[error("dice not rolled yet")]
    NotRolled,
    #[error("invalid dice faces {0}/{1}")]
    InvalidDice(u8, u8),
    #[error("point index {0} is off the board")]
    InvalidPoint(u8),
    #[error("point {0} holds no checker of the side to move")]
    EmptyPoint(u8),
    #[error("checkers on the bar must enter first")]
    BarMustEnter,
    #[error("no checker on the bar")]
    BarEmpty,
    #[error("no checker selected")]
    NoSelection,
    #[error("point {0} is not a legal destination")]
    NotHighlighted(u8),
    #[error("distance {0} cannot be paid with the remaining dice")]
    DiceMismatch(u8),
    #[error("bearing off is not allowed yet")]
    CannotBearOff,
    #[error("no checker can be borne off with the remaining dice")]
    NoBearOffMove,
}

pub struct TurnController {
    config: GameConfig,
    board: Board,
    dice: DiceSet,
    rng: Xoshiro256PlusPlus,
    current: Player,
    phase: Phase,
    selected: Option<u8>,
    highlights: HashSet<u8>,
    turns_played: u32,
    turn_moves: Vec<HalfMove>,
    last_turn: Vec<HalfMove>,
    events: Vec<GameEvent>,
}

impl TurnController {
    /// Sets up the opening position. If the first side is automated its
    /// turns are played right away.
    pub fn new(config: GameConfig) -> Self {
        let board = Board::new(config.home_right);
        TurnController::with_board(config, board)
    }

    /// Starts from an arbitrary position with `config.first_to_move` to roll.
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut controller = TurnController {
            current: config.first_to_move,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            board,
            dice: DiceSet::new(),
            phase: Phase::AwaitingRoll,
            selected: None,
            highlights: HashSet::new(),
            turns_played: 0,
            turn_moves: Vec::new(),
            last_turn: Vec::new(),
            events: Vec::new(),
            config,
        };
        debug!("Game created with seed {}", seed);
        if !controller.check_game_over() {
            controller.drive_automated();
        }
        controller
    }

    pub fn new_game(&mut self) {
        info!("New game");
        self.board = Board::new(self.config.home_right);
        self.dice.reset_for_next_turn();
        self.current = self.config.first_to_move;
        self.phase = Phase::AwaitingRoll;
        self.clear_selection();
        self.turns_played = 0;
        self.turn_moves.clear();
        self.last_turn.clear();
        self.emit_state();
        self.drive_automated();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn role(&self, player: Player) -> Role {
        self.config.role(player)
    }

    pub fn selected(&self) -> Option<u8> {
        self.selected
    }

    /// Points the UI should offer: entry points or destinations of the selection.
    pub fn highlights(&self) -> &HashSet<u8> {
        &self.highlights
    }

    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            Phase::GameOver(winner) => Some(winner),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    /// Movements of the most recently finished turn.
    pub fn last_turn(&self) -> &[HalfMove] {
        &self.last_turn
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.board.snapshot()
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Whether a bear-off command would currently succeed.
    pub fn bear_off_enabled(&self) -> bool {
        self.phase == Phase::AwaitingSelection
            && self.role(self.current) == Role::LocalHuman
            && self.board.bear_off_available(self.current, &self.dice)
    }

    pub fn roll(&mut self) -> Result<(), ActionError> {
        let result = self.roll_dice(None);
        self.logged("roll", result)
    }

    /// Rolls fixed faces instead of drawing them.
    pub fn roll_with(&mut self, die1: u8, die2: u8) -> Result<(), ActionError> {
        let result = self.roll_dice(Some((die1, die2)));
        self.logged("roll", result)
    }

    /// Click on a point: enters from the bar, picks an origin or a
    /// destination depending on the phase.
    pub fn select(&mut self, index: u8) -> Result<(), ActionError> {
        match (self.phase, self.selected) {
            (Phase::AwaitingSelection, Some(_)) => self.select_destination(index),
            _ => self.select_origin(index),
        }
    }

    pub fn select_origin(&mut self, index: u8) -> Result<(), ActionError> {
        let result = self.try_select_origin(index);
        self.logged("select origin", result)
    }

    pub fn select_destination(&mut self, index: u8) -> Result<(), ActionError> {
        let result = self.try_select_destination(index);
        self.logged("select destination", result)
    }

    pub fn reenter(&mut self, index: u8) -> Result<(), ActionError> {
        let result = self.try_reenter(index);
        self.logged("re-enter", result)
    }

    pub fn perform_bear_off(&mut self) -> Result<(), ActionError> {
        let result = self.try_bear_off();
        self.logged("bear off", result)
    }

    /// Overwrites the board with the peer's state. The peer is authoritative
    /// for its own turn; nothing is reconciled. A local turn in progress is
    /// re-evaluated against the new board.
    pub fn apply_remote_snapshot(&mut self, snapshot: &GameSnapshot) {
        self.board.apply_snapshot(snapshot);
        self.clear_selection();
        if self.is_game_over() || self.check_game_over() {
            return;
        }
        if matches!(self.phase, Phase::AwaitingReentry | Phase::AwaitingSelection) {
            self.refresh_phase();
        }
    }

    /// The relay says whose turn it is: the local side's if `your_turn`.
    pub fn receive_turn_signal(&mut self, your_turn: bool) {
        if self.is_game_over() {
            debug!("Ignoring turn signal after game over");
            return;
        }
        let next = if your_turn {
            self.config.home_right
        } else {
            self.config.home_right.opposite()
        };
        if next == self.current {
            debug!("Turn signal keeps {} to move", next);
            return;
        }
        self.dice.reset_for_next_turn();
        self.clear_selection();
        self.current = next;
        self.phase = Phase::AwaitingRoll;
        info!("Your turn: {}", your_turn);
    }

    fn logged(&self, action: &str, result: Result<(), ActionError>) -> Result<(), ActionError> {
        if let Err(err) = &result {
            warn!("{} rejected for {}: {}", action, self.current, err);
        }
        result
    }

    fn ensure_local_turn(&self) -> Result<(), ActionError> {
        if self.is_game_over() {
            return Err(ActionError::GameOver);
        }
        if self.role(self.current) != Role::LocalHuman {
            return Err(ActionError::NotYourTurn(self.current));
        }
        Ok(())
    }

    fn roll_dice(&mut self, faces: Option<(u8, u8)>) -> Result<(), ActionError> {
        self.ensure_local_turn()?;
        if self.phase != Phase::AwaitingRoll {
            return Err(ActionError::AlreadyRolled);
        }
        match faces {
            Some((die1, die2)) => {
                if !self.dice.set_roll(die1, die2) {
                    return Err(ActionError::InvalidDice(die1, die2));
                }
            }
            None => {
                self.dice.roll(&mut self.rng);
            }
        }
        self.announce_roll();
        if !self.board.has_any_legal_move(self.current, &self.dice) {
            self.pass_turn();
            return Ok(());
        }
        self.refresh_phase();
        Ok(())
    }

    fn try_select_origin(&mut self, index: u8) -> Result<(), ActionError> {
        self.ensure_local_turn()?;
        if index >= NUM_POINTS {
            return Err(ActionError::InvalidPoint(index));
        }
        match self.phase {
            Phase::AwaitingRoll => Err(ActionError::NotRolled),
            Phase::AwaitingReentry if self.highlights.contains(&index) => self.enter_at(index),
            Phase::AwaitingReentry => Err(ActionError::BarMustEnter),
            Phase::AwaitingSelection => {
                if self.board.count(index, self.current) == 0 {
                    return Err(ActionError::EmptyPoint(index));
                }
                self.selected = Some(index);
                self.highlights = self.board.reachable_targets(self.current, index, &self.dice);
                if self.highlights.is_empty() {
                    info!("No valid moves from {} with {:?}", index, self.dice.remaining());
                }
                Ok(())
            }
            Phase::GameOver(_) => Err(ActionError::GameOver),
        }
    }

    fn try_select_destination(&mut self, index: u8) -> Result<(), ActionError> {
        self.ensure_local_turn()?;
        match self.phase {
            Phase::AwaitingRoll => return Err(ActionError::NotRolled),
            Phase::AwaitingReentry => return Err(ActionError::BarMustEnter),
            _ => {}
        }
        let Some(origin) = self.selected else {
            return Err(ActionError::NoSelection);
        };
        if !self.highlights.contains(&index) {
            info!("{} is not reachable from {}, clearing selection", index, origin);
            self.clear_selection();
            return Ok(());
        }
        let Some(distance) = self.board.orientation(self.current).distance(origin, index) else {
            self.clear_selection();
            return Err(ActionError::NotHighlighted(index));
        };
        let Some(plan) = self.dice.plan(distance) else {
            self.clear_selection();
            return Err(ActionError::DiceMismatch(distance));
        };
        let landing = self.board.move_piece(self.current, origin, index);
        if landing == Landing::Ignored {
            self.clear_selection();
            return Err(ActionError::EmptyPoint(origin));
        }
        self.dice.commit(&plan);
        if landing == Landing::Hit {
            info!("{} hit a blot on {}", self.current, index);
        }
        self.record(HalfMove::new(Position::Point(origin), Position::Point(index), distance));
        self.after_action();
        Ok(())
    }

    fn try_reenter(&mut self, index: u8) -> Result<(), ActionError> {
        self.ensure_local_turn()?;
        match self.phase {
            Phase::AwaitingRoll => Err(ActionError::NotRolled),
            Phase::AwaitingReentry if self.highlights.contains(&index) => self.enter_at(index),
            Phase::AwaitingReentry => Err(ActionError::NotHighlighted(index)),
            _ => Err(ActionError::BarEmpty),
        }
    }

    fn enter_at(&mut self, index: u8) -> Result<(), ActionError> {
        let Some(distance) = self.board.orientation(self.current).entry_distance(index) else {
            return Err(ActionError::NotHighlighted(index));
        };
        let Some(plan) = self.dice.plan(distance) else {
            return Err(ActionError::DiceMismatch(distance));
        };
        let landing = self.board.reenter(self.current, index);
        if landing == Landing::Ignored {
            return Err(ActionError::BarEmpty);
        }
        self.dice.commit(&plan);
        if landing == Landing::Hit {
            info!("{} entered with a hit on {}", self.current, index);
        }
        self.record(HalfMove::new(Position::Bar, Position::Point(index), distance));
        self.after_action();
        Ok(())
    }

    fn try_bear_off(&mut self) -> Result<(), ActionError> {
        self.ensure_local_turn()?;
        match self.phase {
            Phase::AwaitingRoll => return Err(ActionError::NotRolled),
            Phase::AwaitingReentry => return Err(ActionError::BarMustEnter),
            _ => {}
        }
        if !self.board.can_bear_off(self.current) {
            return Err(ActionError::CannotBearOff);
        }
        let Some((die, point)) = self.board.bear_off_plan(self.current, &self.dice) else {
            return Err(ActionError::NoBearOffMove);
        };
        if !self.board.bear_off(self.current, point) {
            return Err(ActionError::EmptyPoint(point));
        }
        self.dice.consume(die);
        self.record(HalfMove::new(Position::Point(point), Position::Off, die));
        self.after_action();
        Ok(())
    }

    fn record(&mut self, half_move: HalfMove) {
        debug!("{} played {:?}", self.current, half_move);
        self.turn_moves.push(half_move);
        self.clear_selection();
        self.emit_state();
    }

    /// End-of-turn check after every movement.
    fn after_action(&mut self) {
        if self.check_game_over() {
            return;
        }
        if self.dice.remaining().is_empty() {
            info!("{} has no dice left. Switching turn.", self.current);
            self.end_turn();
        } else if !self.board.has_any_legal_move(self.current, &self.dice) {
            let remaining = self.dice.remaining();
            info!("{} has no legal move with {:?}. Switching turn.", self.current, remaining);
            self.end_turn();
        } else {
            self.refresh_phase();
        }
    }

    fn refresh_phase(&mut self) {
        self.selected = None;
        if self.board.bar(self.current) > 0 {
            self.highlights = self.board.reentry_targets(self.current, &self.dice);
            if self.highlights.is_empty() {
                self.pass_turn();
                return;
            }
            debug!("Entry points for {}: {:?}", self.current, self.highlights);
            self.phase = Phase::AwaitingReentry;
        } else {
            self.highlights.clear();
            self.phase = Phase::AwaitingSelection;
        }
    }

    fn pass_turn(&mut self) {
        info!("No valid moves for {}. Passing turn.", self.current);
        self.events.push(GameEvent::Passed { player: self.current });
        self.end_turn();
    }

    fn end_turn(&mut self) {
        self.finish_turn();
        self.drive_automated();
    }

    fn finish_turn(&mut self) {
        self.dice.reset_for_next_turn();
        self.clear_selection();
        self.last_turn = mem::take(&mut self.turn_moves);
        self.turns_played += 1;
        self.current = self.current.opposite();
        self.phase = Phase::AwaitingRoll;
        debug!("Turn {} over, {} to move", self.turns_played, self.current);
        self.events.push(GameEvent::TurnEnded { next: self.current });
    }

    /// Plays automated turns until a non-automated side is to move, the game
    /// ends or the configured turn cap is hit.
    fn drive_automated(&mut self) {
        while self.phase == Phase::AwaitingRoll && self.role(self.current) == Role::Automated {
            if let Some(max_turns) = self.config.max_turns {
                if self.turns_played >= max_turns {
                    warn!("Turn limit {} reached, automated play parked", max_turns);
                    return;
                }
            }
            self.play_automated_turn();
        }
    }

    fn play_automated_turn(&mut self) {
        self.dice.roll(&mut self.rng);
        self.announce_roll();
        if !self.board.has_any_legal_move(self.current, &self.dice) {
            info!("No valid moves for {}. Passing turn.", self.current);
            self.events.push(GameEvent::Passed { player: self.current });
            self.finish_turn();
            return;
        }
        let played = play_greedy_turn(&mut self.board, &mut self.dice, self.current);
        if !played.is_empty() {
            self.turn_moves.extend(played);
            self.emit_state();
        }
        if self.check_game_over() {
            return;
        }
        self.finish_turn();
    }

    fn announce_roll(&mut self) {
        info!("{} rolled {:?}", self.current, self.dice.rolled());
        self.events.push(GameEvent::Rolled {
            player: self.current,
            dice: self.dice.rolled().to_vec(),
        });
    }

    fn check_game_over(&mut self) -> bool {
        let GameOutcome::Win(winner) = self.board.outcome() else {
            return false;
        };
        info!("{} has won!", winner);
        self.phase = Phase::GameOver(winner);
        self.clear_selection();
        self.last_turn = mem::take(&mut self.turn_moves);
        self.events.push(GameEvent::GameOver { winner });
        true
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.highlights.clear();
    }

    fn emit_state(&mut self) {
        self.events.push(GameEvent::StateChanged(self.board.snapshot()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hot_seat() -> TurnController {
        TurnController::new(GameConfig::hot_seat().with_seed(1))
    }

    #[test]
    fn roll_twice_is_rejected() {
        let mut game = hot_seat();
        game.roll_with(3, 1).unwrap();
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        assert_eq!(game.roll(), Err(ActionError::AlreadyRolled));
        assert_eq!(game.dice().remaining(), &[3, 1]);
    }

    #[test]
    fn invalid_faces_are_rejected() {
        let mut game = hot_seat();
        assert_eq!(game.roll_with(0, 7), Err(ActionError::InvalidDice(0, 7)));
        assert_eq!(game.phase(), Phase::AwaitingRoll);
    }

    #[test]
    fn selecting_before_rolling_is_rejected() {
        let mut game = hot_seat();
        assert_eq!(game.select_origin(12), Err(ActionError::NotRolled));
        assert_eq!(game.perform_bear_off(), Err(ActionError::NotRolled));
        assert_eq!(game.select_origin(40), Err(ActionError::InvalidPoint(40)));
    }

    #[test]
    fn two_click_move() {
        let mut game = hot_seat();
        game.roll_with(3, 1).unwrap();
        assert_eq!(game.select_origin(10), Err(ActionError::EmptyPoint(10)));
        assert_eq!(game.select_origin(0), Err(ActionError::EmptyPoint(0)));
        game.select(12).unwrap();
        assert_eq!(game.selected(), Some(12));
        assert!(game.highlights().contains(&9));
        game.select(9).unwrap();
        assert_eq!(game.board().count(9, Player::White), 1);
        assert_eq!(game.board().count(12, Player::White), 4);
        assert_eq!(game.dice().remaining(), &[1]);
        assert_eq!(game.selected(), None);
        assert_eq!(game.current_player(), Player::White);
    }

    #[test]
    fn compound_move_spends_both_dice() {
        let mut game = hot_seat();
        game.roll_with(3, 1).unwrap();
        game.select_origin(12).unwrap();
        game.select_destination(8).unwrap();
        assert_eq!(game.board().count(8, Player::White), 1);
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.last_turn(), &[HalfMove::new(Position::Point(12), Position::Point(8), 4)]);
        assert_eq!(game.phase(), Phase::AwaitingRoll);
        assert!(!game.dice().has_rolled());
    }

    #[test]
    fn destination_not_highlighted_deselects() {
        let mut game = hot_seat();
        game.roll_with(3, 1).unwrap();
        let before = *game.board();
        game.select_origin(12).unwrap();
        assert_eq!(game.select_destination(11), Ok(()));
        assert_eq!(game.selected(), None);
        assert!(game.highlights().is_empty());
        assert_eq!(*game.board(), before);
        assert_eq!(game.select_destination(9), Err(ActionError::NoSelection));
        assert_eq!(game.dice().remaining(), &[3, 1]);
        assert_eq!(game.phase(), Phase::AwaitingSelection);
    }

    #[test]
    fn remote_snapshot_mid_turn_puts_bar_first() {
        let mut game = TurnController::new(GameConfig::networked(Player::White).with_seed(4));
        game.roll_with(6, 5).unwrap();
        game.select_origin(12).unwrap();
        assert_eq!(game.phase(), Phase::AwaitingSelection);

        let mut hit = Board::new(Player::White);
        hit.set_point(23, 1, 0);
        hit.set_bar(Player::White, 1);
        game.apply_remote_snapshot(&hit.snapshot());

        assert_eq!(game.phase(), Phase::AwaitingReentry);
        assert_eq!(game.selected(), None);
        assert!(game.highlights().contains(&19));
        assert_eq!(game.select_origin(12), Err(ActionError::BarMustEnter));
        game.reenter(19).unwrap();
        assert_eq!(game.board().bar(Player::White), 0);
    }

    #[test]
    fn remote_snapshot_between_turns_keeps_phase() {
        let mut game = TurnController::new(GameConfig::networked(Player::White));
        let mut hit = Board::new(Player::White);
        hit.set_point(23, 1, 0);
        hit.set_bar(Player::White, 1);
        game.apply_remote_snapshot(&hit.snapshot());
        assert_eq!(game.phase(), Phase::AwaitingRoll);
        assert!(game.highlights().is_empty());
    }

    #[test]
    fn new_game_restores_the_opening() {
        let mut game = hot_seat();
        game.roll_with(6, 5).unwrap();
        game.select_origin(23).unwrap();
        game.select_destination(12).unwrap();
        game.new_game();
        assert_eq!(*game.board(), Board::new(Player::White));
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(game.phase(), Phase::AwaitingRoll);
        assert_eq!(game.turns_played(), 0);
        assert!(game.last_turn().is_empty());
    }

    #[test]
    fn bar_blocks_other_selections() {
        let mut board = Board::new(Player::White);
        board.set_point(23, 1, 0);
        board.set_bar(Player::White, 1);
        let mut game = TurnController::with_board(GameConfig::hot_seat(), board);
        game.roll_with(3, 5).unwrap();
        assert_eq!(game.phase(), Phase::AwaitingReentry);
        assert_eq!(game.select_origin(12), Err(ActionError::BarMustEnter));
        assert_eq!(game.perform_bear_off(), Err(ActionError::BarMustEnter));
        assert_eq!(game.reenter(20), Err(ActionError::NotHighlighted(20)));
        game.reenter(21).unwrap();
        assert_eq!(game.board().bar(Player::White), 0);
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        assert_eq!(game.reenter(21), Err(ActionError::BarEmpty));
    }

    #[test]
    fn events_follow_a_turn() {
        let mut game = hot_seat();
        game.roll_with(6, 5).unwrap();
        game.select_origin(23).unwrap();
        game.select_destination(12).unwrap();
        let events = game.take_events();
        assert!(matches!(events[0], GameEvent::Rolled { player: Player::White, .. }));
        assert!(matches!(events[1], GameEvent::StateChanged(_)));
        assert_eq!(events[2], GameEvent::TurnEnded { next: Player::Black });
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn automated_side_answers_synchronously() {
        let mut game = TurnController::new(GameConfig::vs_automated(Player::White).with_seed(9));
        game.roll_with(6, 5).unwrap();
        game.select_origin(23).unwrap();
        game.select_destination(12).unwrap();
        assert_eq!(game.turns_played(), 2);
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(game.phase(), Phase::AwaitingRoll);
        assert!(game.board().is_consistent());
    }

    #[test]
    fn turn_cap_parks_self_play() {
        let config = GameConfig { max_turns: Some(3), ..GameConfig::self_play().with_seed(5) };
        let mut game = TurnController::new(config);
        assert_eq!(game.turns_played(), 3);
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.phase(), Phase::AwaitingRoll);
        assert_eq!(game.roll(), Err(ActionError::NotYourTurn(Player::Black)));
        assert!(game.board().is_consistent());
    }

    #[test]
    fn automated_first_mover_plays_on_creation() {
        let game = TurnController::new(GameConfig::vs_automated(Player::Black).with_seed(2));
        assert_eq!(game.turns_played(), 1);
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.role(Player::White), Role::Automated);
    }

    #[test]
    fn networked_turn_hand_over() {
        let mut game = TurnController::new(GameConfig::networked(Player::White).with_seed(3));
        game.roll_with(6, 5).unwrap();
        game.select_origin(23).unwrap();
        game.select_destination(12).unwrap();
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.roll(), Err(ActionError::NotYourTurn(Player::Black)));

        let mut remote = Board::new(Player::White);
        remote.move_piece(Player::White, 23, 12);
        remote.move_piece(Player::Black, 0, 6);
        game.apply_remote_snapshot(&remote.snapshot());
        assert_eq!(*game.board(), remote);

        game.receive_turn_signal(true);
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(game.phase(), Phase::AwaitingRoll);
        assert!(game.roll().is_ok());
    }

    #[test]
    fn remote_snapshot_can_end_the_game() {
        let mut game = TurnController::new(GameConfig::networked(Player::White));
        let mut board = Board::empty(Player::White);
        board.set_off(Player::Black, 15);
        board.set_point(3, 15, 0);
        game.apply_remote_snapshot(&board.snapshot());
        assert_eq!(game.winner(), Some(Player::Black));
        assert_eq!(game.roll(), Err(ActionError::GameOver));
    }
}
