//! Batches of automated games, played in parallel.

use std::fmt;

use log::{debug, info};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::backgammon::{Board, Player, Role};
use crate::config::GameConfig;
use crate::game::TurnController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfPlayConfig {
    pub games: u32,
    /// Game `i` rolls with seed `seed + i`.
    pub seed: u64,
    pub max_turns: u32,
    pub home_right: Player,
    pub first_to_move: Player,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            games: 100,
            seed: 0,
            max_turns: 2_000,
            home_right: Player::White,
            first_to_move: Player::White,
        }
    }
}

impl SelfPlayConfig {
    pub fn game_config(&self, index: u32) -> GameConfig {
        GameConfig {
            home_right: self.home_right,
            first_to_move: self.first_to_move,
            white: Role::Automated,
            black: Role::Automated,
            seed: Some(self.seed.wrapping_add(index as u64)),
            max_turns: Some(self.max_turns),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GameRecord {
    pub winner: Option<Player>,
    pub turns: u32,
    pub final_board: Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelfPlaySummary {
    pub games: u32,
    pub wins: [u32; 2],
    /// Games parked by the turn cap.
    pub unfinished: u32,
    pub total_turns: u64,
}

impl SelfPlaySummary {
    fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_turns += game.turns as u64;
        match game.winner {
            Some(player) => self.wins[player.index()] += 1,
            None => self.unfinished += 1,
        }
    }

    pub fn wins(&self, player: Player) -> u32 {
        self.wins[player.index()]
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games as f64
    }
}

impl fmt::Display for SelfPlaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Games: {}, White wins: {}, Black wins: {}, unfinished: {}, avg turns: {:.1}",
            self.games,
            self.wins(Player::White),
            self.wins(Player::Black),
            self.unfinished,
            self.average_turns()
        )
    }
}

pub fn play_game(config: GameConfig) -> GameRecord {
    let game = TurnController::new(config);
    debug!("Game with seed {:?} finished after {} turns", game.config().seed, game.turns_played());
    GameRecord {
        winner: game.winner(),
        turns: game.turns_played(),
        final_board: *game.board(),
    }
}

pub fn run_games(config: &SelfPlayConfig) -> SelfPlaySummary {
    info!("Playing {} games starting at seed {}", config.games, config.seed);
    let records: Vec<GameRecord> = (0..config.games)
        .into_par_iter()
        .map(|i| play_game(config.game_config(i)))
        .collect();

    let mut summary = SelfPlaySummary::default();
    for record in &records {
        summary.record(record);
    }
    summary
}
