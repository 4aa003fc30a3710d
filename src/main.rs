use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use backgammon_rules::{
    config::GameConfig,
    selfplay::{self, SelfPlayConfig},
};
use clap::Parser;

/// Plays batches of games between two built-in opponents.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u32,

    /// Seed of the first game; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Turn cap per game
    #[arg(long)]
    max_turns: Option<u32>,

    /// TOML game config supplying defaults for side, first mover, seed and cap
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final board of the first game
    #[arg(long)]
    show_board: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
    .init();

    let base = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::self_play(),
    };
    let defaults = SelfPlayConfig::default();
    let config = SelfPlayConfig {
        games: cli.games,
        seed: cli.seed.or(base.seed).unwrap_or(defaults.seed),
        max_turns: cli.max_turns.or(base.max_turns).unwrap_or(defaults.max_turns),
        home_right: base.home_right,
        first_to_move: base.first_to_move,
    };
    anyhow::ensure!(config.max_turns > 0, "--max-turns must be positive");

    let start = std::time::Instant::now();
    let summary = selfplay::run_games(&config);
    println!("{}", summary);
    println!("Played in {:?}", start.elapsed());

    if cli.show_board && config.games > 0 {
        let record = selfplay::play_game(config.game_config(0));
        match record.winner {
            Some(winner) => println!("Game 0: {} wins after {} turns", winner, record.turns),
            None => println!("Game 0: unfinished after {} turns", record.turns),
        }
        println!("{}", record.final_board);
    }
    Ok(())
}
