//! Game configuration: which side sits on the right, who drives each side,
//! dice seeding and the automated turn cap.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backgammon::{Player, Role};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Side whose home zone is 0-5 on this board; the local side.
    pub home_right: Player,
    pub first_to_move: Player,
    pub white: Role,
    pub black: Role,
    /// Dice seed. A fresh random seed is used when absent.
    pub seed: Option<u64>,
    /// Total turns after which automated play stops driving the game.
    pub max_turns: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::vs_automated(Player::White)
    }
}

impl GameConfig {
    /// `local` plays from this board against the built-in opponent.
    pub fn vs_automated(local: Player) -> Self {
        GameConfig::with_roles(local, Role::LocalHuman, Role::Automated)
    }

    /// Both sides are played from this board.
    pub fn hot_seat() -> Self {
        GameConfig::with_roles(Player::White, Role::LocalHuman, Role::LocalHuman)
    }

    /// `local` plays from this board; the other side moves on a peer.
    pub fn networked(local: Player) -> Self {
        GameConfig::with_roles(local, Role::LocalHuman, Role::Remote)
    }

    /// Both sides are played by the built-in opponent.
    pub fn self_play() -> Self {
        GameConfig {
            max_turns: Some(2_000),
            ..GameConfig::with_roles(Player::White, Role::Automated, Role::Automated)
        }
    }

    fn with_roles(local: Player, local_role: Role, other_role: Role) -> Self {
        let (white, black) = match local {
            Player::White => (local_role, other_role),
            Player::Black => (other_role, local_role),
        };
        GameConfig {
            home_right: local,
            first_to_move: Player::White,
            white,
            black,
            seed: None,
            max_turns: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn role(&self, player: Player) -> Role {
        match player {
            Player::White => self.white,
            Player::Black => self.black,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let remote = Player::ALL.iter().filter(|&&p| self.role(p) == Role::Remote).count();
        if remote == 2 {
            return Err(ConfigError::Invalid("both sides cannot be remote"));
        }
        if remote == 1 && self.role(self.home_right) == Role::Remote {
            return Err(ConfigError::Invalid("the home-right side must be local in networked play"));
        }
        if self.max_turns == Some(0) {
            return Err(ConfigError::Invalid("max_turns must be positive"));
        }
        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        GameConfig::from_toml_str(&text)
    }
}
