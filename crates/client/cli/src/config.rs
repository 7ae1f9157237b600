//! Run configuration assembled from the environment.
use std::env;
use std::path::PathBuf;

use anyhow::Result;
use snake_core::{Direction, GameConfig};

/// Settings of one headless run.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub level: String,
    pub seed: Option<u64>,
    pub max_steps: Option<u32>,
    pub turns: Vec<Option<Direction>>,
    pub session_id: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../game/content/data")),
            level: "arena".to_string(),
            seed: None,
            max_steps: None,
            turns: Vec::new(),
            session_id: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SNAKE_DATA_DIR` - Content directory (default: bundled data)
    /// - `SNAKE_LEVEL` - Level name under `levels/` (default: arena)
    /// - `SNAKE_SEED` - Pins `seed` (default: `config.toml`, else drawn from entropy)
    /// - `SNAKE_STEPS` - Overrides `max_steps` from `config.toml`
    /// - `SNAKE_TURNS` - Turn script, one of `U R D L -` per step, repeated
    /// - `SNAKE_SESSION_ID` - Log directory name (default: timestamp)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = env::var("SNAKE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(level) = env::var("SNAKE_LEVEL") {
            config.level = level;
        }
        config.seed = read_env::<u64>("SNAKE_SEED");
        config.max_steps = read_env::<u32>("SNAKE_STEPS");
        if let Ok(script) = env::var("SNAKE_TURNS") {
            config.turns = parse_turns(&script)?;
        }
        config.session_id = env::var("SNAKE_SESSION_ID").ok();

        Ok(config)
    }

    /// Applies the environment overrides on top of the loaded game config.
    pub fn apply(&self, game: &mut GameConfig) {
        if let Some(seed) = self.seed {
            game.seed = Some(seed);
        }
        if let Some(max_steps) = self.max_steps {
            game.max_steps = max_steps;
        }
    }

    /// Turn for step `index`; the script repeats.
    pub fn turn(&self, index: u32) -> Option<Direction> {
        if self.turns.is_empty() {
            return None;
        }
        self.turns[index as usize % self.turns.len()]
    }
}

/// Parses a turn script such as `UU-R--L`.
pub fn parse_turns(script: &str) -> Result<Vec<Option<Direction>>> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_ascii_uppercase() {
            'U' => Ok(Some(Direction::Up)),
            'R' => Ok(Some(Direction::Right)),
            'D' => Ok(Some(Direction::Down)),
            'L' => Ok(Some(Direction::Left)),
            '-' => Ok(None),
            other => Err(anyhow::anyhow!("Invalid turn '{}' in SNAKE_TURNS", other)),
        })
        .collect()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
