//! Game configuration loader.

use std::path::Path;

use snake_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        tracing::debug!(seed = ?config.seed, max_steps = config.max_steps, "loaded config");

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let config = ConfigLoader::parse("seed = 99\n").unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.max_steps, GameConfig::DEFAULT_MAX_STEPS);
        assert!(config.respect_limits);
    }

    #[test]
    fn missing_seed_stays_unpinned() {
        let config = ConfigLoader::parse("max_steps = 12\n").unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.max_steps, 12);
    }

    #[test]
    fn malformed_config_is_reported() {
        let error = ConfigLoader::parse("seed = \"abc\"").unwrap_err();
        assert!(error.to_string().contains("config TOML"));
    }
}
