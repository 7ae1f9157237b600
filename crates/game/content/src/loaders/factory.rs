//! Content factory for loading a complete data directory.

use std::path::{Path, PathBuf};

use snake_core::{BehaviorSet, GameConfig, LevelLayout};

use crate::loaders::{BehaviorLoader, ConfigLoader, LevelLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── behaviors.ron
/// └── levels/
///     └── arena.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load and compile the behavior set from `behaviors.ron`.
    pub fn load_behaviors(&self, config: &GameConfig) -> LoadResult<BehaviorSet> {
        let path = self.data_dir.join("behaviors.ron");
        BehaviorLoader::load(&path, config)
    }

    /// Load a level from `levels/{level_name}.ron`.
    pub fn load_level(&self, level_name: &str) -> LoadResult<LevelLayout> {
        let path = self
            .data_dir
            .join("levels")
            .join(format!("{}.ron", level_name));
        LevelLoader::load(&path)
    }

    /// Load a level together with a behavior set and check they fit each other.
    pub fn load_scenario(
        &self,
        level_name: &str,
        config: &GameConfig,
    ) -> LoadResult<(LevelLayout, BehaviorSet)> {
        let layout = self.load_level(level_name)?;
        let behaviors = self.load_behaviors(config)?;
        behaviors
            .validate_against(&layout)
            .map_err(|e| anyhow::anyhow!("Level '{}': {}", level_name, e))?;
        Ok((layout, behaviors))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_data_loads() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let config = factory.load_config().unwrap();
        let (layout, behaviors) = factory.load_scenario("arena", &config).unwrap();
        assert_eq!((layout.width, layout.height), (8, 6));
        assert_eq!(layout.item_spawns.len(), 2);
        assert_eq!(behaviors.programs.len(), 7);
        assert!(behaviors.pre_effect(1).is_some_and(|p| p.is_dangerous()));
    }

    #[test]
    fn scenario_with_unknown_effect_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("levels")).unwrap();
        std::fs::write(
            dir.path().join("behaviors.ron"),
            r#"(behaviors: [], pre_effects: [None, None])"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("levels/tiny.ron"),
            r#"(width: 2, height: 1, object_pairs: [2, 5], params: [2, 0], memory: [2, 0], snake_start: [2, 1])"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert!(factory.load_scenario("tiny", &GameConfig::default()).is_ok());

        std::fs::write(
            dir.path().join("behaviors.ron"),
            r#"(behaviors: [], pre_effects: [None, None, None, None, None, Some("wall")])"#,
        )
        .unwrap();
        assert!(factory.load_scenario("tiny", &GameConfig::default()).is_err());
    }

    #[test]
    fn missing_files_name_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        let error = factory.load_level("nowhere").unwrap_err();
        assert!(error.to_string().contains("nowhere.ron"));
    }
}
