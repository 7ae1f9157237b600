//! Level layout loader.
//!
//! Levels are RON files holding run-length count maps; see
//! [`LevelMaps`] for the fields.

use std::path::Path;

use snake_core::{LevelLayout, LevelMaps};

use crate::loaders::{LoadResult, read_file};

/// Loader for level layouts from RON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load a level from a RON file and expand its count maps.
    pub fn load(path: &Path) -> LoadResult<LevelLayout> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<LevelLayout> {
        let maps: LevelMaps = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level RON: {}", e))?;
        let layout = LevelLayout::from_count_maps(&maps)
            .map_err(|e| anyhow::anyhow!("Invalid level layout: {}", e))?;
        tracing::debug!(
            width = layout.width,
            height = layout.height,
            items = layout.item_spawns.len(),
            "loaded level"
        );
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_expands_count_maps() {
        let content = r#"(
            width: 4,
            height: 2,
            object_pairs: [4, 1, 4, 0],
            params: [8, 0],
            memory: [8, 0],
            snake_start: [5, 0, 1, 1, 2, 0],
            item_spawns: [[4, 0, 4, 1]],
        )"#;
        let layout = LevelLoader::parse(content).unwrap();
        assert_eq!(layout.area(), 8);
        assert_eq!(layout.object_pairs[..4], [1, 1, 1, 1]);
        assert_eq!(layout.snake_start.rank_query(0), Some(5));
        assert_eq!(layout.item_spawns[0].total(), 4);
    }

    #[test]
    fn short_count_map_is_rejected() {
        let content = r#"(
            width: 4,
            height: 2,
            object_pairs: [4, 1],
            params: [8, 0],
            memory: [8, 0],
            snake_start: [8, 1],
        )"#;
        let error = LevelLoader::parse(content).unwrap_err();
        assert!(error.to_string().contains("object pair"), "{error}");
    }
}
