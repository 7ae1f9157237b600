//! Content loaders for reading game data from files.
//!
//! Text formats go through serde (`ron`, `toml`); behavior word streams are
//! decoded by hand. Every loader returns [`LoadResult`] with the offending
//! file or behavior named in the error.

pub mod behaviors;
pub mod config;
pub mod expression;
pub mod factory;
pub mod level;
pub mod stream;

pub use behaviors::{BehaviorFile, BehaviorLoader, BehaviorSpec, BranchSpec, CommandSpec};
pub use config::ConfigLoader;
pub use expression::parse_expression;
pub use factory::ContentFactory;
pub use level::LevelLoader;
pub use stream::BehaviorStreamLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

pub(crate) fn read_bytes(path: &Path) -> LoadResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
