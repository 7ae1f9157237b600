//! Data-driven content definitions and loaders.
//!
//! This crate reads snake content from RON/TOML data files and binary word
//! streams:
//! - Behavior sets (RON, expressions written as keyword names)
//! - Behavior word streams (packed `u32` programs)
//! - Level layouts (RON run-length count maps)
//! - Game configuration (TOML)
//!
//! Every behavior is compiled while loading, so anything returned here is
//! ready to run. All loaders use snake-core types directly with serde for
//! RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BehaviorFile, BehaviorLoader, BehaviorSpec, BehaviorStreamLoader, BranchSpec, CommandSpec,
    ConfigLoader, ContentFactory, LevelLoader, LoadResult, parse_expression,
};
