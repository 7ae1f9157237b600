//! Deterministic rules of the snake object-behavior engine.
//!
//! `snake-core` holds everything that must behave identically on every
//! platform: the behavior bytecode (validator, interpreter, compiled
//! programs), the Fenwick-tree spawn tables, the seeded randomizer and the
//! level layout. It performs no I/O; loaders live in `snake-content` and the
//! step loop in `snake-runtime`.
pub mod behavior;
pub mod config;
pub mod error;
pub mod level;
pub mod rng;
pub mod weighted;

pub use behavior::{
    ACCELERATION_COUNT, Acceleration, AttributeStates, BehaviorProgram, BehaviorProperties,
    COMBINED_DIRECTION_COUNT, CombinedDirection, Command, CompileError, CompileParameters,
    DIRECTION_COUNT, DOUBLE_DIRECTION_COUNT, Direction, DoubleDirection, ExecutionArguments,
    ExecutionTarget, Keyword, ParameterKind, ValueKind, compute_expression, validate_expression,
};
pub use config::GameConfig;
pub use error::{ErrorSeverity, SnakeError};
pub use level::{BehaviorSet, LevelError, LevelLayout, LevelMaps, expand_count_map};
pub use rng::{PcgRandomizer, Randomizer};
pub use weighted::WeightedIndex;
