//! Object behavior bytecode.
//!
//! Tiles carry small postfix programs that decide what happens to the snake
//! when it enters them. Loading goes through two phases:
//!
//! - `validate`: a static pass over value kinds that rejects ill-typed
//!   expressions and records program attributes
//! - `interpret`: an unchecked evaluator that trusts the first phase
//!
//! [`BehaviorProgram`] ties both together: `compile` validates every
//! condition and modify expression, `activate` runs the first branch whose
//! condition holds.
//!
//! # Module Structure
//!
//! - `value`: runtime value domain (directions, accelerations, tubes)
//! - `keyword`: opcode set
//! - `command`: branch effects
//! - `error`: compile errors

pub mod command;
pub mod error;
pub mod interpret;
pub mod keyword;
pub mod program;
pub mod validate;
pub mod value;

pub use command::Command;
pub use error::CompileError;
pub use interpret::{ExecutionArguments, ExecutionTarget, compute_expression};
pub use keyword::Keyword;
pub use program::{BehaviorProgram, BehaviorProperties, CompileParameters};
pub use validate::{AttributeStates, validate_expression};
pub use value::{
    ACCELERATION_COUNT, Acceleration, COMBINED_DIRECTION_COUNT, CombinedDirection,
    DIRECTION_COUNT, DOUBLE_DIRECTION_COUNT, Direction, DoubleDirection, ParameterKind, ValueKind,
};
