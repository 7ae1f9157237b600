//! Headless simulation driver for the snake object-behavior engine.
//!
//! [`Simulation`] owns one snake on a [`LevelLayout`](snake_core::LevelLayout)
//! and advances it a cell at a time, running the behavior programs attached
//! to each cell it touches. Everything is synchronous and single-threaded;
//! the randomizer is the only source of nondeterminism and is injected by the
//! caller.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the step loop and run summaries
//! - [`error`] defines the failures surfaced while setting up a run
pub mod error;
pub mod simulation;

pub use error::{Result, RuntimeError};
pub use simulation::{RunSummary, Simulation, StepOutcome};
