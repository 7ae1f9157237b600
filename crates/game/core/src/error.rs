//! Shared error classification for snake-core.
//!
//! Concrete errors live next to the code that raises them: `CompileError` in
//! `behavior`, `LevelError` in `level`. All of them are load-time errors;
//! once a behavior set and a level are accepted, stepping cannot fail.

/// How a caller should treat a failed load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The content is malformed; fix the data file and reload.
    ///
    /// Examples: ill-typed behavior expression, short count map
    Validation,

    /// Behaviors and level are individually valid but cannot run together.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }
}

/// Common interface of every snake-core error.
pub trait SnakeError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs, e.g. `COMPILE_KIND_MISMATCH`.
    ///
    /// Defaults to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
