//! Behavior compilation errors.
//!
//! Every error is produced while loading; the interpreter itself never fails.

use crate::error::{ErrorSeverity, SnakeError};

use super::keyword::Keyword;
use super::value::{ParameterKind, ValueKind};

/// Errors that reject an expression or a whole behavior program.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompileError {
    /// Expression has no words at all.
    #[error("expression is empty")]
    EmptyExpression,

    /// An operator found fewer values than it consumes.
    #[error("lack of value in the stack for {keyword} at word {position}")]
    StackUnderflow {
        keyword: Keyword,
        position: usize,
    },

    /// An operand has the wrong kind.
    #[error("{keyword} at word {position} expects {expected}, found {found}")]
    KindMismatch {
        keyword: Keyword,
        position: usize,
        expected: ValueKind,
        found: ValueKind,
    },

    /// `Equal` or `Select` operands disagree.
    #[error("{keyword} at word {position} compares {first} with {second}")]
    OperandKindMismatch {
        keyword: Keyword,
        position: usize,
        first: ValueKind,
        second: ValueKind,
    },

    /// A `Param*` keyword disagrees with the parameter kind fixed earlier.
    #[error(
        "parameter corruption at word {position}: program reads {established} but {requested} was requested"
    )]
    ParameterConflict {
        position: usize,
        established: ParameterKind,
        requested: ParameterKind,
    },

    /// The value left on top of the stack is missing or has the wrong kind.
    #[error("expression is invalid: expected {expected} result, found {}", .found.map_or("empty stack", <&'static str>::from))]
    InvalidResult {
        expected: ValueKind,
        found: Option<ValueKind>,
    },

    /// Condition, command and expression counts do not line up.
    #[error(
        "program shape mismatch: {conditions} conditions need {} commands and expressions, got {commands} and {expressions}",
        .conditions + 1
    )]
    ShapeMismatch {
        conditions: usize,
        commands: usize,
        expressions: usize,
    },

    /// Failure inside condition `index`.
    #[error("condition {index}: {source}")]
    InCondition {
        index: usize,
        source: Box<CompileError>,
    },

    /// Failure inside the modify expression of command `index`.
    #[error("command {index}: {source}")]
    InCommand {
        index: usize,
        source: Box<CompileError>,
    },
}

impl CompileError {
    pub(crate) fn in_condition(index: usize, source: CompileError) -> Self {
        CompileError::InCondition {
            index,
            source: Box::new(source),
        }
    }

    pub(crate) fn in_command(index: usize, source: CompileError) -> Self {
        CompileError::InCommand {
            index,
            source: Box::new(source),
        }
    }

    /// Innermost error, without branch wrappers.
    pub fn root(&self) -> &CompileError {
        match self {
            CompileError::InCondition { source, .. } | CompileError::InCommand { source, .. } => {
                source.root()
            }
            other => other,
        }
    }
}

impl SnakeError for CompileError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use CompileError::*;
        match self.root() {
            EmptyExpression => "COMPILE_EMPTY_EXPRESSION",
            StackUnderflow { .. } => "COMPILE_STACK_UNDERFLOW",
            KindMismatch { .. } => "COMPILE_KIND_MISMATCH",
            OperandKindMismatch { .. } => "COMPILE_OPERAND_KIND_MISMATCH",
            ParameterConflict { .. } => "COMPILE_PARAMETER_CONFLICT",
            InvalidResult { .. } => "COMPILE_INVALID_RESULT",
            ShapeMismatch { .. } => "COMPILE_SHAPE_MISMATCH",
            InCondition { .. } | InCommand { .. } => "COMPILE_NESTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_errors_report_their_root() {
        let error = CompileError::in_command(
            2,
            CompileError::InvalidResult {
                expected: ValueKind::Direction,
                found: None,
            },
        );
        assert_eq!(error.error_code(), "COMPILE_INVALID_RESULT");
        assert_eq!(error.severity(), ErrorSeverity::Validation);
        let message = error.to_string();
        assert!(message.starts_with("command 2: "), "{message}");
        assert!(message.contains("empty stack"), "{message}");
    }

    #[test]
    fn shape_message_counts_else_branch() {
        let error = CompileError::ShapeMismatch {
            conditions: 2,
            commands: 2,
            expressions: 3,
        };
        assert!(error.to_string().contains("need 3 commands"));
    }
}
