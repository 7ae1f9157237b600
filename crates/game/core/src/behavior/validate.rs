//! Static stack-kind checker for behavior expressions.
//!
//! The validator runs the expression once over [`ValueKind`] tags instead of
//! values. Anything it accepts can be evaluated by
//! [`compute_expression`](super::interpret::compute_expression) without
//! underflowing the stack, and the value left on top has the expected kind.

use super::error::CompileError;
use super::keyword::Keyword;
use super::value::{ParameterKind, ValueKind};

/// Facts collected across every expression of one program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttributeStates {
    /// Some expression draws from the randomizer.
    pub requires_random: bool,
    /// Kind fixed by the first `Param*` keyword of the program.
    pub parameter_kind: ParameterKind,
}

impl AttributeStates {
    fn claim_parameter(
        &mut self,
        requested: ParameterKind,
        position: usize,
    ) -> Result<(), CompileError> {
        match self.parameter_kind {
            ParameterKind::NoParameter => {
                self.parameter_kind = requested;
                Ok(())
            }
            established if established == requested => Ok(()),
            established => Err(CompileError::ParameterConflict {
                position,
                established,
                requested,
            }),
        }
    }
}

/// Kind stack with operand checks that report the failing keyword.
struct KindStack {
    kinds: Vec<ValueKind>,
}

impl KindStack {
    fn pop(&mut self, keyword: Keyword, position: usize) -> Result<ValueKind, CompileError> {
        self.kinds
            .pop()
            .ok_or(CompileError::StackUnderflow { keyword, position })
    }

    fn pop_kind(
        &mut self,
        expected: ValueKind,
        keyword: Keyword,
        position: usize,
    ) -> Result<(), CompileError> {
        let found = self.pop(keyword, position)?;
        if found != expected {
            return Err(CompileError::KindMismatch {
                keyword,
                position,
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Pops two operands that must share a kind and returns it.
    fn pop_pair(&mut self, keyword: Keyword, position: usize) -> Result<ValueKind, CompileError> {
        let second = self.pop(keyword, position)?;
        let first = self.pop(keyword, position)?;
        if first != second {
            return Err(CompileError::OperandKindMismatch {
                keyword,
                position,
                first,
                second,
            });
        }
        Ok(first)
    }

    fn push(&mut self, kind: ValueKind) {
        self.kinds.push(kind);
    }
}

/// Checks that `expression` leaves a value of kind `expected` on top.
///
/// Scanning stops at [`Keyword::ExpressionEnd`], at any word that is not a
/// keyword, or at the end of the buffer. Values below the top are allowed.
pub fn validate_expression(
    expected: ValueKind,
    expression: &[u32],
    states: &mut AttributeStates,
) -> Result<(), CompileError> {
    if expression.is_empty() {
        return Err(CompileError::EmptyExpression);
    }

    let mut stack = KindStack { kinds: Vec::new() };
    let mut literal_next = false;

    for (position, &word) in expression.iter().enumerate() {
        if literal_next {
            stack.push(ValueKind::Integer);
            literal_next = false;
            continue;
        }

        let Some(keyword) = Keyword::from_word(word) else {
            break;
        };

        if keyword.is_random() {
            states.requires_random = true;
        }

        match keyword {
            Keyword::ExpressionEnd => break,
            Keyword::Int => literal_next = true,

            Keyword::IntRandomValue => {
                stack.pop_kind(ValueKind::Integer, keyword, position)?;
                stack.push(ValueKind::Integer);
            }

            Keyword::Equal => {
                let second = stack.pop(keyword, position)?;
                let first = stack.pop(keyword, position)?;
                // Integer operands compare as raw words against any kind
                let raw = first == ValueKind::Integer || second == ValueKind::Integer;
                if first != second && !raw {
                    return Err(CompileError::OperandKindMismatch {
                        keyword,
                        position,
                        first,
                        second,
                    });
                }
                stack.push(ValueKind::Integer);
            }
            Keyword::Select => {
                stack.pop_kind(ValueKind::Integer, keyword, position)?;
                let kind = stack.pop_pair(keyword, position)?;
                stack.push(kind);
            }

            Keyword::OppositeDirection => {
                stack.pop_kind(ValueKind::Direction, keyword, position)?;
                stack.push(ValueKind::Direction);
            }
            Keyword::OppositeAcceleration => {
                stack.pop_kind(ValueKind::Acceleration, keyword, position)?;
                stack.push(ValueKind::Acceleration);
            }
            Keyword::IsDirExitOfDoubleDir => {
                stack.pop_kind(ValueKind::Direction, keyword, position)?;
                stack.pop_kind(ValueKind::DoubleDirection, keyword, position)?;
                stack.push(ValueKind::Integer);
            }
            Keyword::GetCombDirExit => {
                stack.pop_kind(ValueKind::CombinedDirection, keyword, position)?;
                stack.pop_kind(ValueKind::Direction, keyword, position)?;
                stack.push(ValueKind::Direction);
            }

            _ if keyword.is_unary_integer() => {
                stack.pop_kind(ValueKind::Integer, keyword, position)?;
                stack.push(ValueKind::Integer);
            }
            _ if keyword.is_binary_integer() => {
                stack.pop_kind(ValueKind::Integer, keyword, position)?;
                stack.pop_kind(ValueKind::Integer, keyword, position)?;
                stack.push(ValueKind::Integer);
            }

            // every remaining keyword only pushes
            _ => {
                if let Some(parameter) = keyword.parameter_kind() {
                    states.claim_parameter(parameter, position)?;
                }
                if let Some(kind) = keyword.produced_kind() {
                    stack.push(kind);
                }
            }
        }
    }

    match stack.kinds.last() {
        Some(kind) if *kind == expected => Ok(()),
        found => Err(CompileError::InvalidResult {
            expected,
            found: found.copied(),
        }),
    }
}
