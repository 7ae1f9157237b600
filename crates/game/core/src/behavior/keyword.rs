//! Opcodes of the behavior expression language.

use super::value::{ParameterKind, ValueKind};

/// One opcode of a postfix behavior expression.
///
/// Expressions are sequences of `u32` words. A word in opcode position is
/// decoded with [`Keyword::from_word`]; [`Keyword::Int`] makes the following
/// word a literal that is pushed verbatim. Words that decode to no keyword
/// end the expression just like [`Keyword::ExpressionEnd`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Keyword {
    ExpressionEnd = 0,
    /// Next word is an integer literal.
    Int = 1,

    AccelerationDefault = 2,
    AccelerationDown = 3,
    AccelerationUp = 4,

    RandomAcceleration = 5,
    RandomDirection = 6,
    RandomDoubleDirection = 7,
    RandomCombinedDirection = 8,
    /// Replaces the top integer `n` with a random value in `[0, n]`.
    IntRandomValue = 9,

    SnakeAcceleration = 10,
    SnakeDirection = 11,
    PreviousSnakeDirection = 12,
    RememberedInt = 13,

    ParamAcceleration = 14,
    ParamDirection = 15,
    ParamDoubleDirection = 16,
    ParamCombinedDirection = 17,

    Not = 18,
    And = 19,
    Or = 20,
    Equal = 21,
    /// `a b cond Select` keeps `a` when `cond` is non-zero, else `b`.
    Select = 22,

    OppositeDirection = 23,
    OppositeAcceleration = 24,
    /// `double dir IsDirExitOfDoubleDir`
    IsDirExitOfDoubleDir = 25,
    /// `dir combined GetCombDirExit`
    GetCombDirExit = 26,

    IntAdd = 27,
    IntSubtract = 28,
    IntMultiply = 29,
    IntDivideAndFloor = 30,
    IntModulo = 31,
    IntMinus = 32,
    IntLess = 33,
    IntAddOverflow = 34,
    IntMultiplyOverflow = 35,

    IntBitAnd = 36,
    IntBitOr = 37,
    IntBitXor = 38,
    IntBitNot = 39,
    IntLogicalLeftShift = 40,
    IntLogicalRightShift = 41,
    IntCyclicLeftShift = 42,
    IntCyclicRightShift = 43,
    IntCountOfOnes = 44,

    DirectionUp = 45,
    DirectionRight = 46,
    DirectionDown = 47,
    DirectionLeft = 48,
}

impl Keyword {
    pub fn from_word(word: u32) -> Option<Self> {
        Self::from_repr(word)
    }

    pub const fn word(self) -> u32 {
        self as u32
    }

    /// Whether this keyword draws from the randomizer.
    pub const fn is_random(self) -> bool {
        matches!(
            self,
            Keyword::RandomAcceleration
                | Keyword::RandomDirection
                | Keyword::RandomDoubleDirection
                | Keyword::RandomCombinedDirection
                | Keyword::IntRandomValue
        )
    }

    /// Kind pushed by keywords that take nothing from the stack.
    pub const fn produced_kind(self) -> Option<ValueKind> {
        match self {
            Keyword::AccelerationDefault
            | Keyword::AccelerationDown
            | Keyword::AccelerationUp
            | Keyword::RandomAcceleration
            | Keyword::SnakeAcceleration
            | Keyword::ParamAcceleration => Some(ValueKind::Acceleration),
            Keyword::DirectionUp
            | Keyword::DirectionRight
            | Keyword::DirectionDown
            | Keyword::DirectionLeft
            | Keyword::RandomDirection
            | Keyword::SnakeDirection
            | Keyword::PreviousSnakeDirection
            | Keyword::ParamDirection => Some(ValueKind::Direction),
            Keyword::RandomDoubleDirection | Keyword::ParamDoubleDirection => {
                Some(ValueKind::DoubleDirection)
            }
            Keyword::RandomCombinedDirection | Keyword::ParamCombinedDirection => {
                Some(ValueKind::CombinedDirection)
            }
            Keyword::RememberedInt => Some(ValueKind::Integer),
            _ => None,
        }
    }

    /// Parameter interpretation claimed by the `Param*` keywords.
    pub const fn parameter_kind(self) -> Option<ParameterKind> {
        match self {
            Keyword::ParamAcceleration => Some(ParameterKind::Acceleration),
            Keyword::ParamDirection => Some(ParameterKind::Direction),
            Keyword::ParamDoubleDirection => Some(ParameterKind::DoubleDirection),
            Keyword::ParamCombinedDirection => Some(ParameterKind::CombinedDirection),
            _ => None,
        }
    }

    /// Integer operators with one operand.
    pub const fn is_unary_integer(self) -> bool {
        matches!(
            self,
            Keyword::Not | Keyword::IntBitNot | Keyword::IntCountOfOnes | Keyword::IntMinus
        )
    }

    /// Integer operators with two operands.
    pub const fn is_binary_integer(self) -> bool {
        matches!(
            self,
            Keyword::And
                | Keyword::Or
                | Keyword::IntAdd
                | Keyword::IntSubtract
                | Keyword::IntMultiply
                | Keyword::IntDivideAndFloor
                | Keyword::IntModulo
                | Keyword::IntLess
                | Keyword::IntAddOverflow
                | Keyword::IntMultiplyOverflow
                | Keyword::IntBitAnd
                | Keyword::IntBitOr
                | Keyword::IntBitXor
                | Keyword::IntLogicalLeftShift
                | Keyword::IntLogicalRightShift
                | Keyword::IntCyclicLeftShift
                | Keyword::IntCyclicRightShift
        )
    }
}
