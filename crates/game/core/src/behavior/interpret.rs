//! Runtime evaluator for validated behavior expressions.
//!
//! Values are bare `u32` words. The validator has already proven that every
//! operator finds enough operands of the right kind, so evaluation performs
//! no checks of its own. Feeding an expression that was never validated is a
//! logic error and may panic.

use crate::rng::Randomizer;

use super::keyword::Keyword;
use super::value::{
    ACCELERATION_COUNT, Acceleration, COMBINED_DIRECTION_COUNT, CombinedDirection,
    DIRECTION_COUNT, DOUBLE_DIRECTION_COUNT, Direction, DoubleDirection,
};

/// Snake and tile state a behavior program reads and mutates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionTarget {
    pub alive: bool,
    pub moving: bool,
    pub snake_acceleration: Acceleration,
    pub snake_direction: Direction,
    /// Memory word of the tile being evaluated.
    pub remembered: u32,
}

impl Default for ExecutionTarget {
    fn default() -> Self {
        Self {
            alive: true,
            moving: true,
            snake_acceleration: Acceleration::Default,
            snake_direction: Direction::Up,
            remembered: 0,
        }
    }
}

/// Read-only inputs of one activation plus the random source.
pub struct ExecutionArguments<'a> {
    pub randomizer: &'a mut dyn Randomizer,
    /// `None` before the snake has made its first move.
    pub previous_snake_direction: Option<Direction>,
    /// Parameter word of the tile being evaluated.
    pub parameter: u32,
}

impl<'a> ExecutionArguments<'a> {
    pub fn new(randomizer: &'a mut dyn Randomizer) -> Self {
        Self {
            randomizer,
            previous_snake_direction: None,
            parameter: 0,
        }
    }

    pub fn with_parameter(mut self, parameter: u32) -> Self {
        self.parameter = parameter;
        self
    }

    pub fn with_previous_direction(mut self, direction: Option<Direction>) -> Self {
        self.previous_snake_direction = direction;
        self
    }

    fn draw(&mut self, count: u32) -> u32 {
        self.randomizer.get(0, u64::from(count - 1)) as u32
    }

    fn previous_direction_word(&self) -> u32 {
        self.previous_snake_direction
            .map_or(DIRECTION_COUNT, Direction::word)
    }
}

fn flag(value: bool) -> u32 {
    u32::from(value)
}

fn binary(keyword: Keyword, lhs: u32, rhs: u32) -> u32 {
    match keyword {
        Keyword::And => flag(lhs != 0 && rhs != 0),
        Keyword::Or => flag(lhs != 0 || rhs != 0),
        Keyword::IntAdd => lhs.wrapping_add(rhs),
        Keyword::IntSubtract => lhs.wrapping_sub(rhs),
        Keyword::IntMultiply => lhs.wrapping_mul(rhs),
        Keyword::IntDivideAndFloor => lhs.checked_div(rhs).unwrap_or(0),
        Keyword::IntModulo => lhs.checked_rem(rhs).unwrap_or(0),
        Keyword::IntLess => flag(lhs < rhs),
        Keyword::IntAddOverflow => flag(lhs.checked_add(rhs).is_none()),
        Keyword::IntMultiplyOverflow => flag(u64::from(lhs) * u64::from(rhs) > u64::from(u32::MAX)),
        Keyword::IntBitAnd => lhs & rhs,
        Keyword::IntBitOr => lhs | rhs,
        Keyword::IntBitXor => lhs ^ rhs,
        Keyword::IntLogicalLeftShift => lhs.checked_shl(rhs).unwrap_or(0),
        Keyword::IntLogicalRightShift => lhs.checked_shr(rhs).unwrap_or(0),
        Keyword::IntCyclicLeftShift => lhs.rotate_left(rhs % u32::BITS),
        Keyword::IntCyclicRightShift => lhs.rotate_right(rhs % u32::BITS),
        _ => unreachable!("{keyword} is not a binary integer operator"),
    }
}

fn unary(keyword: Keyword, value: u32) -> u32 {
    match keyword {
        Keyword::Not => flag(value == 0),
        Keyword::IntBitNot => !value,
        Keyword::IntCountOfOnes => value.count_ones(),
        Keyword::IntMinus => u32::MAX - value,
        _ => unreachable!("{keyword} is not a unary integer operator"),
    }
}

/// Evaluates `expression` and returns the word left on top of the stack.
///
/// The expression must have passed
/// [`validate_expression`](super::validate::validate_expression).
pub fn compute_expression(
    expression: &[u32],
    target: &ExecutionTarget,
    arguments: &mut ExecutionArguments<'_>,
) -> u32 {
    let mut stack: Vec<u32> = Vec::with_capacity(8);
    let mut words = expression.iter().copied();

    while let Some(word) = words.next() {
        let Some(keyword) = Keyword::from_word(word) else {
            break;
        };

        let value = match keyword {
            Keyword::ExpressionEnd => break,
            Keyword::Int => match words.next() {
                Some(literal) => literal,
                None => break,
            },

            Keyword::AccelerationDefault => Acceleration::Default.word(),
            Keyword::AccelerationDown => Acceleration::Down.word(),
            Keyword::AccelerationUp => Acceleration::Up.word(),
            Keyword::DirectionUp => Direction::Up.word(),
            Keyword::DirectionRight => Direction::Right.word(),
            Keyword::DirectionDown => Direction::Down.word(),
            Keyword::DirectionLeft => Direction::Left.word(),

            Keyword::RandomAcceleration => arguments.draw(ACCELERATION_COUNT),
            Keyword::RandomDirection => arguments.draw(DIRECTION_COUNT),
            Keyword::RandomDoubleDirection => arguments.draw(DOUBLE_DIRECTION_COUNT),
            Keyword::RandomCombinedDirection => arguments.draw(COMBINED_DIRECTION_COUNT),
            Keyword::IntRandomValue => {
                let bound = pop(&mut stack);
                arguments.randomizer.get(0, u64::from(bound)) as u32
            }

            Keyword::SnakeAcceleration => target.snake_acceleration.word(),
            Keyword::SnakeDirection => target.snake_direction.word(),
            Keyword::PreviousSnakeDirection => arguments.previous_direction_word(),
            Keyword::RememberedInt => target.remembered,

            Keyword::ParamAcceleration
            | Keyword::ParamDirection
            | Keyword::ParamDoubleDirection
            | Keyword::ParamCombinedDirection => arguments.parameter,

            Keyword::Equal => {
                let rhs = pop(&mut stack);
                let lhs = pop(&mut stack);
                flag(lhs == rhs)
            }
            Keyword::Select => {
                let selector = pop(&mut stack);
                let otherwise = pop(&mut stack);
                let chosen = pop(&mut stack);
                if selector != 0 { chosen } else { otherwise }
            }

            Keyword::OppositeDirection => {
                let word = pop(&mut stack);
                Direction::from_word(word).map_or(word, |d| d.opposite().word())
            }
            Keyword::OppositeAcceleration => {
                let word = pop(&mut stack);
                Acceleration::from_word(word).map_or(word, |a| a.opposite().word())
            }
            Keyword::IsDirExitOfDoubleDir => {
                let direction = pop(&mut stack);
                let tube = pop(&mut stack);
                let is_exit = DoubleDirection::from_word(tube)
                    .zip(Direction::from_word(direction))
                    .is_some_and(|(tube, direction)| tube.is_exit(direction));
                flag(is_exit)
            }
            Keyword::GetCombDirExit => {
                let combined = pop(&mut stack);
                let direction = pop(&mut stack);
                match (
                    CombinedDirection::from_word(combined),
                    Direction::from_word(direction),
                ) {
                    (Some(combined), Some(moving)) => combined.exit(moving).word(),
                    _ => direction,
                }
            }

            _ if keyword.is_unary_integer() => {
                let value = pop(&mut stack);
                unary(keyword, value)
            }
            _ => {
                let rhs = pop(&mut stack);
                let lhs = pop(&mut stack);
                binary(keyword, lhs, rhs)
            }
        };
        stack.push(value);
    }

    debug_assert!(!stack.is_empty(), "expression left no value");
    stack.last().copied().unwrap_or_default()
}

#[inline]
fn pop(stack: &mut Vec<u32>) -> u32 {
    debug_assert!(!stack.is_empty(), "operand stack underflow");
    stack.pop().unwrap_or_default()
}
