//! Compiled behavior programs.
//!
//! A program is an ordered list of guarded branches followed by an
//! unconditional fallback:
//!
//! ```text
//! if condition[0] { commands[0](modify[0]) }
//! else if condition[1] { commands[1](modify[1]) }
//! ...
//! else { commands[N](modify[N]) }
//! ```
//!
//! Compilation validates every expression up front; activation then runs
//! without any checks.

use bitflags::bitflags;

use super::command::Command;
use super::error::CompileError;
use super::interpret::{ExecutionArguments, ExecutionTarget, compute_expression};
use super::value::{Acceleration, Direction, ParameterKind, ValueKind};
use super::validate::{AttributeStates, validate_expression};

bitflags! {
    /// Facts about a program derived at compile time.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BehaviorProperties: u8 {
        /// Some command changes direction, acceleration or motion.
        const IMPACTS_SNAKE   = 1 << 0;
        /// Some command kills the snake.
        const IS_DANGEROUS    = 1 << 1;
        /// Some expression draws random values.
        const REQUIRES_RANDOM = 1 << 2;
    }
}

/// Raw program parts handed to [`BehaviorProgram::compile`].
#[derive(Clone, Copy, Debug)]
pub struct CompileParameters<'a> {
    pub conditions: &'a [Vec<u32>],
    pub commands: &'a [Command],
    pub modify_expressions: &'a [Vec<u32>],
}

/// A validated, immutable behavior program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorProgram {
    conditions: Vec<Vec<u32>>,
    commands: Vec<Command>,
    modify_expressions: Vec<Vec<u32>>,
    properties: BehaviorProperties,
    parameter_kind: ParameterKind,
}

impl BehaviorProgram {
    /// Validates all expressions and builds the program.
    ///
    /// Either every expression is accepted or nothing is built.
    pub fn compile(parameters: CompileParameters<'_>) -> Result<Self, CompileError> {
        let CompileParameters {
            conditions,
            commands,
            modify_expressions,
        } = parameters;

        if commands.len() != conditions.len() + 1 || modify_expressions.len() != commands.len() {
            return Err(CompileError::ShapeMismatch {
                conditions: conditions.len(),
                commands: commands.len(),
                expressions: modify_expressions.len(),
            });
        }

        let mut states = AttributeStates::default();
        let mut properties = BehaviorProperties::empty();

        for (index, condition) in conditions.iter().enumerate() {
            validate_expression(ValueKind::Integer, condition, &mut states)
                .map_err(|error| CompileError::in_condition(index, error))?;
        }

        for (index, (command, expression)) in commands.iter().zip(modify_expressions).enumerate() {
            if let Some(kind) = command.argument_kind() {
                validate_expression(kind, expression, &mut states)
                    .map_err(|error| CompileError::in_command(index, error))?;
            }
            if command.impacts_snake() {
                properties.insert(BehaviorProperties::IMPACTS_SNAKE);
            }
            if command.is_dangerous() {
                properties.insert(BehaviorProperties::IS_DANGEROUS);
            }
        }

        if states.requires_random {
            properties.insert(BehaviorProperties::REQUIRES_RANDOM);
        }

        Ok(Self {
            conditions: conditions.to_vec(),
            commands: commands.to_vec(),
            modify_expressions: modify_expressions.to_vec(),
            properties,
            parameter_kind: states.parameter_kind,
        })
    }

    pub fn properties(&self) -> BehaviorProperties {
        self.properties
    }

    pub fn impacts_snake(&self) -> bool {
        self.properties.contains(BehaviorProperties::IMPACTS_SNAKE)
    }

    pub fn is_dangerous(&self) -> bool {
        self.properties.contains(BehaviorProperties::IS_DANGEROUS)
    }

    pub fn requires_random(&self) -> bool {
        self.properties.contains(BehaviorProperties::REQUIRES_RANDOM)
    }

    /// Kind of the tile parameter this program reads.
    pub fn parameter_kind(&self) -> ParameterKind {
        self.parameter_kind
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Index of the branch that fires: the first true condition, else the fallback.
    pub fn select_branch(
        &self,
        target: &ExecutionTarget,
        arguments: &mut ExecutionArguments<'_>,
    ) -> usize {
        self.conditions
            .iter()
            .position(|condition| compute_expression(condition, target, arguments) != 0)
            .unwrap_or(self.conditions.len())
    }

    /// Runs the program against `target`.
    ///
    /// Conditions are evaluated in order and stop at the first non-zero one.
    /// The default (empty) program does nothing.
    pub fn activate(&self, target: &mut ExecutionTarget, arguments: &mut ExecutionArguments<'_>) {
        let branch = self.select_branch(target, arguments);
        let (Some(command), Some(expression)) =
            (self.commands.get(branch), self.modify_expressions.get(branch))
        else {
            return;
        };

        match command {
            Command::NoOp => {}
            Command::KillSnake => target.alive = false,
            Command::StopSnake => target.moving = false,
            Command::ModifyAcceleration => {
                let word = compute_expression(expression, target, arguments);
                if let Some(acceleration) = Acceleration::from_word(word) {
                    target.snake_acceleration = acceleration;
                }
            }
            Command::ModifyDirection => {
                let word = compute_expression(expression, target, arguments);
                if let Some(direction) = Direction::from_word(word) {
                    target.snake_direction = direction;
                }
            }
            Command::Remember => {
                target.remembered = compute_expression(expression, target, arguments);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::keyword::Keyword::{self, *};
    use crate::behavior::value::{ACCELERATION_COUNT, CombinedDirection, DIRECTION_COUNT};
    use crate::rng::{PcgRandomizer, Randomizer};

    struct NeverCalled;

    impl Randomizer for NeverCalled {
        fn get(&mut self, _least: u64, _greatest: u64) -> u64 {
            panic!("randomizer must not be used");
        }
    }

    fn words(keywords: &[Keyword]) -> Vec<u32> {
        keywords.iter().map(|k| k.word()).collect()
    }

    fn compile(
        conditions: &[Vec<u32>],
        commands: &[Command],
        modify_expressions: &[Vec<u32>],
    ) -> Result<BehaviorProgram, CompileError> {
        BehaviorProgram::compile(CompileParameters {
            conditions,
            commands,
            modify_expressions,
        })
    }

    #[test]
    fn first_true_condition_wins() {
        let program = compile(
            &[vec![SnakeDirection.word(), Int.word(), 2, Equal.word()]],
            &[Command::KillSnake, Command::NoOp],
            &[vec![], vec![]],
        )
        .unwrap();
        assert!(program.is_dangerous());
        assert!(!program.impacts_snake());

        let mut rng = NeverCalled;

        let mut target = ExecutionTarget {
            snake_direction: Direction::Down,
            ..ExecutionTarget::default()
        };
        program.activate(&mut target, &mut ExecutionArguments::new(&mut rng));
        assert!(!target.alive);

        let mut target = ExecutionTarget {
            snake_direction: Direction::Left,
            ..ExecutionTarget::default()
        };
        program.activate(&mut target, &mut ExecutionArguments::new(&mut rng));
        assert!(target.alive);
        assert_eq!(target, ExecutionTarget {
            snake_direction: Direction::Left,
            ..ExecutionTarget::default()
        });
    }

    #[test]
    fn down_facing_snake_speeds_up() {
        let program = compile(
            &[vec![SnakeDirection.word(), Int.word(), 2, Equal.word()]],
            &[Command::ModifyAcceleration, Command::NoOp],
            &[words(&[AccelerationUp]), vec![]],
        )
        .unwrap();
        let mut rng = NeverCalled;

        let mut target = ExecutionTarget {
            snake_direction: Direction::Down,
            ..ExecutionTarget::default()
        };
        program.activate(&mut target, &mut ExecutionArguments::new(&mut rng));
        assert_eq!(target.snake_acceleration, Acceleration::Up);

        let mut target = ExecutionTarget {
            snake_direction: Direction::Left,
            ..ExecutionTarget::default()
        };
        program.activate(&mut target, &mut ExecutionArguments::new(&mut rng));
        assert_eq!(target.snake_acceleration, Acceleration::Default);
    }

    #[test]
    fn kill_only_program_is_dangerous() {
        let program = compile(&[], &[Command::KillSnake], &[vec![]]).unwrap();
        assert!(program.is_dangerous());
        assert!(!program.impacts_snake());
        assert!(!program.requires_random());
        assert_eq!(program.parameter_kind(), ParameterKind::NoParameter);
    }

    #[test]
    fn later_conditions_are_skipped() {
        // second condition would draw from the randomizer
        let program = compile(
            &[
                words(&[RememberedInt]),
                [Int.word(), 1, IntRandomValue.word()].to_vec(),
            ],
            &[Command::StopSnake, Command::KillSnake, Command::NoOp],
            &[vec![], vec![], vec![]],
        )
        .unwrap();
        assert!(program.requires_random());

        let mut rng = NeverCalled;
        let mut target = ExecutionTarget {
            remembered: 1,
            ..ExecutionTarget::default()
        };
        program.activate(&mut target, &mut ExecutionArguments::new(&mut rng));
        assert!(!target.moving);
        assert!(target.alive);
    }

    #[test]
    fn parameter_driven_redirect() {
        let program = compile(
            &[],
            &[Command::ModifyDirection],
            &[words(&[ParamDirection])],
        )
        .unwrap();
        assert_eq!(program.parameter_kind(), ParameterKind::Direction);
        assert!(program.impacts_snake());

        let mut rng = NeverCalled;
        let mut target = ExecutionTarget::default();
        let mut arguments = ExecutionArguments::new(&mut rng).with_parameter(Direction::Left.word());
        program.activate(&mut target, &mut arguments);
        assert_eq!(target.snake_direction, Direction::Left);
    }

    #[test]
    fn combined_tube_routes_snake() {
        let program = compile(
            &[],
            &[Command::ModifyDirection],
            &[words(&[SnakeDirection, ParamCombinedDirection, GetCombDirExit])],
        )
        .unwrap();

        let mut rng = NeverCalled;
        let mut target = ExecutionTarget {
            snake_direction: Direction::Down,
            ..ExecutionTarget::default()
        };
        let mut arguments = ExecutionArguments::new(&mut rng)
            .with_parameter(CombinedDirection::UpRightDownLeft.word());
        program.activate(&mut target, &mut arguments);
        assert_eq!(target.snake_direction, Direction::Right);
    }

    #[test]
    fn remember_writes_tile_memory() {
        let program = compile(
            &[],
            &[Command::Remember],
            &[vec![RememberedInt.word(), Int.word(), 1, IntAdd.word()]],
        )
        .unwrap();
        let mut rng = NeverCalled;
        let mut target = ExecutionTarget::default();
        for _ in 0..3 {
            program.activate(&mut target, &mut ExecutionArguments::new(&mut rng));
        }
        assert_eq!(target.remembered, 3);
    }

    #[test]
    fn invalid_branch_rejects_whole_program() {
        let error = compile(
            &[words(&[RememberedInt]), words(&[SnakeDirection])],
            &[Command::NoOp, Command::NoOp, Command::NoOp],
            &[vec![], vec![], vec![]],
        )
        .unwrap_err();
        assert_eq!(
            error,
            CompileError::in_condition(
                1,
                CompileError::InvalidResult {
                    expected: ValueKind::Integer,
                    found: Some(ValueKind::Direction),
                }
            )
        );

        let error = compile(
            &[],
            &[Command::ModifyAcceleration],
            &[words(&[SnakeDirection])],
        )
        .unwrap_err();
        assert!(matches!(error, CompileError::InCommand { index: 0, .. }));
    }

    #[test]
    fn expressions_of_argumentless_commands_are_ignored() {
        let program = compile(&[], &[Command::KillSnake], &[words(&[IntAdd])]);
        assert!(program.is_ok());
    }

    #[test]
    fn parameter_conflict_spans_branches() {
        let error = compile(
            &[words(&[ParamDirection, SnakeDirection, Equal])],
            &[Command::NoOp, Command::ModifyAcceleration],
            &[vec![], words(&[ParamAcceleration])],
        )
        .unwrap_err();
        assert!(matches!(
            error.root(),
            CompileError::ParameterConflict {
                established: ParameterKind::Direction,
                requested: ParameterKind::Acceleration,
                ..
            }
        ));
    }

    #[test]
    fn shape_is_checked() {
        let error = compile(&[vec![]], &[Command::NoOp], &[vec![]]).unwrap_err();
        assert_eq!(
            error,
            CompileError::ShapeMismatch {
                conditions: 1,
                commands: 1,
                expressions: 1,
            }
        );
        let error = compile(&[], &[Command::NoOp], &[]).unwrap_err();
        assert!(matches!(error, CompileError::ShapeMismatch { .. }));
    }

    #[test]
    fn empty_program_does_nothing() {
        let program = BehaviorProgram::default();
        assert_eq!(program.properties(), BehaviorProperties::empty());
        let mut rng = NeverCalled;
        let mut target = ExecutionTarget::default();
        program.activate(&mut target, &mut ExecutionArguments::new(&mut rng));
        assert_eq!(target, ExecutionTarget::default());
    }

    #[test]
    fn random_programs_are_deterministic_per_seed() {
        let program = compile(
            &[[Int.word(), 1, IntRandomValue.word()].to_vec()],
            &[Command::ModifyDirection, Command::ModifyAcceleration],
            &[words(&[RandomDirection]), words(&[RandomAcceleration])],
        )
        .unwrap();

        let run = |seed| {
            let mut rng = PcgRandomizer::new(seed);
            let mut target = ExecutionTarget::default();
            let mut trace = Vec::new();
            for _ in 0..64 {
                program.activate(&mut target, &mut ExecutionArguments::new(&mut rng));
                trace.push((target.snake_direction, target.snake_acceleration));
            }
            trace
        };
        assert_eq!(run(11), run(11));
    }

    /// Every accepted expression of up to three keywords evaluates without
    /// underflow and yields a word of the validated kind.
    #[test]
    fn accepted_short_expressions_are_sound() {
        use strum::IntoEnumIterator;

        let keywords: Vec<Keyword> = Keyword::iter()
            .filter(|k| !matches!(k, ExpressionEnd | Int))
            .collect();
        let kinds = [
            (ValueKind::Integer, u32::MAX),
            (ValueKind::Direction, DIRECTION_COUNT),
            (ValueKind::Acceleration, ACCELERATION_COUNT),
        ];

        let mut rng = PcgRandomizer::new(3);
        let target = ExecutionTarget::default();
        let mut accepted = 0;

        let mut check = |expression: &[u32], rng: &mut PcgRandomizer| {
            for (kind, bound) in kinds {
                let mut states = AttributeStates::default();
                if validate_expression(kind, expression, &mut states).is_ok() {
                    accepted += 1;
                    // zero is a valid word of every parameter kind
                    let mut arguments = ExecutionArguments::new(&mut *rng)
                        .with_parameter(0)
                        .with_previous_direction(Some(Direction::Left));
                    let value = compute_expression(expression, &target, &mut arguments);
                    if kind != ValueKind::Integer {
                        assert!(value < bound, "{expression:?} produced {value}");
                    }
                }
            }
        };

        for a in &keywords {
            check(&[a.word()], &mut rng);
            for b in &keywords {
                check(&[a.word(), b.word()], &mut rng);
                for c in &keywords {
                    check(&[a.word(), b.word(), c.word()], &mut rng);
                }
            }
        }
        assert!(accepted > 0);
    }
}
