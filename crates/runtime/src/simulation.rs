//! Cell-by-cell snake simulation.
//!
//! Each step moves the head one cell. The target cell's pre-effect decides
//! whether the snake may enter at all (it can kill or stop it); once inside,
//! the post-effect may redirect or accelerate the snake. Both programs see
//! the cell's parameter word and read/write the cell's memory word.
use snake_core::{
    Acceleration, BehaviorProgram, BehaviorSet, DIRECTION_COUNT, Direction, ExecutionArguments,
    ExecutionTarget, GameConfig, LevelLayout, PcgRandomizer, Randomizer,
};
use tracing::{debug, info};

use crate::error::{Result, RuntimeError};

/// Result of a single [`Simulation::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake was already dead; nothing happened.
    Dead,
    /// A behavior of `cell` killed the snake.
    Died { cell: usize },
    /// The pre-effect of `cell` held the snake in place for this step.
    Stopped { cell: usize },
    /// The head moved into `cell`.
    Moved { cell: usize },
}

/// Tally of a [`Simulation::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u32,
    pub moves: u32,
    pub stops: u32,
    pub died: bool,
    pub final_cell: usize,
}

#[derive(Clone, Copy, Debug)]
enum Effect {
    Pre,
    Post,
}

/// One snake on one level.
pub struct Simulation<R: Randomizer = PcgRandomizer> {
    layout: LevelLayout,
    behaviors: BehaviorSet,
    config: GameConfig,
    randomizer: R,
    target: ExecutionTarget,
    previous_direction: Option<Direction>,
    memory: Vec<u32>,
    head: usize,
    steps: u32,
}

impl Simulation<PcgRandomizer> {
    /// Builds a simulation driven by a PCG randomizer seeded from `config.seed`.
    ///
    /// An unpinned seed is drawn from entropy and written back into the
    /// config, so [`Simulation::seed`] can replay the run.
    pub fn seeded(
        layout: LevelLayout,
        behaviors: BehaviorSet,
        mut config: GameConfig,
    ) -> Result<Self> {
        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                debug!(seed, "drew seed from entropy");
                seed
            }
        };
        config.seed = Some(seed);
        info!(seed, "randomizer seeded");

        Self::new(layout, behaviors, config, PcgRandomizer::new(seed))
    }
}

impl<R: Randomizer> Simulation<R> {
    /// Places the snake on a cell drawn from the level's start table.
    ///
    /// The snake starts alive and moving, facing up at default acceleration,
    /// with no previous direction.
    pub fn new(
        layout: LevelLayout,
        behaviors: BehaviorSet,
        config: GameConfig,
        mut randomizer: R,
    ) -> Result<Self> {
        behaviors.validate_against(&layout)?;

        let head = layout
            .snake_start
            .pick(&mut randomizer)
            .ok_or(RuntimeError::NoSpawnCell)?;
        let (x, y) = layout.position_of(head);
        info!(head, x, y, "snake spawned");

        let memory = layout.memory.clone();
        Ok(Self {
            layout,
            behaviors,
            config,
            randomizer,
            target: ExecutionTarget::default(),
            previous_direction: None,
            memory,
            head,
            steps: 0,
        })
    }

    /// Advances the snake by one cell.
    ///
    /// `turn` replaces the current direction unless it points straight back
    /// along the previous move, in which case it is ignored.
    pub fn step(&mut self, turn: Option<Direction>) -> StepOutcome {
        if !self.target.alive {
            return StepOutcome::Dead;
        }
        self.steps += 1;

        if let Some(turn) = turn {
            if self.previous_direction.is_some_and(|previous| previous.opposite() == turn) {
                debug!(?turn, "ignored reversing turn");
            } else {
                self.target.snake_direction = turn;
            }
        }

        let direction = self.target.snake_direction;
        let cell = self.layout.step(self.head, direction);

        self.apply(Effect::Pre, cell);
        if !self.target.alive {
            info!(cell, step = self.steps, "snake died entering cell");
            return StepOutcome::Died { cell };
        }
        if !self.target.moving {
            self.target.moving = true;
            debug!(cell, "snake stopped");
            return StepOutcome::Stopped { cell };
        }

        self.head = cell;
        self.previous_direction = Some(direction);

        self.apply(Effect::Post, cell);
        if !self.target.alive {
            info!(cell, step = self.steps, "snake died inside cell");
            return StepOutcome::Died { cell };
        }

        debug!(
            cell,
            direction = %self.target.snake_direction,
            acceleration = %self.target.snake_acceleration,
            "snake moved"
        );
        StepOutcome::Moved { cell }
    }

    /// Runs up to `config.max_steps` steps, asking `turns` for the turn of
    /// each step. Stops early when the snake dies.
    pub fn run(&mut self, mut turns: impl FnMut(u32) -> Option<Direction>) -> RunSummary {
        let mut summary = RunSummary {
            final_cell: self.head,
            ..RunSummary::default()
        };

        for index in 0..self.config.max_steps {
            summary.steps += 1;
            match self.step(turns(index)) {
                StepOutcome::Moved { .. } => summary.moves += 1,
                StepOutcome::Stopped { .. } => summary.stops += 1,
                StepOutcome::Died { .. } | StepOutcome::Dead => {
                    summary.died = true;
                    break;
                }
            }
        }

        summary.final_cell = self.head;
        info!(
            steps = summary.steps,
            moves = summary.moves,
            stops = summary.stops,
            died = summary.died,
            "run finished"
        );
        summary
    }

    /// Picks a spawn cell for `item` from its weighted table.
    ///
    /// `Ok(None)` when the table has no positive weight.
    pub fn spawn_item(&mut self, item: usize) -> Result<Option<usize>> {
        let table = self
            .layout
            .item_spawns
            .get(item)
            .ok_or(RuntimeError::UnknownItem {
                item,
                available: self.layout.item_spawns.len(),
            })?;
        let cell = table.pick(&mut self.randomizer);
        debug!(item, ?cell, "item spawn picked");
        Ok(cell)
    }

    fn apply(&mut self, effect: Effect, cell: usize) {
        let pair = self.layout.object_pairs[cell];
        let program: Option<&BehaviorProgram> = match effect {
            Effect::Pre => self.behaviors.pre_effect(pair),
            Effect::Post => self.behaviors.post_effect(pair),
        };
        let Some(program) = program else {
            return;
        };

        self.target.remembered = self.memory[cell];
        let mut arguments = ExecutionArguments::new(&mut self.randomizer)
            .with_parameter(self.layout.params[cell])
            .with_previous_direction(self.previous_direction);
        program.activate(&mut self.target, &mut arguments);
        self.memory[cell] = self.target.remembered;

        debug!(?effect, cell, pair, alive = self.target.alive, "behavior applied");
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn head_position(&self) -> (u32, u32) {
        self.layout.position_of(self.head)
    }

    pub fn direction(&self) -> Direction {
        self.target.snake_direction
    }

    pub fn acceleration(&self) -> Acceleration {
        self.target.snake_acceleration
    }

    pub fn is_alive(&self) -> bool {
        self.target.alive
    }

    pub fn previous_direction(&self) -> Option<Direction> {
        self.previous_direction
    }

    /// Previous direction as the word programs read (`DIRECTION_COUNT` before the first move).
    pub fn previous_direction_word(&self) -> u32 {
        self.previous_direction
            .map_or(DIRECTION_COUNT, Direction::word)
    }

    pub fn memory(&self, cell: usize) -> Option<u32> {
        self.memory.get(cell).copied()
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Seed the run was started with, when known.
    pub fn seed(&self) -> Option<u64> {
        self.config.seed
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }
}
