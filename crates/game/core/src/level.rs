//! Level layout: per-cell object pairs, parameters, memory and spawn tables.
//!
//! Levels are stored as run-length "count maps": flat `(count, value)` pairs
//! that expand row by row into exactly `width * height` cells.

use crate::behavior::{BehaviorProgram, Direction, ParameterKind};
use crate::error::{ErrorSeverity, SnakeError};
use crate::weighted::WeightedIndex;

/// Errors raised while assembling a level.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("level has zero area ({width}x{height})")]
    EmptyArea { width: u32, height: u32 },

    #[error("{map} count map has an odd number of words ({len})")]
    UnpairedCountMap { map: &'static str, len: usize },

    #[error("{map} count map covers {covered} cells, level has {area}")]
    CountMapLength {
        map: &'static str,
        covered: u64,
        area: usize,
    },

    #[error("object pair {pair} at cell {cell} refers to behavior {behavior}, only {available} loaded")]
    UnknownBehavior {
        pair: u32,
        cell: usize,
        behavior: u32,
        available: usize,
    },

    #[error("cell {cell} holds parameter {word}, not a valid {kind}")]
    ParameterOutOfRange {
        cell: usize,
        kind: ParameterKind,
        word: u32,
    },
}

impl SnakeError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            LevelError::UnknownBehavior { .. } => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            LevelError::EmptyArea { .. } => "LEVEL_EMPTY_AREA",
            LevelError::UnpairedCountMap { .. } => "LEVEL_UNPAIRED_COUNT_MAP",
            LevelError::CountMapLength { .. } => "LEVEL_COUNT_MAP_LENGTH",
            LevelError::UnknownBehavior { .. } => "LEVEL_UNKNOWN_BEHAVIOR",
            LevelError::ParameterOutOfRange { .. } => "LEVEL_PARAMETER_OUT_OF_RANGE",
        }
    }
}

/// Expands run-length `(count, value)` pairs into exactly `area` cells.
pub fn expand_count_map(
    map: &'static str,
    pairs: &[u32],
    area: usize,
) -> Result<Vec<u32>, LevelError> {
    if pairs.len() % 2 != 0 {
        return Err(LevelError::UnpairedCountMap {
            map,
            len: pairs.len(),
        });
    }

    let covered: u64 = pairs.chunks_exact(2).map(|pair| u64::from(pair[0])).sum();
    if covered != area as u64 {
        return Err(LevelError::CountMapLength { map, covered, area });
    }

    let mut cells = Vec::with_capacity(area);
    for pair in pairs.chunks_exact(2) {
        cells.extend(std::iter::repeat_n(pair[1], pair[0] as usize));
    }
    Ok(cells)
}

/// Raw count maps of one level, as stored in level files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelMaps {
    pub width: u32,
    pub height: u32,
    /// Object pair index per cell; selects pre- and post-effects.
    pub object_pairs: Vec<u32>,
    /// Parameter word per cell, read by `Param*` keywords.
    pub params: Vec<u32>,
    /// Initial memory word per cell.
    pub memory: Vec<u32>,
    /// Spawn weight of the snake head per cell.
    pub snake_start: Vec<u32>,
    /// One spawn weight map per item kind.
    #[cfg_attr(feature = "serde", serde(default))]
    pub item_spawns: Vec<Vec<u32>>,
}

/// Expanded level, ready for simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelLayout {
    pub width: u32,
    pub height: u32,
    pub object_pairs: Vec<u32>,
    pub params: Vec<u32>,
    pub memory: Vec<u32>,
    pub snake_start: WeightedIndex,
    pub item_spawns: Vec<WeightedIndex>,
}

impl LevelLayout {
    pub fn from_count_maps(maps: &LevelMaps) -> Result<Self, LevelError> {
        let area = maps.width as usize * maps.height as usize;
        if area == 0 {
            return Err(LevelError::EmptyArea {
                width: maps.width,
                height: maps.height,
            });
        }

        let item_spawns = maps
            .item_spawns
            .iter()
            .map(|pairs| expand_count_map("item", pairs, area).map(|w| WeightedIndex::new(&w)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            width: maps.width,
            height: maps.height,
            object_pairs: expand_count_map("object pair", &maps.object_pairs, area)?,
            params: expand_count_map("param", &maps.params, area)?,
            memory: expand_count_map("memory", &maps.memory, area)?,
            snake_start: WeightedIndex::new(&expand_count_map(
                "snake start",
                &maps.snake_start,
                area,
            )?),
            item_spawns,
        })
    }

    pub fn area(&self) -> usize {
        self.object_pairs.len()
    }

    pub fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn position_of(&self, cell: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((cell % width) as u32, (cell / width) as u32)
    }

    /// Cell reached by one step from `cell`; edges wrap around.
    pub fn step(&self, cell: usize, direction: Direction) -> usize {
        let (x, y) = self.position_of(cell);
        let (dx, dy) = direction.delta();
        let x = (i64::from(x) + dx).rem_euclid(i64::from(self.width)) as u32;
        let y = (i64::from(y) + dy).rem_euclid(i64::from(self.height)) as u32;
        self.index_of(x, y)
    }
}

/// Compiled programs plus the object-pair tables that select them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BehaviorSet {
    pub programs: Vec<BehaviorProgram>,
    /// Program run before the snake enters a cell, per object pair.
    pub pre_effects: Vec<Option<u32>>,
    /// Program run after the snake entered a cell, per object pair.
    pub post_effects: Vec<Option<u32>>,
}

impl BehaviorSet {
    pub fn pre_effect(&self, pair: u32) -> Option<&BehaviorProgram> {
        Self::lookup(&self.programs, &self.pre_effects, pair)
    }

    pub fn post_effect(&self, pair: u32) -> Option<&BehaviorProgram> {
        Self::lookup(&self.programs, &self.post_effects, pair)
    }

    fn lookup<'a>(
        programs: &'a [BehaviorProgram],
        table: &[Option<u32>],
        pair: u32,
    ) -> Option<&'a BehaviorProgram> {
        let behavior = table.get(pair as usize).copied().flatten()?;
        programs.get(behavior as usize)
    }

    /// Checks that every object pair used by `layout` maps to loaded programs
    /// and that each program reading a parameter finds a decodable word.
    pub fn validate_against(&self, layout: &LevelLayout) -> Result<(), LevelError> {
        for (cell, &pair) in layout.object_pairs.iter().enumerate() {
            for table in [&self.pre_effects, &self.post_effects] {
                let Some(behavior) = table.get(pair as usize).copied().flatten() else {
                    continue;
                };
                let Some(program) = self.programs.get(behavior as usize) else {
                    return Err(LevelError::UnknownBehavior {
                        pair,
                        cell,
                        behavior,
                        available: self.programs.len(),
                    });
                };

                let kind = program.parameter_kind();
                let word = layout.params[cell];
                if !kind.accepts(word) {
                    return Err(LevelError::ParameterOutOfRange { cell, kind, word });
                }
            }
        }
        Ok(())
    }
}
