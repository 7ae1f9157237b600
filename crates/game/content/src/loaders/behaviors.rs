//! Behavior set loader.
//!
//! Loads named behavior programs and the object-pair effect tables from RON.
//!
//! Example:
//! ```ron
//! (
//!     behaviors: [
//!         (
//!             name: "wall",
//!             otherwise: (command: KillSnake),
//!         ),
//!         (
//!             name: "rotor",
//!             otherwise: (command: ModifyDirection, expression: "ParamDirection"),
//!         ),
//!     ],
//!     pre_effects: [None, Some("wall")],
//!     post_effects: [None, None, Some("rotor")],
//! )
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use snake_core::{BehaviorProgram, BehaviorSet, Command, CompileParameters, GameConfig};

use crate::loaders::{LoadResult, parse_expression, read_file};

/// Command plus its modify expression in text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub command: Command,
    #[serde(default)]
    pub expression: String,
}

/// One guarded branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSpec {
    pub condition: String,
    pub command: Command,
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorSpec {
    pub name: String,
    #[serde(default)]
    pub branches: Vec<BranchSpec>,
    pub otherwise: CommandSpec,
}

impl BehaviorSpec {
    /// Parses every expression and compiles the program.
    pub fn compile(&self, config: &GameConfig) -> LoadResult<BehaviorProgram> {
        let context = |e: anyhow::Error| anyhow::anyhow!("Behavior '{}': {}", self.name, e);

        let mut conditions = Vec::with_capacity(self.branches.len());
        let mut commands = Vec::with_capacity(self.branches.len() + 1);
        let mut modify_expressions = Vec::with_capacity(self.branches.len() + 1);

        for branch in &self.branches {
            conditions.push(parse_expression(&branch.condition).map_err(context)?);
            commands.push(branch.command);
            modify_expressions.push(parse_expression(&branch.expression).map_err(context)?);
        }
        commands.push(self.otherwise.command);
        modify_expressions.push(parse_expression(&self.otherwise.expression).map_err(context)?);

        let longest = conditions
            .iter()
            .chain(&modify_expressions)
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        if let Some(limit) = config.exceeded_limit(conditions.len(), longest) {
            anyhow::bail!("Behavior '{}' exceeds {}", self.name, limit);
        }

        BehaviorProgram::compile(CompileParameters {
            conditions: &conditions,
            commands: &commands,
            modify_expressions: &modify_expressions,
        })
        .map_err(|e| anyhow::anyhow!("Behavior '{}' failed to compile: {}", self.name, e))
    }
}

/// Top-level layout of `behaviors.ron`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorFile {
    pub behaviors: Vec<BehaviorSpec>,
    /// Behavior name per object pair, run before the snake enters the cell.
    #[serde(default)]
    pub pre_effects: Vec<Option<String>>,
    /// Behavior name per object pair, run after the snake entered the cell.
    #[serde(default)]
    pub post_effects: Vec<Option<String>>,
}

impl BehaviorFile {
    /// Compiles every behavior and resolves effect names to program indices.
    pub fn build(&self, config: &GameConfig) -> LoadResult<BehaviorSet> {
        if config.respect_limits && self.behaviors.len() > GameConfig::MAX_BEHAVIORS {
            anyhow::bail!(
                "Behavior file defines {} behaviors, limit is {}",
                self.behaviors.len(),
                GameConfig::MAX_BEHAVIORS
            );
        }

        let mut by_name = HashMap::with_capacity(self.behaviors.len());
        let mut programs = Vec::with_capacity(self.behaviors.len());
        for (index, spec) in self.behaviors.iter().enumerate() {
            if by_name.insert(spec.name.as_str(), index as u32).is_some() {
                anyhow::bail!("Duplicate behavior name '{}'", spec.name);
            }
            let program = spec.compile(config)?;
            tracing::debug!(
                name = %spec.name,
                conditions = program.condition_count(),
                properties = ?program.properties(),
                "compiled behavior"
            );
            programs.push(program);
        }

        let resolve = |table: &[Option<String>]| -> LoadResult<Vec<Option<u32>>> {
            table
                .iter()
                .map(|entry| match entry {
                    None => Ok(None),
                    Some(name) => by_name
                        .get(name.as_str())
                        .copied()
                        .map(Some)
                        .ok_or_else(|| anyhow::anyhow!("Effect refers to unknown behavior '{}'", name)),
                })
                .collect()
        };

        Ok(BehaviorSet {
            pre_effects: resolve(&self.pre_effects)?,
            post_effects: resolve(&self.post_effects)?,
            programs,
        })
    }
}

/// Loader for behavior sets from RON files.
pub struct BehaviorLoader;

impl BehaviorLoader {
    /// Load and compile a behavior set from a RON file.
    pub fn load(path: &Path, config: &GameConfig) -> LoadResult<BehaviorSet> {
        let content = read_file(path)?;
        Self::parse(&content, config)
    }

    pub fn parse(content: &str, config: &GameConfig) -> LoadResult<BehaviorSet> {
        let file: BehaviorFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse behaviors RON: {}", e))?;
        let set = file.build(config)?;
        tracing::debug!(count = set.programs.len(), "loaded behavior set");
        Ok(set)
    }

    /// The behavior set bundled with the crate.
    pub fn builtin(config: &GameConfig) -> LoadResult<BehaviorSet> {
        Self::parse(include_str!("../../data/behaviors.ron"), config)
    }
}
