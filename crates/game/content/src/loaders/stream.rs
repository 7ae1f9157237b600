//! Binary behavior word streams.
//!
//! A stream is a flat sequence of `u32` words (little-endian on disk unless
//! byte swapping is requested). Loader keywords structure it:
//!
//! ```text
//! Condition <expr> ExpressionEnd
//! Command <command> <expr> ExpressionEnd
//! Comma                              -- next behavior
//! End                                -- last behavior, stop
//! ```
//!
//! Each behavior is `(Condition Command)* Command`. Literal words that follow
//! `Int` inside an expression never terminate it.

use std::path::Path;

use snake_core::{BehaviorProgram, Command, CompileParameters, GameConfig, Keyword};

use crate::loaders::{LoadResult, read_bytes};

/// Structural words of the stream, read only between expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::FromRepr)]
#[repr(u32)]
enum LoaderKeyword {
    Comma = 0,
    Condition = 1,
    Command = 2,
    End = 3,
}

#[derive(Default)]
struct PendingBehavior {
    conditions: Vec<Vec<u32>>,
    commands: Vec<Command>,
    modify_expressions: Vec<Vec<u32>>,
}

impl PendingBehavior {
    fn finish(self, index: usize, config: &GameConfig) -> LoadResult<BehaviorProgram> {
        let longest = self
            .conditions
            .iter()
            .chain(&self.modify_expressions)
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        if let Some(limit) = config.exceeded_limit(self.conditions.len(), longest) {
            anyhow::bail!("Stream behavior {} exceeds {}", index, limit);
        }

        BehaviorProgram::compile(CompileParameters {
            conditions: &self.conditions,
            commands: &self.commands,
            modify_expressions: &self.modify_expressions,
        })
        .map_err(|e| anyhow::anyhow!("Stream behavior {} failed to compile: {}", index, e))
    }
}

/// Reader over the word stream that tracks the current offset for errors.
struct Cursor<'a> {
    words: &'a [u32],
    offset: usize,
}

impl Cursor<'_> {
    fn next(&mut self) -> Option<u32> {
        let word = self.words.get(self.offset).copied()?;
        self.offset += 1;
        Some(word)
    }

    /// Reads words up to and excluding the terminating `ExpressionEnd`.
    fn expression(&mut self) -> LoadResult<Vec<u32>> {
        let start = self.offset;
        let mut expression = Vec::new();
        let mut literal_next = false;

        while let Some(word) = self.next() {
            if literal_next {
                literal_next = false;
            } else if word == Keyword::ExpressionEnd.word() {
                return Ok(expression);
            } else if word == Keyword::Int.word() {
                literal_next = true;
            }
            expression.push(word);
        }
        anyhow::bail!("Expression starting at word {} is not terminated", start)
    }
}

/// Loader for packed behavior word streams.
#[derive(Clone, Copy, Debug, Default)]
pub struct BehaviorStreamLoader {
    /// Words were written with the opposite byte order.
    pub swap_bytes: bool,
}

impl BehaviorStreamLoader {
    pub fn new(swap_bytes: bool) -> Self {
        Self { swap_bytes }
    }

    pub fn load(&self, path: &Path, config: &GameConfig) -> LoadResult<Vec<BehaviorProgram>> {
        let bytes = read_bytes(path)?;
        let words = self
            .decode(&bytes)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        Self::parse_words(&words, config)
    }

    /// Splits raw bytes into words.
    pub fn decode(&self, bytes: &[u8]) -> LoadResult<Vec<u32>> {
        if bytes.len() % 4 != 0 {
            anyhow::bail!("Behavior stream length {} is not a multiple of 4", bytes.len());
        }
        Ok(bytes
            .chunks_exact(4)
            .map(|chunk| {
                let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                if self.swap_bytes { word.swap_bytes() } else { word }
            })
            .collect())
    }

    /// Parses and compiles every behavior in the stream.
    pub fn parse_words(words: &[u32], config: &GameConfig) -> LoadResult<Vec<BehaviorProgram>> {
        let mut cursor = Cursor { words, offset: 0 };
        let mut programs = Vec::new();
        let mut pending = PendingBehavior::default();

        loop {
            let offset = cursor.offset;
            let Some(word) = cursor.next() else {
                anyhow::bail!("Behavior stream ends without End keyword");
            };
            let Some(keyword) = LoaderKeyword::from_repr(word) else {
                anyhow::bail!("Unknown loader keyword {} at word {}", word, offset);
            };

            match keyword {
                LoaderKeyword::Condition => {
                    if pending.conditions.len() != pending.commands.len() {
                        anyhow::bail!("Condition at word {} follows another condition", offset);
                    }
                    pending.conditions.push(cursor.expression()?);
                }
                LoaderKeyword::Command => {
                    if pending.commands.len() > pending.conditions.len() {
                        anyhow::bail!("Command at word {} follows the fallback command", offset);
                    }
                    let Some(command_word) = cursor.next() else {
                        anyhow::bail!("Command at word {} has no command word", offset);
                    };
                    let command = Command::from_word(command_word).ok_or_else(|| {
                        anyhow::anyhow!("Unknown command {} at word {}", command_word, offset + 1)
                    })?;
                    pending.commands.push(command);
                    pending.modify_expressions.push(cursor.expression()?);
                }
                LoaderKeyword::Comma | LoaderKeyword::End => {
                    let behavior = std::mem::take(&mut pending);
                    programs.push(behavior.finish(programs.len(), config)?);
                    if keyword == LoaderKeyword::End {
                        break;
                    }
                }
            }
        }

        if config.respect_limits && programs.len() > GameConfig::MAX_BEHAVIORS {
            anyhow::bail!(
                "Behavior stream defines {} behaviors, limit is {}",
                programs.len(),
                GameConfig::MAX_BEHAVIORS
            );
        }
        tracing::debug!(count = programs.len(), "loaded behavior stream");
        Ok(programs)
    }
}
