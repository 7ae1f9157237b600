/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Seed for the simulation randomizer; `None` draws one from entropy.
    /// Two runs with the same seed, level and turn script are identical.
    pub seed: Option<u64>,

    /// Number of simulation steps a headless run performs before stopping.
    pub max_steps: u32,

    /// Reject behavior sets that exceed the `MAX_*` limits below.
    pub respect_limits: bool,
}

impl GameConfig {
    // ===== load-time limits for behavior content =====
    /// Maximum number of conditions in a single behavior program.
    pub const MAX_CONDITIONS: usize = 64;
    /// Maximum number of words in a single expression (literals included).
    pub const MAX_EXPRESSION_WORDS: usize = 256;
    /// Maximum number of behavior programs in one behavior set.
    pub const MAX_BEHAVIORS: usize = 1024;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_STEPS: u32 = 256;

    pub fn new() -> Self {
        Self {
            seed: None,
            max_steps: Self::DEFAULT_MAX_STEPS,
            respect_limits: true,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new()
        }
    }

    /// Checks a program shape against the load-time limits.
    ///
    /// Returns the name of the first exceeded limit, or `None` when the shape
    /// fits (or limits are disabled).
    pub fn exceeded_limit(
        &self,
        condition_count: usize,
        longest_expression: usize,
    ) -> Option<&'static str> {
        if !self.respect_limits {
            return None;
        }
        if condition_count > Self::MAX_CONDITIONS {
            return Some("MAX_CONDITIONS");
        }
        if longest_expression > Self::MAX_EXPRESSION_WORDS {
            return Some("MAX_EXPRESSION_WORDS");
        }
        None
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
