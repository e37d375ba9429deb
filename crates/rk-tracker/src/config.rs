//! Configuration for an encounter.

/// Configuration for an encounter and its tracker session.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Base seed for the encounter's dice streams. Every round, creature,
    /// and choice stream is derived from it, so one number reproduces the
    /// whole encounter.
    pub seed: i64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

impl TrackerConfig {
    /// Set the encounter seed.
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }
}
