//! Engine configuration

use std::time::Duration;

use crate::error::{Error, Result};
use crate::search::DEFAULT_CAPACITY;

/// Settings for [`AIEngine`](crate::engine::AIEngine)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Minimum number of transposition table slots (rounded up to a prime)
    pub tt_capacity: usize,
    /// Fixed search depth, or the deepest iteration when time-limited
    pub max_depth: u8,
    /// Per-move time limit; enables iterative deepening
    pub time_limit_ms: Option<u64>,
    /// Abort the search after this many nodes
    pub node_budget: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tt_capacity: DEFAULT_CAPACITY,
            max_depth: 6,
            time_limit_ms: None,
            node_budget: None,
        }
    }
}

impl EngineConfig {
    pub fn with_tt_capacity(mut self, capacity: usize) -> Self {
        self.tt_capacity = capacity;
        self
    }

    pub fn with_max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_node_budget(mut self, nodes: u64) -> Self {
        self.node_budget = Some(nodes);
        self
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Check the settings before building an engine.
    ///
    /// # Errors
    ///
    /// `Error::Configuration` for a zero cache capacity or a zero depth.
    pub fn validate(&self) -> Result<()> {
        if self.tt_capacity == 0 {
            return Err(Error::Configuration(
                "tt_capacity must be positive".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(Error::Configuration(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
