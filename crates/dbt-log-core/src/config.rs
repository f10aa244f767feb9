//! Analyzer settings.

use serde::{Deserialize, Serialize};

use crate::error::{DbtLogError, Result};
use crate::rank::RankPolicy;

/// Log file read when no path is given.
pub const DEFAULT_LOG_FILE: &str = "console_output.log";

/// Prefix of the cleaned copy written next to the input log.
pub const DEFAULT_PRINTABLE_PREFIX: &str = "printable_";

pub const DEFAULT_TOP_N: usize = 10;

/// Configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Upper rank position reported in the runtime table.
    pub top_n: usize,

    /// Whether the slowest model is part of the runtime table.
    pub rank_policy: RankPolicy,

    /// File name prefix of the cleaned log copy.
    pub printable_prefix: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            rank_policy: RankPolicy::default(),
            printable_prefix: DEFAULT_PRINTABLE_PREFIX.to_string(),
        }
    }
}

impl AnalyzerConfig {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_rank_policy(mut self, rank_policy: RankPolicy) -> Self {
        self.rank_policy = rank_policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(DbtLogError::InvalidTopN(self.top_n));
        }
        Ok(())
    }
}
