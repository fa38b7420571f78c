//! Per-window summary record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::temporal::TimeWindow;
use crate::Result;

/// Cardinalities reported at the end of a successful window run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub window: TimeWindow,
    /// Infected at window start (`|seed|`).
    pub seed: u64,
    /// Newly infected in this window (`|next \ seed|`).
    pub delta: u64,
    /// Global infected count after this run.
    pub total: u64,
}

impl WindowSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for WindowSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "From: {} Until: {} Infected at start: {} newly infected: {} All Infected: {}",
            self.window.start, self.window.end, self.seed, self.delta, self.total,
        )
    }
}
