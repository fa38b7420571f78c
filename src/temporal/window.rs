//! Time windows.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A point in time. Units are whatever the graph's timestamps use.
pub type Time = i64;

/// Closed interval `[start, end]` bounding which edges a run may traverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Time,
    pub end: Time,
}

impl TimeWindow {
    pub fn new(start: Time, end: Time) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, t: Time) -> bool {
        self.start <= t && t <= self.end
    }

    /// Split `[start, end]` into consecutive windows of `width` time units.
    /// The last window is clipped to `end`.
    pub fn slices(start: Time, end: Time, width: Time) -> Result<Vec<TimeWindow>> {
        if width <= 0 {
            return Err(Error::InvalidWindow { start, end });
        }
        let whole = TimeWindow::new(start, end)?;
        let mut windows = Vec::new();
        let mut lo = whole.start;
        loop {
            let hi = lo.saturating_add(width - 1).min(whole.end);
            windows.push(TimeWindow { start: lo, end: hi });
            if hi >= whole.end {
                break;
            }
            lo = hi + 1;
        }
        Ok(windows)
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
