//! Time-sliced expansion: only move forward in time, only inside the window.

use crate::model::{Direction, Relationship, TraversalPath};
use crate::traversal::Expander;
use crate::Result;

use super::{Time, TimeWindow};

/// Follows timestamped derivation relationships outward.
///
/// A relationship is admitted iff its time lies in the window and is not
/// earlier than the latest time already on the path.
#[derive(Debug, Clone)]
pub struct TemporalExpander {
    window: TimeWindow,
    types: Vec<String>,
    time_property: String,
}

impl TemporalExpander {
    pub fn new(window: TimeWindow, rel_type: impl Into<String>, time_property: impl Into<String>) -> Self {
        Self {
            window,
            types: vec![rel_type.into()],
            time_property: time_property.into(),
        }
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Latest timestamp along `path`, if it has any relationships.
    pub fn latest_time(&self, path: &TraversalPath) -> Result<Option<Time>> {
        let mut latest = None;
        for rel in path.relationships() {
            let t = rel.time_property(&self.time_property)?;
            latest = Some(latest.map_or(t, |l: Time| l.max(t)));
        }
        Ok(latest)
    }
}

impl Expander for TemporalExpander {
    fn direction(&self) -> Direction {
        Direction::Outgoing
    }

    fn relationship_types(&self) -> &[String] {
        &self.types
    }

    fn admits(&self, path: &TraversalPath, rel: &Relationship) -> Result<bool> {
        let t = rel.time_property(&self.time_property)?;
        if !self.window.contains(t) {
            return Ok(false);
        }
        Ok(self.latest_time(path)?.is_none_or(|latest| t >= latest))
    }
}
