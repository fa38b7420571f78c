//! Propagation configuration.
//!
//! Schema names default to the contact/lineage graph layout: infected
//! patients carry `Infected`, derivation edges are `OUTPUT` with a `time`
//! property, and lineage edges are `CARRIER`, timed by the `record_num` of
//! their source node.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Graph schema names the engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Label marking nodes already infected (seed candidates).
    pub infected_label: String,
    /// Label a reached node must carry to be counted as newly infected.
    pub target_label: String,
    /// Timestamped derivation relationship type.
    pub derivation_type: String,
    /// Lineage relationship type; its source node carries the record number.
    pub lineage_type: String,
    /// Timestamp property on derivation relationships.
    pub time_property: String,
    /// Record-number property on lineage source nodes.
    pub record_number_property: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            infected_label: "Infected".into(),
            target_label: "Patient".into(),
            derivation_type: "OUTPUT".into(),
            lineage_type: "CARRIER".into(),
            time_property: "time".into(),
            record_number_property: "record_num".into(),
        }
    }
}

/// Settings for one or many window runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    pub schema: SchemaConfig,
    /// Maximum path length explored from a seed. `None` means unbounded.
    pub max_depth: Option<usize>,
    /// Wall-clock budget for one window run, in milliseconds.
    pub run_timeout_ms: Option<u64>,
}

impl PropagationConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.schema;
        let names = [
            ("infected_label", &s.infected_label),
            ("target_label", &s.target_label),
            ("derivation_type", &s.derivation_type),
            ("lineage_type", &s.lineage_type),
            ("time_property", &s.time_property),
            ("record_number_property", &s.record_number_property),
        ];
        for (field, value) in names {
            if value.is_empty() {
                return Err(Error::Config(format!("schema.{field} must not be empty")));
            }
        }
        if self.max_depth == Some(0) {
            return Err(Error::Config("max_depth must be at least 1".into()));
        }
        Ok(())
    }

    pub fn run_timeout(&self) -> Option<Duration> {
        self.run_timeout_ms.map(Duration::from_millis)
    }
}
