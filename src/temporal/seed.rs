//! Creation-time resolution and seed qualification.

use serde::{Deserialize, Serialize};

use crate::config::SchemaConfig;
use crate::model::{Direction, NodeId};
use crate::storage::StorageBackend;
use crate::Result;

use super::Time;

/// When a node came into existence, as far as the graph can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CreationTime {
    At(Time),
    /// No derivation or lineage relationship: the node never qualifies.
    Never,
}

impl CreationTime {
    /// Whether a node created at this time is already infected by `end`.
    pub fn is_by(self, end: Time) -> bool {
        match self {
            CreationTime::At(t) => t <= end,
            CreationTime::Never => false,
        }
    }

    fn earliest(self, t: Time) -> Self {
        match self {
            CreationTime::At(current) if current <= t => self,
            _ => CreationTime::At(t),
        }
    }
}

/// Resolves creation times from a node's relationships.
///
/// The creation time is the minimum over
/// - the time property of every outgoing derivation relationship, and
/// - the record number of the source node of every incoming lineage relationship.
#[derive(Debug, Clone)]
pub struct SeedResolver {
    derivation_type: String,
    lineage_type: String,
    time_property: String,
    record_number_property: String,
}

impl SeedResolver {
    pub fn new(schema: &SchemaConfig) -> Self {
        Self {
            derivation_type: schema.derivation_type.clone(),
            lineage_type: schema.lineage_type.clone(),
            time_property: schema.time_property.clone(),
            record_number_property: schema.record_number_property.clone(),
        }
    }

    pub async fn creation_time<B: StorageBackend>(
        &self,
        backend: &B,
        tx: &B::Tx,
        node: NodeId,
    ) -> Result<CreationTime> {
        let mut created = CreationTime::Never;

        let derived = backend
            .get_relationships(tx, node, Direction::Outgoing, Some(&self.derivation_type))
            .await?;
        for rel in &derived {
            created = created.earliest(rel.time_property(&self.time_property)?);
        }

        let lineage = backend
            .get_relationships(tx, node, Direction::Incoming, Some(&self.lineage_type))
            .await?;
        for rel in &lineage {
            let parent = backend.require_node(tx, rel.src).await?;
            created = created.earliest(parent.time_property(&self.record_number_property)?);
        }

        Ok(created)
    }

    /// Whether `node` belongs in the seed set of a window ending at `end`.
    pub async fn qualifies<B: StorageBackend>(
        &self,
        backend: &B,
        tx: &B::Tx,
        node: NodeId,
        end: Time,
    ) -> Result<bool> {
        Ok(self.creation_time(backend, tx, node).await?.is_by(end))
    }
}
