//! Process-wide infected set shared by concurrent window runs.

use std::sync::Arc;
use parking_lot::RwLock;

use super::IdentifierSet;
use crate::model::NodeId;

/// Clonable handle to one monotonically growing [`IdentifierSet`].
///
/// Writers take the lock only for the duration of a single merge or insert.
/// There is no removal API: cardinality never decreases.
#[derive(Clone, Default)]
pub struct SharedIdentifierSet {
    inner: Arc<RwLock<IdentifierSet>>,
}

impl SharedIdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `other` into the shared set. Returns the cardinality afterwards.
    pub fn merge(&self, other: &IdentifierSet) -> u64 {
        let mut set = self.inner.write();
        set.union_with(other);
        set.cardinality()
    }

    pub fn add(&self, id: NodeId) -> bool {
        self.inner.write().add_node(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.read().contains_node(id)
    }

    pub fn cardinality(&self) -> u64 {
        self.inner.read().cardinality()
    }

    /// Point-in-time copy of the shared set.
    pub fn snapshot(&self) -> IdentifierSet {
        self.inner.read().clone()
    }
}

impl std::fmt::Debug for SharedIdentifierSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedIdentifierSet").field(&*self.inner.read()).finish()
    }
}

impl From<IdentifierSet> for SharedIdentifierSet {
    fn from(set: IdentifierSet) -> Self {
        Self { inner: Arc::new(RwLock::new(set)) }
    }
}
