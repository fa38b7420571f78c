//! Compressed set of 64-bit identifiers.
//!
//! Backed by a Roaring treemap: ids are bucketed by their high 32 bits and
//! each bucket is a Roaring bitmap, so memory and union/difference cost track
//! the number of members rather than the width of the id space.

use std::fmt;
use roaring::RoaringTreemap;

use crate::model::{NodeId, RelId};

/// An ordered, compressed set of `u64` identifiers.
#[derive(Clone, Default, PartialEq)]
pub struct IdentifierSet {
    bits: RoaringTreemap,
}

impl IdentifierSet {
    pub fn new() -> Self {
        Self { bits: RoaringTreemap::new() }
    }

    /// Insert `id`. Returns true if it was not already present.
    pub fn add(&mut self, id: u64) -> bool {
        self.bits.insert(id)
    }

    pub fn add_node(&mut self, id: NodeId) -> bool {
        self.add(id.0)
    }

    pub fn add_relationship(&mut self, id: RelId) -> bool {
        self.add(id.0)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.bits.contains(id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.contains(id.0)
    }

    /// In-place union: `self ∪= other`.
    pub fn union_with(&mut self, other: &IdentifierSet) {
        self.bits |= &other.bits;
    }

    /// In-place difference: `self \= other`.
    pub fn difference_with(&mut self, other: &IdentifierSet) {
        self.bits -= &other.bits;
    }

    pub fn union(&self, other: &IdentifierSet) -> IdentifierSet {
        let mut out = self.clone();
        out.union_with(other);
        out
    }

    pub fn difference(&self, other: &IdentifierSet) -> IdentifierSet {
        let mut out = self.clone();
        out.difference_with(other);
        out
    }

    pub fn is_disjoint(&self, other: &IdentifierSet) -> bool {
        self.bits.is_disjoint(&other.bits)
    }

    pub fn cardinality(&self) -> u64 {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Ascending iteration. Each call starts over from the smallest id.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.bits.iter()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter().map(NodeId)
    }
}

impl fmt::Debug for IdentifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHOWN: usize = 16;
        let mut list = f.debug_set();
        list.entries(self.iter().take(SHOWN));
        if self.cardinality() > SHOWN as u64 {
            list.entry(&format_args!("… {} total", self.cardinality()));
        }
        list.finish()
    }
}

impl FromIterator<u64> for IdentifierSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self { bits: iter.into_iter().collect() }
    }
}

impl FromIterator<NodeId> for IdentifierSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        iter.into_iter().map(|id| id.0).collect()
    }
}

impl Extend<u64> for IdentifierSet {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        self.bits.extend(iter);
    }
}

impl Extend<NodeId> for IdentifierSet {
    fn extend<I: IntoIterator<Item = NodeId>>(&mut self, iter: I) {
        self.bits.extend(iter.into_iter().map(|id| id.0));
    }
}
