//! # Breadth-first traversal driver
//!
//! A generic BFS over a [`StorageBackend`], parameterized by:
//!
//! - an [`Expander`]: which relationships may be followed from a path,
//! - a [`Uniqueness`] policy: what may be consumed only once per traversal,
//! - [`TraversalLimits`]: depth cap and wall-clock deadline.
//!
//! The start position is never yielded; every other path reached is passed to
//! the caller's visitor in breadth-first order.

use std::collections::VecDeque;
use std::time::Instant;

use crate::index::IdentifierSet;
use crate::model::*;
use crate::storage::StorageBackend;
use crate::{Error, Result};

// ============================================================================
// Expander
// ============================================================================

/// Policy deciding which relationships extend a path.
pub trait Expander: Send + Sync {
    /// Direction relationships are followed in, relative to the path's end node.
    fn direction(&self) -> Direction;

    /// Relationship types considered. Empty means every type.
    fn relationship_types(&self) -> &[String];

    /// Whether `rel` may extend `path`.
    fn admits(&self, path: &TraversalPath, rel: &Relationship) -> Result<bool>;
}

// ============================================================================
// Uniqueness / limits
// ============================================================================

/// What a single traversal may consume at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Uniqueness {
    /// Each relationship is followed at most once across the traversal.
    #[default]
    RelationshipGlobal,
    /// Each node is entered at most once across the traversal.
    NodeGlobal,
    /// No restriction. Only safe on acyclic graphs or with a depth cap.
    None,
}

/// Bounds on a traversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraversalLimits {
    pub max_depth: Option<usize>,
    pub deadline: Option<Instant>,
}

/// Counters for one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Paths passed to the visitor.
    pub paths: u64,
    /// Relationships followed.
    pub relationships: u64,
    /// Longest path yielded.
    pub max_depth: usize,
}

// ============================================================================
// Traversal
// ============================================================================

/// A configured breadth-first traversal, reusable across start nodes.
pub struct Traversal<'a, B: StorageBackend, E: Expander> {
    backend: &'a B,
    tx: &'a B::Tx,
    expander: &'a E,
    uniqueness: Uniqueness,
    limits: TraversalLimits,
}

impl<'a, B: StorageBackend, E: Expander> Traversal<'a, B, E> {
    pub fn new(backend: &'a B, tx: &'a B::Tx, expander: &'a E) -> Self {
        Self {
            backend,
            tx,
            expander,
            uniqueness: Uniqueness::default(),
            limits: TraversalLimits::default(),
        }
    }

    pub fn uniqueness(mut self, uniqueness: Uniqueness) -> Self {
        self.uniqueness = uniqueness;
        self
    }

    pub fn limits(mut self, limits: TraversalLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Traverse from `start`, calling `visit` for every path reached.
    ///
    /// Uniqueness state is scoped to this call.
    pub async fn traverse<F>(&self, start: NodeId, mut visit: F) -> Result<TraversalStats>
    where
        F: FnMut(&TraversalPath) + Send,
    {
        let start_node = self.backend.require_node(self.tx, start).await?;
        let mut stats = TraversalStats::default();
        let mut consumed_rels = IdentifierSet::new();
        let mut entered_nodes = IdentifierSet::new();
        entered_nodes.add_node(start);

        let mut queue = VecDeque::new();
        queue.push_back(TraversalPath::single(start_node));

        while let Some(path) = queue.pop_front() {
            self.check_deadline()?;
            if self.limits.max_depth.is_some_and(|max| path.len() >= max) {
                continue;
            }

            let tip = path.end().id;
            for rel in self.candidates(tip).await? {
                if self.uniqueness == Uniqueness::RelationshipGlobal && consumed_rels.contains(rel.id.0) {
                    continue;
                }
                if !self.expander.admits(&path, &rel)? {
                    continue;
                }
                let next_id = rel.other_node(tip).unwrap_or(rel.dst);
                match self.uniqueness {
                    Uniqueness::RelationshipGlobal => {
                        consumed_rels.add_relationship(rel.id);
                    }
                    Uniqueness::NodeGlobal => {
                        if !entered_nodes.add_node(next_id) {
                            continue;
                        }
                    }
                    Uniqueness::None => {}
                }

                let next_node = self.backend.require_node(self.tx, next_id).await?;
                let next = path.extended(rel, next_node);

                stats.paths += 1;
                stats.relationships += 1;
                stats.max_depth = stats.max_depth.max(next.len());
                visit(&next);
                queue.push_back(next);
            }
        }

        tracing::trace!(start = %start, paths = stats.paths, depth = stats.max_depth, "traversal done");
        Ok(stats)
    }

    async fn candidates(&self, node: NodeId) -> Result<Vec<Relationship>> {
        let dir = self.expander.direction();
        let types = self.expander.relationship_types();
        if types.is_empty() {
            return self.backend.get_relationships(self.tx, node, dir, None).await;
        }
        let mut rels = Vec::new();
        for t in types {
            rels.extend(self.backend.get_relationships(self.tx, node, dir, Some(t)).await?);
        }
        Ok(rels)
    }

    fn check_deadline(&self) -> Result<()> {
        match self.limits.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Error::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}
