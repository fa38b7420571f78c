//! TraversalPath — a start node followed by relationship/node steps.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use super::{Node, Relationship};

/// One hop along a path: the relationship followed and the node it led to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub relationship: Relationship,
    pub node: Node,
}

/// A path in the graph: node -[rel]-> node -[rel]-> node ...
///
/// Contact chains are short in practice, so the first few steps live inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalPath {
    start: Node,
    steps: SmallVec<[Step; 4]>,
}

impl TraversalPath {
    pub fn single(node: Node) -> Self {
        Self { start: node, steps: SmallVec::new() }
    }

    /// Number of relationships on the path.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn start(&self) -> &Node {
        &self.start
    }

    pub fn end(&self) -> &Node {
        self.steps.last().map_or(&self.start, |s| &s.node)
    }

    pub fn last_relationship(&self) -> Option<&Relationship> {
        self.steps.last().map(|s| &s.relationship)
    }

    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.steps.iter().map(|s| &s.relationship)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::once(&self.start).chain(self.steps.iter().map(|s| &s.node))
    }

    /// Extend path with a relationship and its target node.
    pub fn append(&mut self, relationship: Relationship, node: Node) {
        self.steps.push(Step { relationship, node });
    }

    /// A copy of this path extended by one step.
    pub fn extended(&self, relationship: Relationship, node: Node) -> Self {
        let mut next = self.clone();
        next.append(relationship, node);
        next
    }
}
