//! # Property Graph Model
//!
//! Clean DTOs for the contact/lineage graph.
//! These types cross every boundary: storage ↔ traversal ↔ propagation ↔ user.
//!
//! This module is pure data — no I/O, no state, no async.

pub mod node;
pub mod relationship;
pub mod path;
pub mod value;
pub mod property_map;

pub use node::{Node, NodeId};
pub use relationship::{Relationship, RelId, Direction};
pub use path::{TraversalPath, Step};
pub use value::Value;
pub use property_map::{PropertyMap, props};
