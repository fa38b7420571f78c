//! # Temporal rules
//!
//! Everything that decides *when*: the window a run covers, which edges a
//! path may follow inside it, and when a node itself came to exist.

pub mod window;
pub mod expander;
pub mod seed;

pub use window::{Time, TimeWindow};
pub use expander::TemporalExpander;
pub use seed::{CreationTime, SeedResolver};
