//! # Window propagation
//!
//! A [`WindowPropagator`] computes, for one time window, which target nodes
//! become infected by spreading outward from the already-infected seeds.
//! Runs share nothing but the global infected set and the result sink, so
//! [`dispatch`] can run any number of windows in parallel.

pub mod dispatch;
pub mod propagator;
pub mod sink;
pub mod summary;

pub use dispatch::{run_windows, run_windows_sequential};
pub use propagator::{RunReport, RunState, WindowPropagator};
pub use sink::{MemorySink, ResultSink, TracingSink};
pub use summary::WindowSummary;
