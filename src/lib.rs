//! # contagion-rs — Temporal Contagion over a Property Graph
//!
//! For a time window, computes which entities of a contact/lineage graph
//! become infected by spreading outward from an already-infected seed set,
//! following only edges whose timestamps fall inside the window and never
//! moving backward in time along a path.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `StorageBackend` is the contract between the engine and the graph store
//! 2. **Clean DTOs**: `Node`, `Relationship`, `Value` cross all boundaries
//! 3. **Explicit shared state**: the global infected set is a handle passed into every run
//! 4. **Runs never crash each other**: every failure ends as a line in the result sink
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use contagion_rs::{Contagion, TimeWindow};
//!
//! # async fn example() -> contagion_rs::Result<()> {
//! let outbreak = Contagion::open_memory().await?;
//! // ... load the graph through outbreak.backend() ...
//!
//! let windows = TimeWindow::slices(0, 100, 10)?;
//! for report in outbreak.run_windows(&windows).await {
//!     if let Some(summary) = report.summary {
//!         println!("{summary}");
//!     }
//! }
//! println!("infected overall: {}", outbreak.infected().cardinality());
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod tx;
pub mod index;
pub mod temporal;
pub mod traversal;
pub mod propagation;
pub mod config;

use std::sync::Arc;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Node, Relationship, TraversalPath, Value, PropertyMap,
    NodeId, RelId, Direction, props,
};

// ============================================================================
// Re-exports: Storage / transactions
// ============================================================================

pub use storage::{StorageBackend, BackendConfig, MemoryBackend};
pub use tx::{Transaction, TxMode, TxId, ReadSnapshot};

// ============================================================================
// Re-exports: Engine
// ============================================================================

pub use index::{IdentifierSet, SharedIdentifierSet};
pub use temporal::{Time, TimeWindow, TemporalExpander, SeedResolver, CreationTime};
pub use traversal::{Expander, Traversal, Uniqueness, TraversalLimits, TraversalStats};
pub use propagation::{
    WindowPropagator, RunState, RunReport, WindowSummary,
    ResultSink, MemorySink, TracingSink,
};
pub use config::{PropagationConfig, SchemaConfig};

// ============================================================================
// Top-level handle
// ============================================================================

/// The primary entry point. A `Contagion` owns a storage backend, the
/// process-wide infected set, and the sink every run reports to.
pub struct Contagion<B: StorageBackend> {
    backend: Arc<B>,
    config: PropagationConfig,
    infected: SharedIdentifierSet,
    sink: Arc<dyn ResultSink>,
}

impl<B: StorageBackend> Contagion<B> {
    /// Create with the given backend, default config and a [`TracingSink`].
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            config: PropagationConfig::default(),
            infected: SharedIdentifierSet::new(),
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_config(mut self, config: PropagationConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Access the underlying backend (for loading data).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// The global infected set accumulated by every run so far.
    pub fn infected(&self) -> &SharedIdentifierSet {
        &self.infected
    }

    /// A propagator for `window`, wired to this handle's shared state.
    pub fn propagator(&self, window: TimeWindow) -> WindowPropagator<B> {
        WindowPropagator::new(
            Arc::clone(&self.backend),
            window,
            self.infected.clone(),
            Arc::clone(&self.sink),
            self.config.clone(),
        )
    }

    /// Run a single window.
    pub async fn run_window(&self, window: TimeWindow) -> RunReport {
        self.propagator(window).run().await
    }

    /// Run windows in parallel, one task each.
    pub async fn run_windows(&self, windows: &[TimeWindow]) -> Vec<RunReport> {
        propagation::run_windows(
            Arc::clone(&self.backend),
            windows,
            self.infected.clone(),
            Arc::clone(&self.sink),
            self.config.clone(),
        )
        .await
    }

    /// Run windows one after another, in the given order.
    pub async fn run_windows_sequential(&self, windows: &[TimeWindow]) -> Vec<RunReport> {
        propagation::run_windows_sequential(
            Arc::clone(&self.backend),
            windows,
            self.infected.clone(),
            Arc::clone(&self.sink),
            self.config.clone(),
        )
        .await
    }

    /// Split `[start, end]` into windows of `width` and run them in parallel.
    pub async fn sliced(&self, start: Time, end: Time, width: Time) -> Result<Vec<RunReport>> {
        let windows = TimeWindow::slices(start, end, width)?;
        Ok(self.run_windows(&windows).await)
    }
}

/// In-memory graph for testing and embedding.
impl Contagion<MemoryBackend> {
    pub async fn open_memory() -> Result<Self> {
        Ok(Self::with_backend(BackendConfig::Memory.open()))
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Property '{key}' missing on {entity}")]
    PropertyMissing { entity: String, key: String },

    #[error("Type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    #[error("Invalid time window [{start}, {end}]")]
    InvalidWindow { start: Time, end: Time },

    #[error("Run deadline exceeded")]
    DeadlineExceeded,

    #[error("Transaction error: {0}")]
    TxError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Window task failed: {0}")]
    TaskFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
