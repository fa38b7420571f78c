//! Result sinks: where summary and failure lines go.

use std::sync::Arc;
use parking_lot::Mutex;

/// Thread-safe collector of human-readable result lines.
pub trait ResultSink: Send + Sync {
    fn append(&self, line: String);
}

impl<S: ResultSink + ?Sized> ResultSink for Arc<S> {
    fn append(&self, line: String) {
        (**self).append(line)
    }
}

/// Keeps every line in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the lines collected so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Remove and return everything collected so far.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl ResultSink for MemorySink {
    fn append(&self, line: String) {
        self.lines.lock().push(line);
    }
}

/// Emits every line as a `tracing` event at INFO level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ResultSink for TracingSink {
    fn append(&self, line: String) {
        tracing::info!(target: "contagion_rs::results", "{line}");
    }
}
