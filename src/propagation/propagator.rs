//! One window's propagation run.
//!
//! ```text
//! Init ──open snapshot, resolve seeds──▶ SeedsLoaded
//!      ──merge seeds into global, BFS from every seed──▶ Propagating
//!      ──delta = next \ seed, emit summary line──▶ Summarized
//! any failure ──roll back snapshot, emit error line──▶ Failed
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::PropagationConfig;
use crate::index::{IdentifierSet, SharedIdentifierSet};
use crate::storage::StorageBackend;
use crate::temporal::{SeedResolver, TemporalExpander, TimeWindow};
use crate::traversal::{Traversal, TraversalLimits, Uniqueness};
use crate::tx::ReadSnapshot;
use crate::{Error, Result};

use super::{ResultSink, WindowSummary};

/// Lifecycle of a [`WindowPropagator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    Init,
    SeedsLoaded,
    Propagating,
    Summarized,
    Failed,
}

/// What a finished run hands back to its caller.
#[derive(Debug)]
pub struct RunReport {
    pub window: TimeWindow,
    pub state: RunState,
    pub summary: Option<WindowSummary>,
    pub error: Option<Error>,
    /// Infected at window start. Empty if the run failed.
    pub seed: IdentifierSet,
    /// Newly infected in this window. Empty if the run failed.
    pub delta: IdentifierSet,
    pub elapsed: Duration,
}

impl RunReport {
    pub(crate) fn failed(window: TimeWindow, error: Error, elapsed: Duration) -> Self {
        Self {
            window,
            state: RunState::Failed,
            summary: None,
            error: Some(error),
            seed: IdentifierSet::new(),
            delta: IdentifierSet::new(),
            elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.state == RunState::Summarized
    }
}

/// Line appended to the sink when a run fails.
pub(crate) fn failure_line(window: TimeWindow, error: &Error) -> String {
    format!("From: {} Until: {} failed: {error}", window.start, window.end)
}

/// Sets produced by a successful run.
struct Propagated {
    seed: IdentifierSet,
    next: IdentifierSet,
}

/// Computes the newly infected set for one time window.
pub struct WindowPropagator<B: StorageBackend> {
    backend: Arc<B>,
    window: TimeWindow,
    global: SharedIdentifierSet,
    sink: Arc<dyn ResultSink>,
    config: PropagationConfig,
    state: RunState,
}

impl<B: StorageBackend> WindowPropagator<B> {
    pub fn new(
        backend: Arc<B>,
        window: TimeWindow,
        global: SharedIdentifierSet,
        sink: Arc<dyn ResultSink>,
        config: PropagationConfig,
    ) -> Self {
        Self { backend, window, global, sink, config, state: RunState::Init }
    }

    /// Run to completion. Never fails: errors end in [`RunState::Failed`],
    /// are appended to the sink, and are returned in the report.
    pub async fn run(mut self) -> RunReport {
        let started = Instant::now();
        tracing::debug!(window = %self.window, "window run starting");

        let backend = Arc::clone(&self.backend);
        let outcome = match ReadSnapshot::open(&*backend).await {
            Ok(snapshot) => {
                let outcome = self.propagate(&snapshot).await;
                end_snapshot(snapshot, outcome).await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(Propagated { seed, next }) => {
                let delta = next.difference(&seed);
                let summary = WindowSummary {
                    window: self.window,
                    seed: seed.cardinality(),
                    delta: delta.cardinality(),
                    total: self.global.cardinality(),
                };
                self.transition(RunState::Summarized);
                tracing::info!(
                    window = %self.window,
                    seed = summary.seed,
                    delta = summary.delta,
                    total = summary.total,
                    "window summarized",
                );
                self.sink.append(summary.to_string());
                RunReport {
                    window: self.window,
                    state: self.state,
                    summary: Some(summary),
                    error: None,
                    seed,
                    delta,
                    elapsed: started.elapsed(),
                }
            }
            Err(error) => {
                self.transition(RunState::Failed);
                tracing::warn!(window = %self.window, %error, "window run failed");
                self.sink.append(failure_line(self.window, &error));
                RunReport::failed(self.window, error, started.elapsed())
            }
        }
    }

    async fn propagate(&mut self, snapshot: &ReadSnapshot<'_, B>) -> Result<Propagated> {
        let backend = snapshot.backend();
        let tx = snapshot.tx()?;
        let schema = self.config.schema.clone();
        let limits = TraversalLimits {
            max_depth: self.config.max_depth,
            deadline: self.config.run_timeout().map(|t| Instant::now() + t),
        };

        // Seeds: infected nodes that already exist by the window's end.
        let resolver = SeedResolver::new(&schema);
        let mut seed = IdentifierSet::new();
        for node in backend.nodes_by_label(tx, &schema.infected_label).await? {
            if resolver.qualifies(backend, tx, node.id, self.window.end).await? {
                seed.add_node(node.id);
            }
        }
        self.transition(RunState::SeedsLoaded);
        tracing::debug!(window = %self.window, seeds = seed.cardinality(), "seeds loaded");

        self.global.merge(&seed);
        self.transition(RunState::Propagating);

        let expander = TemporalExpander::new(
            self.window,
            schema.derivation_type.as_str(),
            schema.time_property.as_str(),
        );
        let traversal = Traversal::new(backend, tx, &expander)
            .uniqueness(Uniqueness::RelationshipGlobal)
            .limits(limits);
        let target = schema.target_label.as_str();

        let mut next = IdentifierSet::new();
        for start in seed.node_ids() {
            let mut reached = IdentifierSet::new();
            traversal
                .traverse(start, |path| {
                    let end = path.end();
                    if end.has_label(target) {
                        reached.add_node(end.id);
                    }
                })
                .await?;
            self.global.merge(&reached);
            next.union_with(&reached);
        }

        Ok(Propagated { seed, next })
    }

    fn transition(&mut self, to: RunState) {
        tracing::trace!(window = %self.window, from = ?self.state, to = ?to, "state transition");
        self.state = to;
    }
}

/// Commit on success, roll back on failure; the first error wins.
async fn end_snapshot<B: StorageBackend, T>(
    snapshot: ReadSnapshot<'_, B>,
    outcome: Result<T>,
) -> Result<T> {
    let ended = snapshot.end(outcome.is_ok()).await;
    match (outcome, ended) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(rollback)) => {
            tracing::warn!(error = %rollback, "snapshot rollback failed");
            Err(e)
        }
    }
}
