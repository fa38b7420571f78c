//! Fan-out of window runs: one task per window.

use std::sync::Arc;
use std::time::Duration;

use crate::config::PropagationConfig;
use crate::index::SharedIdentifierSet;
use crate::storage::StorageBackend;
use crate::temporal::TimeWindow;
use crate::Error;

use super::propagator::failure_line;
use super::{ResultSink, RunReport, WindowPropagator};

/// Run every window concurrently on the current tokio runtime.
///
/// Reports come back in the order of `windows`; sink lines arrive in
/// completion order. A panicking run is reported as failed and does not
/// affect the others.
pub async fn run_windows<B: StorageBackend>(
    backend: Arc<B>,
    windows: &[TimeWindow],
    global: SharedIdentifierSet,
    sink: Arc<dyn ResultSink>,
    config: PropagationConfig,
) -> Vec<RunReport> {
    let handles: Vec<_> = windows
        .iter()
        .map(|&window| {
            let run = WindowPropagator::new(
                Arc::clone(&backend),
                window,
                global.clone(),
                Arc::clone(&sink),
                config.clone(),
            );
            (window, tokio::spawn(run.run()))
        })
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    for (window, handle) in handles {
        let report = match handle.await {
            Ok(report) => report,
            Err(join) => {
                let error = Error::TaskFailed(join.to_string());
                tracing::error!(window = %window, %error, "window task did not complete");
                sink.append(failure_line(window, &error));
                RunReport::failed(window, error, Duration::ZERO)
            }
        };
        reports.push(report);
    }
    reports
}

/// Run windows one after another, in order.
pub async fn run_windows_sequential<B: StorageBackend>(
    backend: Arc<B>,
    windows: &[TimeWindow],
    global: SharedIdentifierSet,
    sink: Arc<dyn ResultSink>,
    config: PropagationConfig,
) -> Vec<RunReport> {
    let mut reports = Vec::with_capacity(windows.len());
    for &window in windows {
        let run = WindowPropagator::new(
            Arc::clone(&backend),
            window,
            global.clone(),
            Arc::clone(&sink),
            config.clone(),
        );
        reports.push(run.run().await);
    }
    reports
}
