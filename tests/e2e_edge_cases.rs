//! End-to-end tests for run limits and task failure.
//!
//! Covers the run deadline, the depth cap set through `PropagationConfig`,
//! and a window task that panics inside the backend while its siblings
//! finish normally.

use std::sync::Arc;

use async_trait::async_trait;
use contagion_rs::storage::memory::MemoryTx;
use contagion_rs::{
    props, Contagion, Direction, Error, MemoryBackend, MemorySink, Node, NodeId, PropagationConfig,
    PropertyMap, RelId, Relationship, Result, RunState, StorageBackend, TimeWindow, TxMode,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Helpers
// ============================================================================

fn window(start: i64, end: i64) -> TimeWindow {
    TimeWindow::new(start, end).unwrap()
}

/// Loads `seed -1-> a -2-> b -3-> c` with every node a Patient.
async fn chain(db: &MemoryBackend) -> [NodeId; 4] {
    let mut tx = db.begin_tx(TxMode::ReadWrite).await.unwrap();
    let seed = db.create_node(&mut tx, &["Infected", "Patient"], PropertyMap::new()).await.unwrap();
    let a = db.create_node(&mut tx, &["Patient"], PropertyMap::new()).await.unwrap();
    let b = db.create_node(&mut tx, &["Patient"], PropertyMap::new()).await.unwrap();
    let c = db.create_node(&mut tx, &["Patient"], PropertyMap::new()).await.unwrap();
    for (src, dst, time) in [(seed, a, 1), (a, b, 2), (b, c, 3)] {
        db.create_relationship(&mut tx, src, dst, "OUTPUT", props([("time", time)])).await.unwrap();
    }
    db.commit_tx(tx).await.unwrap();
    [seed, a, b, c]
}

/// Delegates to a MemoryBackend but panics when asked for the
/// relationships of one node.
struct TrippingBackend {
    inner: MemoryBackend,
    trip: NodeId,
}

#[async_trait]
impl StorageBackend for TrippingBackend {
    type Tx = MemoryTx;

    async fn shutdown(&self) -> Result<()> {
        self.inner.shutdown().await
    }

    async fn begin_tx(&self, mode: TxMode) -> Result<MemoryTx> {
        self.inner.begin_tx(mode).await
    }

    async fn commit_tx(&self, tx: MemoryTx) -> Result<()> {
        self.inner.commit_tx(tx).await
    }

    async fn rollback_tx(&self, tx: MemoryTx) -> Result<()> {
        self.inner.rollback_tx(tx).await
    }

    fn release_tx(&self, tx: MemoryTx) {
        self.inner.release_tx(tx)
    }

    async fn create_node(&self, tx: &mut MemoryTx, labels: &[&str], props: PropertyMap) -> Result<NodeId> {
        self.inner.create_node(tx, labels, props).await
    }

    async fn get_node(&self, tx: &MemoryTx, id: NodeId) -> Result<Option<Node>> {
        self.inner.get_node(tx, id).await
    }

    async fn add_label(&self, tx: &mut MemoryTx, id: NodeId, label: &str) -> Result<()> {
        self.inner.add_label(tx, id, label).await
    }

    async fn create_relationship(
        &self,
        tx: &mut MemoryTx,
        src: NodeId,
        dst: NodeId,
        rel_type: &str,
        props: PropertyMap,
    ) -> Result<RelId> {
        self.inner.create_relationship(tx, src, dst, rel_type, props).await
    }

    async fn get_relationships(
        &self,
        tx: &MemoryTx,
        node: NodeId,
        dir: Direction,
        rel_type: Option<&str>,
    ) -> Result<Vec<Relationship>> {
        if node == self.trip {
            panic!("storage fault on {node}");
        }
        self.inner.get_relationships(tx, node, dir, rel_type).await
    }

    async fn nodes_by_label(&self, tx: &MemoryTx, label: &str) -> Result<Vec<Node>> {
        self.inner.nodes_by_label(tx, label).await
    }
}

// ============================================================================
// 1. Run deadline
// ============================================================================

#[tokio::test]
async fn test_zero_timeout_fails_run_with_deadline_exceeded() {
    let db = MemoryBackend::new();
    let [seed, ..] = chain(&db).await;
    let sink = Arc::new(MemorySink::new());
    let config = PropagationConfig { run_timeout_ms: Some(0), ..PropagationConfig::default() };
    let outbreak = Contagion::with_backend(db)
        .with_config(config).unwrap()
        .with_sink(sink.clone());

    let report = outbreak.run_window(window(0, 5)).await;

    assert_eq!(report.state, RunState::Failed);
    assert!(matches!(report.error, Some(Error::DeadlineExceeded)));
    assert!(report.summary.is_none());
    assert_eq!(sink.lines(), vec!["From: 0 Until: 5 failed: Run deadline exceeded".to_string()]);
    assert_eq!(outbreak.backend().open_transactions(), 0);
    // Seeds were merged into the global set before the deadline hit.
    assert_eq!(outbreak.infected().cardinality(), 1);
    assert!(outbreak.infected().contains(seed));
}

// ============================================================================
// 2. Depth cap
// ============================================================================

#[tokio::test]
async fn test_max_depth_bounds_spread_per_seed() {
    let db = MemoryBackend::new();
    let [_seed, a, b, c] = chain(&db).await;
    let config = PropagationConfig::from_json(r#"{ "max_depth": 2 }"#).unwrap();
    let outbreak = Contagion::with_backend(db).with_config(config).unwrap();

    let report = outbreak.run_window(window(0, 10)).await;

    assert!(report.is_success());
    assert_eq!(report.delta.node_ids().collect::<Vec<_>>(), vec![a, b]);
    assert!(!outbreak.infected().contains(c));
}

#[tokio::test]
async fn test_zero_max_depth_is_rejected() {
    let err = PropagationConfig::from_json(r#"{ "max_depth": 0 }"#);
    assert!(matches!(err, Err(Error::Config(_))));
}

// ============================================================================
// 3. A panicking window task
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_panicking_window_is_reported_as_task_failure() {
    let db = MemoryBackend::new();
    let mut tx = db.begin_tx(TxMode::ReadWrite).await.unwrap();
    let early = db.create_node(&mut tx, &["Infected", "Patient"], PropertyMap::new()).await.unwrap();
    let tripwire = db.create_node(&mut tx, &["Patient"], PropertyMap::new()).await.unwrap();
    let late = db.create_node(&mut tx, &["Infected", "Patient"], PropertyMap::new()).await.unwrap();
    let contact = db.create_node(&mut tx, &["Patient"], PropertyMap::new()).await.unwrap();
    db.create_relationship(&mut tx, early, tripwire, "OUTPUT", props([("time", 1)])).await.unwrap();
    db.create_relationship(&mut tx, late, contact, "OUTPUT", props([("time", 10)])).await.unwrap();
    db.commit_tx(tx).await.unwrap();

    let sink = Arc::new(MemorySink::new());
    let backend = TrippingBackend { inner: db.clone(), trip: tripwire };
    let outbreak = Contagion::with_backend(backend).with_sink(sink.clone());

    // Only [0, 5] reaches the tripwire node and expands it.
    let reports = outbreak.run_windows(&[window(0, 5), window(8, 12), window(9, 11)]).await;

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].state, RunState::Failed);
    assert!(matches!(reports[0].error, Some(Error::TaskFailed(_))));
    assert!(reports[1].is_success());
    assert!(reports[1].delta.contains_node(contact));
    assert!(reports[2].is_success());

    let lines = sink.lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines.iter().filter(|l| l.starts_with("From: 0 Until: 5 failed:")).count(), 1);
    // The unwinding task still released its snapshot.
    assert_eq!(db.open_transactions(), 0);
}
