//! End-to-end integration tests for time-bounded traversal.
//!
//! Drives `Traversal` with a `TemporalExpander` directly against
//! MemoryBackend and checks every yielded path against the window and the
//! no-backward-in-time rule. Also covers custom schema names and date-time
//! timestamps through the full propagation pipeline.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use contagion_rs::{
    props, Contagion, MemoryBackend, MemorySink, NodeId, PropertyMap,
    StorageBackend, TemporalExpander, TimeWindow, Traversal, TraversalPath, TxMode, Uniqueness,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Helper: a contact graph with in-window, out-of-window and backward edges.
//
//   a -1-> b -3-> c -2-> d        (c -> d goes backward in time)
//          b -7-> e               (outside [0, 5])
//   a -5-> f -5-> g               (equal timestamps are allowed)
// ============================================================================

struct Fixture {
    db: MemoryBackend,
    a: NodeId,
    b: NodeId,
    c: NodeId,
    d: NodeId,
    e: NodeId,
    f: NodeId,
    g: NodeId,
}

async fn fixture() -> Fixture {
    let db = MemoryBackend::new();
    let mut tx = db.begin_tx(TxMode::ReadWrite).await.unwrap();
    let mut ids = Vec::new();
    for _ in 0..7 {
        ids.push(db.create_node(&mut tx, &["Patient"], PropertyMap::new()).await.unwrap());
    }
    let &[a, b, c, d, e, f, g] = ids.as_slice() else { unreachable!() };
    for (src, dst, time) in [(a, b, 1), (b, c, 3), (c, d, 2), (b, e, 7), (a, f, 5), (f, g, 5)] {
        db.create_relationship(&mut tx, src, dst, "OUTPUT", props([("time", time)])).await.unwrap();
    }
    db.commit_tx(tx).await.unwrap();
    Fixture { db, a, b, c, d, e, f, g }
}

fn times(path: &TraversalPath) -> Vec<i64> {
    path.relationships().map(|r| r.time_property("time").unwrap()).collect()
}

// ============================================================================
// 1. Every traversed relationship is inside the window and non-decreasing
// ============================================================================

#[tokio::test]
async fn test_paths_respect_window_and_causality() {
    let fx = fixture().await;
    let tx = fx.db.begin_tx(TxMode::ReadOnly).await.unwrap();
    let window = TimeWindow::new(0, 5).unwrap();
    let expander = TemporalExpander::new(window, "OUTPUT", "time");

    let mut paths = Vec::new();
    Traversal::new(&fx.db, &tx, &expander)
        .uniqueness(Uniqueness::RelationshipGlobal)
        .traverse(fx.a, |p| paths.push(p.clone()))
        .await
        .unwrap();

    for path in &paths {
        let ts = times(path);
        assert!(ts.iter().all(|&t| window.contains(t)), "out of window: {ts:?}");
        assert!(ts.windows(2).all(|w| w[0] <= w[1]), "backward in time: {ts:?}");
    }

    let mut reached: Vec<NodeId> = paths.iter().map(|p| p.end().id).collect();
    reached.sort();
    assert_eq!(reached, vec![fx.b, fx.c, fx.f, fx.g]);
    assert!(!reached.contains(&fx.d));
    assert!(!reached.contains(&fx.e));
}

// ============================================================================
// 2. A later window admits the out-of-window edge
// ============================================================================

#[tokio::test]
async fn test_window_start_excludes_early_edges() {
    let fx = fixture().await;
    let tx = fx.db.begin_tx(TxMode::ReadOnly).await.unwrap();
    let expander = TemporalExpander::new(TimeWindow::new(3, 7).unwrap(), "OUTPUT", "time");

    let mut from_b = Vec::new();
    Traversal::new(&fx.db, &tx, &expander)
        .traverse(fx.b, |p| from_b.push(p.end().id))
        .await
        .unwrap();
    from_b.sort();
    assert_eq!(from_b, vec![fx.c, fx.e]);

    // a -> b is at time 1, before the window: nothing is reachable from a
    // except through a -> f (time 5).
    let mut from_a = Vec::new();
    Traversal::new(&fx.db, &tx, &expander)
        .traverse(fx.a, |p| from_a.push(p.end().id))
        .await
        .unwrap();
    from_a.sort();
    assert_eq!(from_a, vec![fx.f, fx.g]);
}

// ============================================================================
// 3. Custom schema names through the whole pipeline
// ============================================================================

#[tokio::test]
async fn test_custom_schema_names() {
    let config = contagion_rs::PropagationConfig::from_json(
        r#"{
            "schema": {
                "infected_label": "Positive",
                "target_label": "Case",
                "derivation_type": "CONTACT",
                "time_property": "at"
            }
        }"#,
    )
    .unwrap();
    let sink = Arc::new(MemorySink::new());
    let outbreak = Contagion::open_memory().await.unwrap()
        .with_config(config).unwrap()
        .with_sink(sink.clone());
    assert_eq!(outbreak.config().schema.derivation_type, "CONTACT");

    let backend = outbreak.backend();
    let mut tx = backend.begin_tx(TxMode::ReadWrite).await.unwrap();
    let src = backend.create_node(&mut tx, &["Positive", "Case"], PropertyMap::new()).await.unwrap();
    let dst = backend.create_node(&mut tx, &["Case"], PropertyMap::new()).await.unwrap();
    let ignored = backend.create_node(&mut tx, &["Case"], PropertyMap::new()).await.unwrap();
    backend.create_relationship(&mut tx, src, dst, "CONTACT", props([("at", 4)])).await.unwrap();
    backend.create_relationship(&mut tx, src, ignored, "OUTPUT", props([("time", 4)])).await.unwrap();
    backend.commit_tx(tx).await.unwrap();

    let report = outbreak.run_window(TimeWindow::new(0, 10).unwrap()).await;

    assert_eq!(report.delta.node_ids().collect::<Vec<_>>(), vec![dst]);
    assert_eq!(sink.len(), 1);
}

// ============================================================================
// 4. Date-time timestamps compare as epoch milliseconds
// ============================================================================

#[tokio::test]
async fn test_datetime_timestamps() {
    let outbreak = Contagion::open_memory().await.unwrap();
    let day = |d: u32| Utc.with_ymd_and_hms(2020, 3, d, 12, 0, 0).unwrap();

    let backend = outbreak.backend();
    let mut tx = backend.begin_tx(TxMode::ReadWrite).await.unwrap();
    let seed = backend.create_node(&mut tx, &["Infected", "Patient"], PropertyMap::new()).await.unwrap();
    let inside = backend.create_node(&mut tx, &["Patient"], PropertyMap::new()).await.unwrap();
    let outside = backend.create_node(&mut tx, &["Patient"], PropertyMap::new()).await.unwrap();
    backend.create_relationship(&mut tx, seed, inside, "OUTPUT", props([("time", day(2))])).await.unwrap();
    backend.create_relationship(&mut tx, seed, outside, "OUTPUT", props([("time", day(20))])).await.unwrap();
    backend.commit_tx(tx).await.unwrap();

    let window = TimeWindow::new(day(1).timestamp_millis(), day(10).timestamp_millis()).unwrap();
    let report = outbreak.run_window(window).await;

    assert!(report.is_success());
    assert_eq!(report.delta.node_ids().collect::<Vec<_>>(), vec![inside]);
}
