//! Stress tests for concurrent hierarchy access
//!
//! These tests verify:
//! - Concurrent get_logger calls converge on one instance per name
//! - Concurrent creation and re-linking keep the tree consistent
//! - Lock-free level walks never see a half-wired intermediate node
//! - Logging concurrent with configuration changes never loses linkage
//! - High-volume dispatch through the buffered container drains completely

use hierarchical_logger_system::appenders::{AsyncAppender, MemoryAppender};
use hierarchical_logger_system::core::{Appender, Hierarchy, Level, OverflowPolicy};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn concurrent_get_logger_returns_one_instance_per_name() {
    let hierarchy = Arc::new(Hierarchy::new("stress"));
    let names: Vec<String> = (0..16).map(|i| format!("worker.pool.{}", i % 4)).collect();

    let handles: Vec<_> = names
        .into_iter()
        .map(|name| {
            let hierarchy = Arc::clone(&hierarchy);
            thread::spawn(move || {
                let mut loggers = Vec::new();
                for _ in 0..500 {
                    loggers.push(hierarchy.get_logger(&name));
                }
                loggers
            })
        })
        .collect();

    let mut by_name: std::collections::HashMap<String, Arc<_>> = std::collections::HashMap::new();
    for handle in handles {
        for logger in handle.join().expect("worker panicked") {
            let existing = by_name
                .entry(logger.name().to_string())
                .or_insert_with(|| Arc::clone(&logger));
            assert!(Arc::ptr_eq(existing, &logger));
        }
    }
    assert_eq!(by_name.len(), 4);
}

#[test]
fn concurrent_out_of_order_creation_keeps_linkage_consistent() {
    let hierarchy = Arc::new(Hierarchy::new("stress"));

    // Interleave creating deep descendants with creating their ancestors.
    let deep_names: Vec<String> = (0..8)
        .map(|i| format!("tree.branch{}.leaf.node", i))
        .collect();
    let ancestor_names: Vec<String> = (0..8).map(|i| format!("tree.branch{}", i)).collect();

    let mut handles = Vec::new();
    for name in deep_names.iter().chain(ancestor_names.iter()).cloned() {
        let hierarchy = Arc::clone(&hierarchy);
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                hierarchy.get_logger(&name);
            }
        }));
    }
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    // Every deep node must now route through its materialized ancestor.
    for i in 0..8 {
        let deep = hierarchy.get_logger(&format!("tree.branch{}.leaf.node", i));
        let ancestor = hierarchy.get_logger(&format!("tree.branch{}", i));
        ancestor.set_level(Some(Level::ERROR));
        assert_eq!(deep.effective_level(), Level::ERROR);
        assert!(Arc::ptr_eq(&deep.parent().unwrap(), &ancestor));
    }
}

#[test]
fn readers_never_observe_a_partially_linked_ancestor() {
    let hierarchy = Arc::new(Hierarchy::new("stress"));
    hierarchy.root().set_level(Some(Level::ERROR));

    // Leaves first, so creating each mid node re-links them mid-flight.
    let leaves: Vec<_> = (0..4000)
        .map(|i| hierarchy.get_logger(&format!("ns{}.mid.leaf", i)))
        .collect();

    let stop = Arc::new(AtomicBool::new(false));
    let violations = Arc::new(AtomicU64::new(0));
    let readers: Vec<_> = (0..3)
        .map(|_| {
            let leaves = leaves.clone();
            let stop = Arc::clone(&stop);
            let violations = Arc::clone(&violations);
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    for leaf in &leaves {
                        // No node on the chain assigns a level, so the walk
                        // must always reach root's ERROR.
                        if leaf.effective_level() != Level::ERROR {
                            violations.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            })
        })
        .collect();

    for i in 0..4000 {
        hierarchy.get_logger(&format!("ns{}.mid", i));
    }

    stop.store(true, Ordering::Relaxed);
    for handle in readers {
        handle.join().expect("reader panicked");
    }
    assert_eq!(violations.load(Ordering::Relaxed), 0);
}

#[test]
fn logging_concurrent_with_configuration_never_drops_linkage() {
    let hierarchy = Arc::new(Hierarchy::new("stress"));
    let capture = Arc::new(MemoryAppender::new("capture"));
    hierarchy
        .root()
        .add_appender(Arc::clone(&capture) as Arc<dyn Appender>);

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let hierarchy = Arc::clone(&hierarchy);
            thread::spawn(move || {
                let logger = hierarchy.get_logger("app.writer");
                for i in 0..250 {
                    logger.info(format!("thread {} event {}", t, i));
                }
            })
        })
        .collect();

    let configurator = {
        let hierarchy = Arc::clone(&hierarchy);
        thread::spawn(move || {
            for i in 0..100 {
                // Churn the tree around the writer's node while it logs.
                hierarchy.get_logger(&format!("app.other{}", i));
                let logger = hierarchy.get_logger("app.writer");
                logger.set_level(Some(Level::DEBUG));
            }
        })
    };

    for handle in writers {
        handle.join().expect("writer panicked");
    }
    configurator.join().expect("configurator panicked");

    // Root stayed reachable through every tree mutation.
    assert_eq!(capture.len(), 1000);
}

#[test]
fn buffered_container_drains_under_concurrent_load() {
    let memory = Arc::new(MemoryAppender::new("sink"));
    let buffered = Arc::new(
        AsyncAppender::new("buffered", 4096)
            .with_appender(Arc::clone(&memory) as Arc<dyn Appender>)
            .with_overflow_policy(OverflowPolicy::Block),
    );

    let hierarchy = Arc::new(Hierarchy::new("stress"));
    hierarchy
        .root()
        .add_appender(Arc::clone(&buffered) as Arc<dyn Appender>);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let hierarchy = Arc::clone(&hierarchy);
            thread::spawn(move || {
                let logger = hierarchy.get_logger(&format!("load.thread{}", t));
                for i in 0..500 {
                    logger.info(format!("event {}", i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    hierarchy.shutdown();

    assert_eq!(memory.len(), 2000);
    assert_eq!(buffered.metrics().dropped_count(), 0);
}
