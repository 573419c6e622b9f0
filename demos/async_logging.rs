//! Buffered logging example
//!
//! Demonstrates the buffering container appender: bounded queue, overflow
//! policy, metrics, and drain-on-shutdown.
//!
//! Run with: cargo run --example async_logging

use hierarchical_logger_system::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Hierarchical Logger System - Buffered Logging Example ===\n");

    let dir = std::env::temp_dir();
    let log_path = dir.join("hierarchical_logger_demo.log");

    let file = Arc::new(
        FileAppender::new(&log_path)?
            .with_name("demo-file")
            .with_layout(JsonLayout::new()),
    );

    // The buffering container decouples log calls from file I/O. Drops are
    // reported through the overflow callback.
    let buffered = Arc::new(
        AsyncAppender::new("buffered", 1024)
            .with_appender(Arc::clone(&file) as Arc<dyn Appender>)
            .with_overflow_policy(OverflowPolicy::AlertAndDrop)
            .with_on_overflow(Arc::new(|count| {
                eprintln!("ALERT: {} events dropped so far", count);
            })),
    );

    let hierarchy = Hierarchy::new("async-demo");
    hierarchy.context().set("service", "demo");
    hierarchy
        .root()
        .add_appender(Arc::clone(&buffered) as Arc<dyn Appender>);

    println!("1. Logging 1000 events through the buffer:");
    let logger = hierarchy.get_logger("demo.producer");
    for i in 0..1000 {
        logger.info(format!("event {}", i));
    }

    println!("   queued: {}", buffered.metrics().total_forwarded());
    println!("   dropped: {}", buffered.metrics().dropped_count());

    println!("\n2. Shutting down (drains the queue into the file):");
    hierarchy.shutdown();

    let written = std::fs::read_to_string(&log_path)?;
    println!("   {} lines written to {}", written.lines().count(), log_path.display());

    std::fs::remove_file(&log_path).ok();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
