//! Basic logger usage example
//!
//! Demonstrates requesting loggers from a hierarchy, levels, and console
//! output.
//!
//! Run with: cargo run --example basic_usage

use hierarchical_logger_system::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Hierarchical Logger System - Basic Usage Example ===\n");

    // One hierarchy owns the whole logger tree.
    let hierarchy = Hierarchy::new("basic");

    // Attach a console appender to the root: every additive logger below
    // root delivers there.
    hierarchy
        .root()
        .add_appender(Arc::new(ConsoleAppender::new()));

    let logger = hierarchy.get_logger("demo.basic");

    // Log messages at different levels
    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");

    println!("\n2. Raising the level:");
    logger.set_level(Some(Level::WARN));
    println!("   Level set to WARN - debug and info won't show:");
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");
    logger.error("Error message (visible)");

    println!("\n3. Structured properties:");
    logger.set_level(None);
    logger.info_with_properties(
        "User logged in",
        Properties::new()
            .with_property("user_id", 42)
            .with_property("method", "oauth"),
    );

    hierarchy.shutdown();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
