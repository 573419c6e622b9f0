//! Logger hierarchy example
//!
//! Demonstrates level inheritance, additivity, and out-of-order creation.
//!
//! Run with: cargo run --example hierarchy_usage

use hierarchical_logger_system::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Hierarchical Logger System - Hierarchy Example ===\n");

    let hierarchy = Hierarchy::new("hierarchy-demo");
    hierarchy
        .root()
        .add_appender(Arc::new(ConsoleAppender::new().with_name("root-console")));

    println!("1. Level inheritance:");
    // Created before its ancestors, with no level of its own.
    let dog = hierarchy.get_logger("animals.carnivora.dog");
    println!(
        "   effective level of '{}' before ancestors exist: {}",
        dog.name(),
        dog.effective_level()
    );

    // The ancestor materializes later; the child re-routes through it.
    let animals = hierarchy.get_logger("animals");
    animals.set_level(Some(Level::WARN));
    println!(
        "   effective level of '{}' after 'animals' is set to WARN: {}",
        dog.name(),
        dog.effective_level()
    );

    dog.info("hidden: WARN is inherited");
    dog.warn("visible: at the inherited level");

    println!("\n2. Additivity:");
    // The security subtree keeps its events to itself.
    let security = hierarchy.get_logger("security");
    security.add_appender(Arc::new(
        ConsoleAppender::new().with_name("security-console"),
    ));
    security.set_additivity(false);
    security.error("delivered once, to the security appender only");

    let audit = hierarchy.get_logger("app.audit");
    audit.error("delivered to the root appender through additivity");

    println!("\n3. Configuration in one pass:");
    BasicConfigurator::new()
        .root_level(Level::INFO)
        .logger("app.verbose", |l| l.level(Level::DEBUG))
        .configure(&hierarchy);

    hierarchy.get_logger("app.quiet").debug("hidden: root is INFO");
    hierarchy
        .get_logger("app.verbose")
        .debug("visible: assigned DEBUG beats the inherited INFO");

    hierarchy.shutdown();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
