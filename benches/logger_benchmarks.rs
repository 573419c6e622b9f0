//! Criterion benchmarks for hierarchical_logger_system

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hierarchical_logger_system::prelude::*;
use std::sync::Arc;

// ============================================================================
// Hot Path Benchmarks
// ============================================================================

fn bench_enablement_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("enablement");
    group.throughput(Throughput::Elements(1));

    let hierarchy = Hierarchy::new("bench");
    let shallow = hierarchy.get_logger("app");
    let deep = hierarchy.get_logger("app.service.worker.queue.consumer");
    hierarchy.root().set_level(Some(Level::WARN));

    group.bench_function("enabled_shallow", |b| {
        b.iter(|| black_box(shallow.is_enabled_for(black_box(&Level::ERROR))));
    });

    group.bench_function("disabled_shallow", |b| {
        b.iter(|| black_box(shallow.is_enabled_for(black_box(&Level::DEBUG))));
    });

    // The whole inheritance walk happens per check for unassigned deep nodes.
    group.bench_function("disabled_deep_inherited", |b| {
        b.iter(|| black_box(deep.is_enabled_for(black_box(&Level::DEBUG))));
    });

    group.finish();
}

fn bench_disabled_log_call(c: &mut Criterion) {
    let mut group = c.benchmark_group("disabled_log");
    group.throughput(Throughput::Elements(1));

    let hierarchy = Hierarchy::new("bench");
    let logger = hierarchy.get_logger("app.service");
    logger.set_level(Some(Level::ERROR));

    group.bench_function("eager_message", |b| {
        b.iter(|| logger.debug(black_box("dropped before dispatch")));
    });

    group.bench_function("lazy_message", |b| {
        b.iter(|| logger.log_with(Level::DEBUG, || "never built".to_string()));
    });

    group.finish();
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let hierarchy = Hierarchy::new("bench");
    let capture = Arc::new(MemoryAppender::new("capture"));
    hierarchy
        .root()
        .add_appender(Arc::clone(&capture) as Arc<dyn Appender>);

    let direct = hierarchy.get_logger("app");
    let inherited = hierarchy.get_logger("app.service.worker");

    group.bench_function("direct_child_of_root", |b| {
        b.iter(|| direct.info(black_box("benchmark event")));
    });

    group.bench_function("three_levels_of_additivity", |b| {
        b.iter(|| inherited.info(black_box("benchmark event")));
    });

    group.finish();
    drop(capture);
}

fn bench_buffered_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffered_dispatch");
    group.throughput(Throughput::Elements(1));

    let hierarchy = Hierarchy::new("bench");
    let memory = Arc::new(MemoryAppender::new("sink"));
    let buffered = Arc::new(
        AsyncAppender::new("buffered", 65536).with_appender(Arc::clone(&memory) as Arc<dyn Appender>),
    );
    hierarchy.root().add_appender(buffered as Arc<dyn Appender>);
    let logger = hierarchy.get_logger("app");

    group.bench_function("enqueue", |b| {
        b.iter(|| logger.info(black_box("benchmark event")));
    });

    group.finish();
    hierarchy.shutdown();
}

// ============================================================================
// Hierarchy Benchmarks
// ============================================================================

fn bench_get_logger(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_logger");
    group.throughput(Throughput::Elements(1));

    let hierarchy = Hierarchy::new("bench");
    hierarchy.get_logger("app.service.worker");

    group.bench_function("existing_name", |b| {
        b.iter(|| black_box(hierarchy.get_logger(black_box("app.service.worker"))));
    });

    group.bench_function("mostly_fresh_names", |b| {
        // Bounded name pool so the node table does not grow without limit.
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            black_box(hierarchy.get_logger(&format!("fresh.node{}", counter % 10_000)))
        });
    });

    group.finish();
}

fn bench_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("layouts");
    group.throughput(Throughput::Elements(1));

    let event = LoggingEvent::new("app.service", Level::INFO, "benchmark event")
        .with_properties(Properties::new().with_property("request_id", "abc-123"));

    let text = TextLayout::new();
    let json = JsonLayout::new();

    group.bench_function("text", |b| {
        b.iter(|| black_box(text.format(black_box(&event))));
    });

    group.bench_function("json", |b| {
        b.iter(|| black_box(json.format(black_box(&event))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_enablement_check,
    bench_disabled_log_call,
    bench_dispatch,
    bench_buffered_dispatch,
    bench_get_logger,
    bench_layouts
);
criterion_main!(benches);
