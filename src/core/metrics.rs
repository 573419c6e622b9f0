//! Queue counters for the buffering appender

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters a buffering appender maintains about its queue.
///
/// All counters are relaxed atomics; reads are snapshots, not a consistent
/// cut. `Clone` takes such a snapshot.
///
/// # Example
///
/// ```
/// use hierarchical_logger_system::AppenderMetrics;
///
/// let metrics = AppenderMetrics::new();
/// metrics.record_forwarded();
/// metrics.record_dropped();
///
/// assert_eq!(metrics.total_forwarded(), 1);
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.drop_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct AppenderMetrics {
    dropped: AtomicU64,
    forwarded: AtomicU64,
    queue_full: AtomicU64,
    blocked: AtomicU64,
}

impl AppenderMetrics {
    pub const fn new() -> Self {
        Self {
            dropped: AtomicU64::new(0),
            forwarded: AtomicU64::new(0),
            queue_full: AtomicU64::new(0),
            blocked: AtomicU64::new(0),
        }
    }

    /// Events dropped by an overflow policy
    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Events accepted into the queue
    #[inline]
    pub fn total_forwarded(&self) -> u64 {
        self.forwarded.load(Ordering::Relaxed)
    }

    /// Times the queue was found full
    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full.load(Ordering::Relaxed)
    }

    /// Times a blocking policy made the caller wait
    #[inline]
    pub fn block_events(&self) -> u64 {
        self.blocked.load(Ordering::Relaxed)
    }

    /// Returns the previous dropped count.
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_forwarded(&self) -> u64 {
        self.forwarded.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queue_full(&self) -> u64 {
        self.queue_full.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.blocked.fetch_add(1, Ordering::Relaxed)
    }

    /// Dropped events as a percentage of everything offered. 0.0 when idle.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.total_forwarded() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.dropped.store(0, Ordering::Relaxed);
        self.forwarded.store(0, Ordering::Relaxed);
        self.queue_full.store(0, Ordering::Relaxed);
        self.blocked.store(0, Ordering::Relaxed);
    }
}

impl Default for AppenderMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for AppenderMetrics {
    fn clone(&self) -> Self {
        Self {
            dropped: AtomicU64::new(self.dropped_count()),
            forwarded: AtomicU64::new(self.total_forwarded()),
            queue_full: AtomicU64::new(self.queue_full_events()),
            blocked: AtomicU64::new(self.block_events()),
        }
    }
}
