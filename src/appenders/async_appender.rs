//! Buffering container appender with a worker thread

use crate::core::appender::{Appender, ErrorHandler};
use crate::core::diagnostics;
use crate::core::error::{LoggerError, Result};
use crate::core::event::LoggingEvent;
use crate::core::filter::{run_filter_chain, Filter};
use crate::core::metrics::AppenderMetrics;
use crate::core::overflow_policy::{OverflowCallback, OverflowPolicy};
use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default time close() waits for the worker to drain the queue
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

// Batch processing: collect multiple events before delivering to reduce
// lock contention and I/O operations on the worker thread.
const BATCH_SIZE: usize = 50;
const BATCH_TIMEOUT_MS: u64 = 10;

/// Decouples dispatch from slow sinks through a bounded queue.
///
/// `append` fixes the event's lazy fields, then hands it to a worker thread
/// that delivers batches to the wrapped appenders with the same per-appender
/// isolation the dispatch engine uses. A full queue is resolved by the
/// configured [`OverflowPolicy`]; drops are counted in [`AppenderMetrics`].
///
/// `close` stops accepting events, waits up to the shutdown timeout for the
/// worker to drain, and flushes. The wrapped appenders stay open: the
/// hierarchy's shutdown reaches them through [`nested`](Appender::nested)
/// and closes them after this container, so the drain lands in open sinks.
pub struct AsyncAppender {
    name: String,
    children: Arc<RwLock<Vec<Arc<dyn Appender>>>>,
    filters: Vec<Box<dyn Filter>>,
    sender: Mutex<Option<Sender<LoggingEvent>>>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    metrics: Arc<AppenderMetrics>,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
    error_handler: Option<ErrorHandler>,
    shutdown_timeout: Duration,
}

impl AsyncAppender {
    /// Start the worker thread with a queue holding up to `buffer_size`
    /// events.
    pub fn new(name: impl Into<String>, buffer_size: usize) -> Self {
        let name = name.into();
        let (sender, receiver) = bounded::<LoggingEvent>(buffer_size);
        let children: Arc<RwLock<Vec<Arc<dyn Appender>>>> = Arc::new(RwLock::new(Vec::new()));
        let children_clone = Arc::clone(&children);

        let worker = thread::spawn(move || {
            let mut batch = Vec::with_capacity(BATCH_SIZE);

            loop {
                // Blocking receive for the first event of a batch.
                match receiver.recv() {
                    Ok(event) => batch.push(event),
                    Err(_) => {
                        // Channel closed, flush remaining batch and exit.
                        if !batch.is_empty() {
                            Self::deliver_batch(&children_clone, &batch);
                        }
                        break;
                    }
                }

                // Collect whatever else is already queued, up to BATCH_SIZE.
                while batch.len() < BATCH_SIZE {
                    match receiver.try_recv() {
                        Ok(event) => batch.push(event),
                        Err(_) => break,
                    }
                }

                if batch.len() >= BATCH_SIZE {
                    Self::deliver_batch(&children_clone, &batch);
                    batch.clear();
                } else {
                    // Small batch: wait briefly for company before writing.
                    thread::sleep(Duration::from_millis(BATCH_TIMEOUT_MS));
                    while batch.len() < BATCH_SIZE {
                        match receiver.try_recv() {
                            Ok(event) => batch.push(event),
                            Err(_) => break,
                        }
                    }
                    Self::deliver_batch(&children_clone, &batch);
                    batch.clear();
                }
            }
        });

        Self {
            name,
            children,
            filters: Vec::new(),
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
            metrics: Arc::new(AppenderMetrics::new()),
            overflow_policy: OverflowPolicy::default(),
            on_overflow: None,
            error_handler: None,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }

    /// Wrap an appender (builder form)
    #[must_use]
    pub fn with_appender(self, appender: Arc<dyn Appender>) -> Self {
        self.children.write().push(appender);
        self
    }

    #[must_use]
    pub fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Called with the running drop count whenever an alerting policy drops
    /// events
    #[must_use]
    pub fn with_on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    /// Append a filter to this appender's chain
    #[must_use]
    pub fn with_filter<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Route this appender's errors to a handler instead of the diagnostic
    /// channel
    #[must_use]
    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handler = Some(handler);
        self
    }

    /// How long close() waits for the worker to drain
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    pub fn add_appender(&self, appender: Arc<dyn Appender>) {
        self.children.write().push(appender);
    }

    /// Queue counters; drops and blocks show up here
    pub fn metrics(&self) -> &AppenderMetrics {
        &self.metrics
    }

    /// Deliver one batch with per-appender isolation, then flush.
    fn deliver_batch(children: &Arc<RwLock<Vec<Arc<dyn Appender>>>>, batch: &[LoggingEvent]) {
        let snapshot = children.read().clone();

        for event in batch {
            for child in &snapshot {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    child.append(event)
                }));
                match result {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => child.handle_error(&e),
                    Err(_) => {
                        diagnostics::critical(&format!(
                            "Appender '{}' panicked during buffered delivery. \
                             Other appenders continue to function.",
                            child.name()
                        ));
                    }
                }
            }
        }

        // Flush after each batch so buffered sinks see timely writes.
        for child in &snapshot {
            let result =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| child.flush()));
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => child.handle_error(&e),
                Err(_) => {
                    diagnostics::critical(&format!(
                        "Appender '{}' panicked during flush.",
                        child.name()
                    ));
                }
            }
        }
    }

    fn handle_overflow(&self, sender: &Sender<LoggingEvent>, event: LoggingEvent) {
        self.metrics.record_queue_full();

        match &self.overflow_policy {
            OverflowPolicy::DropNewest => {
                self.metrics.record_dropped();
            }
            OverflowPolicy::Block => {
                self.metrics.record_block();
                let _ = sender.send(event);
            }
            OverflowPolicy::BlockWithTimeout(timeout) => {
                self.metrics.record_block();
                match sender.send_timeout(event, *timeout) {
                    Ok(()) => {}
                    Err(crossbeam_channel::SendTimeoutError::Timeout(_)) => {
                        self.alert_and_drop();
                    }
                    Err(crossbeam_channel::SendTimeoutError::Disconnected(_)) => {}
                }
            }
            OverflowPolicy::AlertAndDrop => {
                self.alert_and_drop();
            }
        }
    }

    fn alert_and_drop(&self) {
        let dropped_before = self.metrics.record_dropped();
        let dropped = dropped_before + 1;

        // Alert on the first drop and every 1000 thereafter.
        if dropped_before == 0 || dropped % 1000 == 0 {
            diagnostics::warning(&format!(
                "Appender '{}' queue full, {} events dropped. \
                 Consider increasing the buffer size or using a different overflow policy.",
                self.name, dropped
            ));
            if let Some(ref callback) = self.on_overflow {
                callback(dropped);
            }
        }
    }

    /// Signal the worker and wait up to the shutdown timeout for the queue
    /// to drain. Returns false on timeout or a worker panic.
    fn drain(&self) -> bool {
        drop(self.sender.lock().take());

        let Some(handle) = self.worker.lock().take() else {
            return true;
        };

        let start = std::time::Instant::now();
        loop {
            if handle.is_finished() {
                if handle.join().is_err() {
                    diagnostics::error(&format!(
                        "Appender '{}' worker thread panicked during shutdown.",
                        self.name
                    ));
                    return false;
                }
                return true;
            }
            if start.elapsed() >= self.shutdown_timeout {
                diagnostics::warning(&format!(
                    "Appender '{}' worker did not finish within {:?}. \
                     Some events may be lost.",
                    self.name, self.shutdown_timeout
                ));
                return false;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Appender for AsyncAppender {
    fn append(&self, event: &LoggingEvent) -> Result<()> {
        if !run_filter_chain(&self.filters, event) {
            return Ok(());
        }

        // Clone the sender out so a blocking overflow policy never pins the
        // lock against other emitters or a concurrent close.
        let sender = {
            let guard = self.sender.lock();
            let Some(sender) = guard.as_ref() else {
                return Err(LoggerError::appender_closed(&self.name));
            };
            sender.clone()
        };

        // The worker thread must report the emitting thread's identity.
        event.fix();

        match sender.try_send(event.clone()) {
            Ok(()) => {
                self.metrics.record_forwarded();
                Ok(())
            }
            Err(TrySendError::Full(event)) => {
                self.handle_overflow(&sender, event);
                Ok(())
            }
            // Worker gone mid-close; nothing left to deliver to.
            Err(TrySendError::Disconnected(_)) => Ok(()),
        }
    }

    fn flush(&self) -> Result<()> {
        let children = self.children.read().clone();
        for child in &children {
            if let Err(e) = child.flush() {
                child.handle_error(&e);
            }
        }
        Ok(())
    }

    fn close(&self) -> Result<()> {
        if self.sender.lock().is_none() {
            return Ok(());
        }
        if !self.drain() {
            return Err(LoggerError::other(format!(
                "Appender '{}' did not drain within {:?}",
                self.name, self.shutdown_timeout
            )));
        }
        self.flush()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn handle_error(&self, error: &LoggerError) {
        match &self.error_handler {
            Some(handler) => handler(error),
            None => diagnostics::error(&format!("Appender '{}' failed: {}", self.name, error)),
        }
    }

    fn nested(&self) -> Vec<Arc<dyn Appender>> {
        self.children.read().clone()
    }
}

impl Drop for AsyncAppender {
    fn drop(&mut self) {
        self.drain();

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            diagnostics::warning(&format!(
                "Appender '{}' shutting down with {} dropped events (drop rate: {:.2}%).",
                self.name,
                dropped,
                self.metrics.drop_rate()
            ));
        }
    }
}
