//! In-memory capture appender

use crate::core::appender::{Appender, ErrorHandler};
use crate::core::diagnostics;
use crate::core::error::{LoggerError, Result};
use crate::core::event::LoggingEvent;
use crate::core::filter::{run_filter_chain, Filter};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Stores events instead of writing them anywhere.
///
/// Events are `fix()`ed before storage so the emitting thread's identity
/// survives later inspection from another thread. Handy as a configuration
/// probe and as the crate's own test double.
pub struct MemoryAppender {
    name: String,
    events: Mutex<Vec<LoggingEvent>>,
    filters: Vec<Box<dyn Filter>>,
    error_handler: Option<ErrorHandler>,
    closed: AtomicBool,
}

impl MemoryAppender {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Mutex::new(Vec::new()),
            filters: Vec::new(),
            error_handler: None,
            closed: AtomicBool::new(false),
        }
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

    /// Clones of every captured event, in capture order
    pub fn events(&self) -> Vec<LoggingEvent> {
        self.events.lock().clone()
    }

    /// Captured messages, in capture order
    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|e| e.message().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Discard everything captured so far
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&self, event: &LoggingEvent) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(LoggerError::appender_closed(&self.name));
        }
        if !run_filter_chain(&self.filters, event) {
            return Ok(());
        }
        // Capture thread identity before the event leaves the emitting thread.
        event.fix();
        self.events.lock().push(event.clone());
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
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
}
