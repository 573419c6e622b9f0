//! Fan-out container appender

use crate::core::appender::{Appender, ErrorHandler};
use crate::core::diagnostics;
use crate::core::error::{LoggerError, Result};
use crate::core::event::LoggingEvent;
use crate::core::filter::{run_filter_chain, Filter};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Forwards each accepted event to a list of child appenders.
///
/// Children get the same per-appender isolation the dispatch engine applies:
/// one child erroring or panicking never stops its siblings. Closing the
/// container does not close its children; the hierarchy's shutdown sees them
/// through [`nested`](Appender::nested) and closes them after the container.
pub struct ForwardingAppender {
    name: String,
    children: RwLock<Vec<Arc<dyn Appender>>>,
    filters: Vec<Box<dyn Filter>>,
    error_handler: Option<ErrorHandler>,
    closed: AtomicBool,
}

impl ForwardingAppender {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: RwLock::new(Vec::new()),
            filters: Vec::new(),
            error_handler: None,
            closed: AtomicBool::new(false),
        }
    }

    /// Add a child (builder form)
    #[must_use]
    pub fn with_appender(self, appender: Arc<dyn Appender>) -> Self {
        self.children.write().push(appender);
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

    pub fn add_appender(&self, appender: Arc<dyn Appender>) {
        self.children.write().push(appender);
    }

    /// Detach and return the first child with the given name
    pub fn remove_appender(&self, name: &str) -> Option<Arc<dyn Appender>> {
        let mut children = self.children.write();
        let index = children.iter().position(|a| a.name() == name)?;
        Some(children.remove(index))
    }

    fn forward(&self, child: &dyn Appender, event: &LoggingEvent) {
        let result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| child.append(event)));
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => child.handle_error(&e),
            Err(_) => {
                diagnostics::critical(&format!(
                    "Appender '{}' panicked inside '{}'. Other appenders continue to function.",
                    child.name(),
                    self.name
                ));
            }
        }
    }
}

impl Appender for ForwardingAppender {
    fn append(&self, event: &LoggingEvent) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(LoggerError::appender_closed(&self.name));
        }
        if !run_filter_chain(&self.filters, event) {
            return Ok(());
        }

        let children = self.children.read().clone();
        for child in &children {
            self.forward(child.as_ref(), event);
        }
        Ok(())
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

    fn nested(&self) -> Vec<Arc<dyn Appender>> {
        self.children.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::core::level::Level;

    struct PanickyAppender;

    impl Appender for PanickyAppender {
        fn append(&self, _event: &LoggingEvent) -> Result<()> {
            panic!("sink unavailable");
        }
        fn flush(&self) -> Result<()> {
            Ok(())
        }
        fn close(&self) -> Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "panicky"
        }
    }

    #[test]
    fn forwards_to_every_child() {
        let first = Arc::new(MemoryAppender::new("first"));
        let second = Arc::new(MemoryAppender::new("second"));
        let forwarding = ForwardingAppender::new("fanout")
            .with_appender(Arc::clone(&first) as Arc<dyn Appender>)
            .with_appender(Arc::clone(&second) as Arc<dyn Appender>);

        forwarding
            .append(&LoggingEvent::new("app", Level::INFO, "msg"))
            .unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn a_panicking_child_does_not_stop_siblings() {
        crate::core::diagnostics::set_quiet_mode(true);
        let survivor = Arc::new(MemoryAppender::new("survivor"));
        let forwarding = ForwardingAppender::new("fanout")
            .with_appender(Arc::new(PanickyAppender))
            .with_appender(Arc::clone(&survivor) as Arc<dyn Appender>);

        forwarding
            .append(&LoggingEvent::new("app", Level::ERROR, "msg"))
            .unwrap();
        crate::core::diagnostics::set_quiet_mode(false);
        assert_eq!(survivor.len(), 1);
    }

    #[test]
    fn nested_exposes_children_for_shutdown_ordering() {
        let child = Arc::new(MemoryAppender::new("child"));
        let forwarding =
            ForwardingAppender::new("fanout").with_appender(Arc::clone(&child) as Arc<dyn Appender>);

        let nested = forwarding.nested();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].name(), "child");
    }

    #[test]
    fn close_does_not_close_children() {
        let child = Arc::new(MemoryAppender::new("child"));
        let forwarding =
            ForwardingAppender::new("fanout").with_appender(Arc::clone(&child) as Arc<dyn Appender>);

        forwarding.close().unwrap();
        // The container rejects further appends, the child remains usable.
        assert!(forwarding
            .append(&LoggingEvent::new("app", Level::INFO, "late"))
            .is_err());
        child
            .append(&LoggingEvent::new("app", Level::INFO, "direct"))
            .unwrap();
        assert_eq!(child.len(), 1);
    }

    #[test]
    fn remove_appender_detaches_by_name() {
        let child = Arc::new(MemoryAppender::new("child"));
        let forwarding = ForwardingAppender::new("fanout");
        forwarding.add_appender(Arc::clone(&child) as Arc<dyn Appender>);

        assert!(forwarding.remove_appender("child").is_some());
        assert!(forwarding.remove_appender("child").is_none());
        assert!(forwarding.nested().is_empty());
    }
}
