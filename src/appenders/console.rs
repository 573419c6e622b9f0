//! Console appender implementation

use crate::core::appender::{Appender, ErrorHandler};
use crate::core::diagnostics;
use crate::core::error::{LoggerError, Result};
use crate::core::event::LoggingEvent;
use crate::core::filter::{run_filter_chain, Filter};
use crate::core::layout::Layout;
use crate::core::level::Level;
use crate::layouts::TextLayout;
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes events to the terminal: ERROR and above to stderr, the rest to
/// stdout. Colors the whole line by level when enabled.
pub struct ConsoleAppender {
    name: String,
    layout: Box<dyn Layout>,
    filters: Vec<Box<dyn Filter>>,
    use_colors: bool,
    error_handler: Option<ErrorHandler>,
    closed: AtomicBool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            name: "console".to_string(),
            layout: Box::new(TextLayout::new()),
            filters: Vec::new(),
            use_colors: true,
            error_handler: None,
            closed: AtomicBool::new(false),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        let mut appender = Self::new();
        appender.use_colors = use_colors;
        appender
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the layout
    ///
    /// # Example
    ///
    /// ```
    /// use hierarchical_logger_system::appenders::ConsoleAppender;
    /// use hierarchical_logger_system::layouts::JsonLayout;
    ///
    /// let appender = ConsoleAppender::new().with_layout(JsonLayout::new());
    /// ```
    #[must_use]
    pub fn with_layout<L: Layout + 'static>(mut self, layout: L) -> Self {
        self.layout = Box::new(layout);
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
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&self, event: &LoggingEvent) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(LoggerError::appender_closed(&self.name));
        }
        if !run_filter_chain(&self.filters, event) {
            return Ok(());
        }

        let line = self.layout.format(event);
        let line = if self.use_colors {
            line.color(event.level().color_code()).to_string()
        } else {
            line
        };

        if event.level().is_at_least(&Level::ERROR) {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        use std::io::Write;
        // Both streams, since ERROR and above go to stderr
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
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
}
