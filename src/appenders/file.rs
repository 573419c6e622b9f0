//! File appender implementation

use crate::core::appender::{Appender, ErrorHandler};
use crate::core::diagnostics;
use crate::core::error::{LoggerError, Result};
use crate::core::event::LoggingEvent;
use crate::core::filter::{run_filter_chain, Filter};
use crate::core::layout::Layout;
use crate::layouts::TextLayout;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Appends formatted events to a file through a buffered writer.
///
/// The writer sits behind a mutex so one instance can serve many loggers;
/// `close` takes the writer out, making the close observable and idempotent.
pub struct FileAppender {
    name: String,
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
    layout: Box<dyn Layout>,
    filters: Vec<Box<dyn Filter>>,
    error_handler: Option<ErrorHandler>,
}

impl std::fmt::Debug for FileAppender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAppender")
            .field("name", &self.name)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl FileAppender {
    /// Open `path` in append mode, creating it if needed
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::file_appender(path.display().to_string(), e.to_string())
            })?;

        Ok(Self {
            name: "file".to_string(),
            path,
            writer: Mutex::new(Some(BufWriter::new(file))),
            layout: Box::new(TextLayout::new()),
            filters: Vec::new(),
            error_handler: None,
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the layout
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hierarchical_logger_system::appenders::FileAppender;
    /// use hierarchical_logger_system::layouts::JsonLayout;
    ///
    /// let appender = FileAppender::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_layout(JsonLayout::new());
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

    fn io_error(&self, operation: &str, source: std::io::Error) -> LoggerError {
        LoggerError::io_operation(
            operation,
            format!("cannot write to '{}'", self.path.display()),
            source,
        )
    }
}

impl Appender for FileAppender {
    fn append(&self, event: &LoggingEvent) -> Result<()> {
        if !run_filter_chain(&self.filters, event) {
            return Ok(());
        }

        let mut line = self.layout.format(event);
        line.push('\n');

        let mut writer = self.writer.lock();
        let writer = writer
            .as_mut()
            .ok_or_else(|| LoggerError::appender_closed(&self.name))?;
        writer
            .write_all(line.as_bytes())
            .map_err(|e| self.io_error("appending", e))?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(writer) = self.writer.lock().as_mut() {
            writer.flush().map_err(|e| self.io_error("flushing", e))?;
        }
        Ok(())
    }

    fn close(&self) -> Result<()> {
        let writer = self.writer.lock().take();
        if let Some(mut writer) = writer {
            writer.flush().map_err(|e| self.io_error("flushing", e))?;
        }
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

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data reaches disk
        let _ = self.flush();
    }
}
