//! Appender trait for log output destinations

use std::sync::Arc;

use super::{diagnostics, error::LoggerError, error::Result, event::LoggingEvent};

/// A configured error handler for one appender.
///
/// Receives every error that appender's `append` produced during dispatch.
pub type ErrorHandler = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// An output destination for logging events.
///
/// Appenders take `&self` and handle their own interior locking: one instance
/// is routinely shared by several loggers through `Arc<dyn Appender>`, and
/// shutdown relies on that pointer identity to close each instance exactly
/// once.
pub trait Appender: Send + Sync {
    /// Deliver one event. Called only for events that passed the owning
    /// logger's enablement checks; the appender's own filter chain is
    /// evaluated inside.
    fn append(&self, event: &LoggingEvent) -> Result<()>;

    /// Flush buffered output to the underlying medium
    fn flush(&self) -> Result<()>;

    /// Release resources. Must be idempotent; append after close returns
    /// `LoggerError::AppenderClosed`.
    fn close(&self) -> Result<()>;

    fn name(&self) -> &str;

    /// Invoked by the dispatch engine when `append` returns an error.
    ///
    /// The default reports to the diagnostic channel. Implementations with a
    /// configured error handler override this to route failures there
    /// instead; dispatch never propagates the error either way.
    fn handle_error(&self, error: &LoggerError) {
        diagnostics::error(&format!("Appender '{}' failed: {}", self.name(), error));
    }

    /// Appenders this appender forwards to, if it is a container.
    ///
    /// Shutdown uses this to close wrapping appenders before the appenders
    /// they wrap. Leaf appenders return an empty list.
    fn nested(&self) -> Vec<Arc<dyn Appender>> {
        Vec::new()
    }
}
