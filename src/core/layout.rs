//! Layout trait for rendering events into output text

use super::event::LoggingEvent;

/// Renders one event into the string an appender writes.
///
/// Implementations return the line without a trailing newline; appenders own
/// line termination for their medium.
pub trait Layout: Send + Sync {
    fn format(&self, event: &LoggingEvent) -> String;

    fn content_type(&self) -> &str {
        "text/plain"
    }
}
