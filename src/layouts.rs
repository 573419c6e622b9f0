//! Built-in layouts
//!
//! Layouts render one event into one line; appenders own line termination.

use crate::core::event::LoggingEvent;
use crate::core::layout::Layout;
use crate::core::timestamp::TimestampFormat;

/// `LEVEL - message`, nothing else. Useful for tests and terse sinks.
#[derive(Debug, Clone, Default)]
pub struct SimpleLayout;

impl SimpleLayout {
    pub fn new() -> Self {
        Self
    }
}

impl Layout for SimpleLayout {
    fn format(&self, event: &LoggingEvent) -> String {
        format!("{} - {}", event.level(), event.message())
    }
}

/// Human-readable bracketed text:
/// `[timestamp] [LEVEL] thread logger - message key=value exception: ...`
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    timestamp_format: TimestampFormat,
}

impl TextLayout {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Set the timestamp format for this layout
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set a custom timestamp format using a strftime-compatible format string
    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }
}

impl Layout for TextLayout {
    fn format(&self, event: &LoggingEvent) -> String {
        let timestamp_str = self.timestamp_format.format(event.timestamp());
        let thread = event.thread_name().unwrap_or(event.thread_id()).to_string();

        let mut output = format!(
            "[{}] [{:5}] {} {} - {}",
            timestamp_str,
            event.level().to_str(),
            thread,
            event.logger_name(),
            event.message()
        );

        if !event.properties().is_empty() {
            output.push(' ');
            output.push_str(&event.properties().format_fields());
        }
        if let Some(exception) = event.exception() {
            output.push_str(" exception: ");
            output.push_str(exception);
        }

        output
    }
}

/// One JSON object per event.
///
/// Numeric timestamp formats serialize as JSON numbers, textual ones as
/// strings. Properties are flattened into the top-level object.
#[derive(Debug, Clone, Default)]
pub struct JsonLayout {
    timestamp_format: TimestampFormat,
    pretty: bool,
}

impl JsonLayout {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            pretty: false,
        }
    }

    /// Set the timestamp format for this layout
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Emit indented JSON instead of one line per event
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn timestamp_value(&self, event: &LoggingEvent) -> serde_json::Value {
        match self.timestamp_format {
            TimestampFormat::Unix => {
                serde_json::Value::Number(event.timestamp().timestamp().into())
            }
            TimestampFormat::UnixMillis => {
                serde_json::Value::Number(event.timestamp().timestamp_millis().into())
            }
            TimestampFormat::UnixMicros => {
                serde_json::Value::Number(event.timestamp().timestamp_micros().into())
            }
            _ => serde_json::Value::String(self.timestamp_format.format(event.timestamp())),
        }
    }
}

impl Layout for JsonLayout {
    fn format(&self, event: &LoggingEvent) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert("timestamp".to_string(), self.timestamp_value(event));
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(event.level().to_str().to_string()),
        );
        json_obj.insert(
            "logger".to_string(),
            serde_json::Value::String(event.logger_name().to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(event.message().to_string()),
        );
        json_obj.insert(
            "thread_id".to_string(),
            serde_json::Value::String(event.thread_id().to_string()),
        );
        if let Some(name) = event.thread_name() {
            json_obj.insert(
                "thread_name".to_string(),
                serde_json::Value::String(name.to_string()),
            );
        }
        if let Some(exception) = event.exception() {
            json_obj.insert(
                "exception".to_string(),
                serde_json::Value::String(exception.to_string()),
            );
        }
        for (key, value) in event.properties().fields() {
            json_obj.insert(key.clone(), value.to_json_value());
        }

        let value = serde_json::Value::Object(json_obj);
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        rendered.unwrap_or_default()
    }

    fn content_type(&self) -> &str {
        "application/json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::Level;
    use crate::core::properties::Properties;

    #[test]
    fn simple_layout_is_level_and_message() {
        let event = LoggingEvent::new("app", Level::WARN, "disk nearly full");
        assert_eq!(SimpleLayout::new().format(&event), "WARN - disk nearly full");
    }

    #[test]
    fn text_layout_includes_logger_and_properties() {
        let event = LoggingEvent::new("app.service", Level::INFO, "User logged in")
            .with_properties(Properties::new().with_property("user_id", 123));
        let line = TextLayout::new().format(&event);

        assert!(line.contains("[INFO ]"));
        assert!(line.contains("app.service"));
        assert!(line.contains("User logged in"));
        assert!(line.contains("user_id=123"));
        assert!(!line.ends_with('\n'));
    }

    #[test]
    fn text_layout_appends_exception() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let event = LoggingEvent::new("app", Level::ERROR, "write failed").with_exception(&err);
        let line = TextLayout::new().format(&event);
        assert!(line.contains("exception: disk on fire"));
    }

    #[test]
    fn json_layout_produces_parsable_objects() {
        let event = LoggingEvent::new("app.service", Level::ERROR, "Error occurred")
            .with_properties(Properties::new().with_property("request_id", "abc-123"));
        let result = JsonLayout::new().format(&event);

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["level"], "ERROR");
        assert_eq!(parsed["logger"], "app.service");
        assert_eq!(parsed["message"], "Error occurred");
        assert_eq!(parsed["request_id"], "abc-123");
        assert!(parsed["timestamp"].is_string());
    }

    #[test]
    fn json_layout_numeric_timestamps_are_numbers() {
        let event = LoggingEvent::new("app", Level::INFO, "msg");
        let result = JsonLayout::new()
            .with_timestamp_format(TimestampFormat::UnixMillis)
            .format(&event);

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert!(parsed["timestamp"].is_number());
    }

    #[test]
    fn json_layout_content_type() {
        assert_eq!(JsonLayout::new().content_type(), "application/json");
        assert_eq!(SimpleLayout::new().content_type(), "text/plain");
    }
}
