//! Timestamp rendering for layouts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a layout renders an event's timestamp.
///
/// Defaults to ISO 8601 with milliseconds, which the usual aggregation
/// targets (Elasticsearch, Splunk, Loki) all parse.
///
/// # Examples
///
/// ```
/// use hierarchical_logger_system::core::TimestampFormat;
/// use chrono::Utc;
///
/// let rendered = TimestampFormat::Iso8601.format(&Utc::now());
/// assert!(rendered.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// `2025-01-08T10:30:45.123456Z`, for ordering concurrent events
    Iso8601Micros,

    /// `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Seconds since the epoch: `1736332245`
    Unix,

    /// Milliseconds since the epoch: `1736332245123`
    UnixMillis,

    /// Microseconds since the epoch: `1736332245123456`
    UnixMicros,

    /// Any strftime-compatible format string, e.g.
    /// `"%d/%b/%Y:%H:%M:%S %z"` for Apache-style access logs
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// True for the epoch-based formats. The JSON layout serializes these as
    /// numbers rather than strings.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }
}
