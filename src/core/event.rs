//! Logging event structure

use super::level::Level;
use super::properties::Properties;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::sync::OnceLock;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(format!("{:?}", std::thread::current().id()));
        }
        cache
            .as_ref()
            .expect("thread_id cache initialized in previous line")
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(std::thread::current().name().map(String::from));
        }
        cache
            .as_ref()
            .expect("thread_name cache initialized in previous line")
            .clone()
    })
}

/// An immutable snapshot of one accepted log call.
///
/// Everything cheap is captured at construction. Thread identity is lazy: it
/// materializes from whichever thread first asks for it, so synchronous
/// dispatch pays nothing for fields no layout reads. Appenders that buffer
/// events for another thread must call [`fix`](LoggingEvent::fix) first,
/// otherwise the worker thread's identity would be reported instead of the
/// emitting thread's.
///
/// Cloning preserves already-materialized fields.
#[derive(Debug, Clone)]
pub struct LoggingEvent {
    logger_name: String,
    level: Level,
    message: String,
    timestamp: DateTime<Utc>,
    exception: Option<String>,
    properties: Properties,
    thread_id: OnceLock<String>,
    thread_name: OnceLock<Option<String>>,
}

impl LoggingEvent {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log lines.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Render an error and its source chain into one line
    fn render_exception(error: &dyn std::error::Error) -> String {
        let mut rendered = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            rendered.push_str("; caused by: ");
            rendered.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::sanitize_message(&rendered)
    }

    pub fn new(logger_name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            logger_name: logger_name.into(),
            level,
            message: Self::sanitize_message(&message.into()),
            timestamp: Utc::now(),
            exception: None,
            properties: Properties::new(),
            thread_id: OnceLock::new(),
            thread_name: OnceLock::new(),
        }
    }

    /// Attach a rendered error chain
    pub fn with_exception(mut self, error: &dyn std::error::Error) -> Self {
        self.exception = Some(Self::render_exception(error));
        self
    }

    /// Attach per-event properties
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    pub fn exception(&self) -> Option<&str> {
        self.exception.as_deref()
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Thread ID, materialized on first access from the accessing thread
    pub fn thread_id(&self) -> &str {
        self.thread_id.get_or_init(get_thread_id)
    }

    /// Thread name, materialized on first access from the accessing thread
    pub fn thread_name(&self) -> Option<&str> {
        self.thread_name.get_or_init(get_thread_name).as_deref()
    }

    /// Eagerly materialize the lazy fields from the calling thread.
    ///
    /// Call before handing the event to another thread for delivery.
    pub fn fix(&self) {
        let _ = self.thread_id();
        let _ = self.thread_name();
    }
}
