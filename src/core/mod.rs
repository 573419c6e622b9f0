//! Core hierarchy and dispatch types

pub mod appender;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod filter;
pub mod hierarchy;
pub mod layout;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod properties;
pub mod selector;
pub mod timestamp;

pub use appender::{Appender, ErrorHandler};
pub use error::{LoggerError, Result};
pub use event::LoggingEvent;
pub use filter::{Filter, FilterDecision};
pub use hierarchy::Hierarchy;
pub use layout::Layout;
pub use level::Level;
pub use logger::Logger;
pub use metrics::AppenderMetrics;
pub use overflow_policy::{OverflowCallback, OverflowPolicy};
pub use properties::{ContextGuard, ContextProperties, Properties, PropertyValue};
pub use selector::{RepositorySelector, DEFAULT_REPOSITORY};
pub use timestamp::TimestampFormat;
