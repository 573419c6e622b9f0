//! # Hierarchical Logger System
//!
//! A hierarchical logging framework: applications request named loggers from
//! a repository, assign levels and appenders at any point of the dot-named
//! tree, and every log call resolves its level and appender chain through
//! the ancestor walk.
//!
//! ## Features
//!
//! - **Named logger tree**: `get_logger("app.service")` creates and links
//!   nodes lazily, in any order
//! - **Level inheritance**: unassigned loggers inherit the nearest ancestor's
//!   level
//! - **Additive appenders**: events flow to ancestor appenders until a node
//!   opts out
//! - **Thread safe**: designed for concurrent logging and configuration
//! - **Pluggable**: appenders, layouts, and filters are open trait seams
//!
//! ## Quick start
//!
//! ```
//! use hierarchical_logger_system::prelude::*;
//! use std::sync::Arc;
//!
//! let hierarchy = Hierarchy::new("app");
//! let capture = Arc::new(MemoryAppender::new("capture"));
//! hierarchy.root().add_appender(Arc::clone(&capture) as Arc<dyn Appender>);
//!
//! let logger = hierarchy.get_logger("app.service");
//! logger.info("service started");
//!
//! assert_eq!(capture.messages(), vec!["service started"]);
//! ```

pub mod appenders;
pub mod config;
pub mod core;
pub mod filters;
pub mod layouts;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{AsyncAppender, ForwardingAppender, MemoryAppender};
    pub use crate::config::BasicConfigurator;
    pub use crate::core::{
        Appender, ContextGuard, ContextProperties, Filter, FilterDecision, Hierarchy, Layout,
        Level, Logger, LoggerError, LoggingEvent, OverflowCallback, OverflowPolicy, Properties,
        PropertyValue, RepositorySelector, Result, TimestampFormat,
    };
    pub use crate::filters::{DenyAllFilter, LevelMatchFilter, LevelRangeFilter};
    pub use crate::layouts::{JsonLayout, SimpleLayout, TextLayout};

    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;

    #[cfg(feature = "file")]
    pub use crate::appenders::FileAppender;
}

pub use crate::core::{
    Appender, AppenderMetrics, ContextGuard, ContextProperties, Filter, FilterDecision, Hierarchy,
    Layout, Level, Logger, LoggerError, LoggingEvent, OverflowCallback, OverflowPolicy,
    Properties, PropertyValue, RepositorySelector, Result, TimestampFormat, DEFAULT_REPOSITORY,
};

pub use crate::appenders::{AsyncAppender, ForwardingAppender, MemoryAppender};

#[cfg(feature = "console")]
pub use crate::appenders::ConsoleAppender;

#[cfg(feature = "file")]
pub use crate::appenders::FileAppender;
