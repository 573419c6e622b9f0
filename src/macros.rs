//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Formatting is
//! gated on the logger's enablement check, so a disabled call never builds
//! its message.
//!
//! # Examples
//!
//! ```
//! use hierarchical_logger_system::prelude::*;
//! use hierarchical_logger_system::info;
//!
//! let hierarchy = Hierarchy::new("app");
//! let logger = hierarchy.get_logger("app.server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level with automatic formatting.
///
/// The format arguments are only evaluated when the logger is enabled for
/// the level.
///
/// # Examples
///
/// ```
/// # use hierarchical_logger_system::prelude::*;
/// # let hierarchy = Hierarchy::new("app");
/// # let logger = hierarchy.get_logger("app");
/// use hierarchical_logger_system::log;
/// log!(logger, Level::INFO, "Simple message");
/// log!(logger, Level::ERROR, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let level = $level;
        if $logger.is_enabled_for(&level) {
            $logger.log(level, format!($($arg)+));
        }
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use hierarchical_logger_system::prelude::*;
/// # let hierarchy = Hierarchy::new("app");
/// # let logger = hierarchy.get_logger("app");
/// use hierarchical_logger_system::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use hierarchical_logger_system::prelude::*;
/// # let hierarchy = Hierarchy::new("app");
/// # let logger = hierarchy.get_logger("app");
/// use hierarchical_logger_system::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use hierarchical_logger_system::prelude::*;
/// # let hierarchy = Hierarchy::new("app");
/// # let logger = hierarchy.get_logger("app");
/// use hierarchical_logger_system::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::WARN, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use hierarchical_logger_system::prelude::*;
/// # let hierarchy = Hierarchy::new("app");
/// # let logger = hierarchy.get_logger("app");
/// use hierarchical_logger_system::error;
/// error!(logger, "Connection failed");
/// error!(logger, "HTTP {} from upstream", 502);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::ERROR, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use hierarchical_logger_system::prelude::*;
/// # let hierarchy = Hierarchy::new("app");
/// # let logger = hierarchy.get_logger("app");
/// use hierarchical_logger_system::fatal;
/// fatal!(logger, "Out of memory, aborting");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::FATAL, $($arg)+)
    };
}
