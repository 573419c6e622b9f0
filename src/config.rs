//! Programmatic configuration helpers
//!
//! Configuration happens through the same public mutation entry points any
//! caller has: `get_logger`, `set_level`, `set_additivity`, `add_appender`.
//! [`BasicConfigurator`] packages the common shape of a configuration pass
//! behind a fluent builder; nothing here parses files.

use crate::core::appender::Appender;
use crate::core::hierarchy::Hierarchy;
use crate::core::level::Level;
use std::sync::Arc;

/// One logger's pending configuration inside a [`BasicConfigurator`] pass
struct LoggerConfig {
    name: String,
    level: Option<Level>,
    additive: Option<bool>,
    appenders: Vec<Arc<dyn Appender>>,
}

/// Applies a described configuration to a hierarchy in one pass.
///
/// # Example
///
/// ```
/// use hierarchical_logger_system::config::BasicConfigurator;
/// use hierarchical_logger_system::appenders::MemoryAppender;
/// use hierarchical_logger_system::core::{Hierarchy, Level};
/// use std::sync::Arc;
///
/// let hierarchy = Hierarchy::new("app");
/// BasicConfigurator::new()
///     .root_level(Level::INFO)
///     .root_appender(Arc::new(MemoryAppender::new("capture")))
///     .logger("app.security", |l| l.level(Level::WARN).additive(false))
///     .configure(&hierarchy);
///
/// assert_eq!(hierarchy.root().level(), Some(Level::INFO));
/// ```
pub struct BasicConfigurator {
    root_level: Option<Level>,
    root_appenders: Vec<Arc<dyn Appender>>,
    threshold: Option<Level>,
    loggers: Vec<LoggerConfig>,
}

impl BasicConfigurator {
    pub fn new() -> Self {
        Self {
            root_level: None,
            root_appenders: Vec::new(),
            threshold: None,
            loggers: Vec::new(),
        }
    }

    /// Assign the root logger's level
    #[must_use = "builder methods return a new value"]
    pub fn root_level(mut self, level: Level) -> Self {
        self.root_level = Some(level);
        self
    }

    /// Attach an appender to the root logger
    #[must_use = "builder methods return a new value"]
    pub fn root_appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.root_appenders.push(appender);
        self
    }

    /// Set the repository-wide threshold
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: Level) -> Self {
        self.threshold = Some(level);
        self
    }

    /// Describe one named logger's configuration
    #[must_use = "builder methods return a new value"]
    pub fn logger<F>(mut self, name: impl Into<String>, configure: F) -> Self
    where
        F: FnOnce(LoggerConfigBuilder) -> LoggerConfigBuilder,
    {
        let built = configure(LoggerConfigBuilder::new(name.into()));
        self.loggers.push(built.config);
        self
    }

    /// Apply the described configuration to `hierarchy`.
    ///
    /// Loggers are created on demand; already-existing loggers are mutated in
    /// place.
    pub fn configure(self, hierarchy: &Hierarchy) {
        if let Some(level) = self.root_level {
            hierarchy.root().set_level(Some(level));
        }
        for appender in self.root_appenders {
            hierarchy.root().add_appender(appender);
        }
        if let Some(level) = self.threshold {
            hierarchy.set_threshold(level);
        }

        for config in self.loggers {
            let logger = hierarchy.get_logger(&config.name);
            if let Some(level) = config.level {
                logger.set_level(Some(level));
            }
            if let Some(additive) = config.additive {
                logger.set_additivity(additive);
            }
            for appender in config.appenders {
                logger.add_appender(appender);
            }
        }
    }
}

impl Default for BasicConfigurator {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent description of one logger inside a configuration pass
pub struct LoggerConfigBuilder {
    config: LoggerConfig,
}

impl LoggerConfigBuilder {
    fn new(name: String) -> Self {
        Self {
            config: LoggerConfig {
                name,
                level: None,
                additive: None,
                appenders: Vec::new(),
            },
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.config.level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn additive(mut self, additive: bool) -> Self {
        self.config.additive = Some(additive);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.config.appenders.push(appender);
        self
    }
}
