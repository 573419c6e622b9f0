//! Log level definitions

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::core::error::LoggerError;

/// A named severity with an integer ordinal.
///
/// Levels are plain values: two levels with the same ordinal are equal and
/// hash identically regardless of name, so custom levels slot into the
/// ordering next to the predefined ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    value: i32,
    name: Cow<'static, str>,
}

impl Level {
    /// Matches every event. Lowest possible ordinal.
    pub const ALL: Level = Level {
        value: i32::MIN,
        name: Cow::Borrowed("ALL"),
    };
    pub const DEBUG: Level = Level {
        value: 30_000,
        name: Cow::Borrowed("DEBUG"),
    };
    pub const INFO: Level = Level {
        value: 40_000,
        name: Cow::Borrowed("INFO"),
    };
    pub const WARN: Level = Level {
        value: 60_000,
        name: Cow::Borrowed("WARN"),
    };
    pub const ERROR: Level = Level {
        value: 70_000,
        name: Cow::Borrowed("ERROR"),
    };
    pub const FATAL: Level = Level {
        value: 110_000,
        name: Cow::Borrowed("FATAL"),
    };
    /// Matches no event. Highest possible ordinal.
    pub const OFF: Level = Level {
        value: i32::MAX,
        name: Cow::Borrowed("OFF"),
    };

    /// Creates a custom level with an arbitrary ordinal.
    pub fn new(name: impl Into<Cow<'static, str>>, value: i32) -> Self {
        Level {
            value,
            name: name.into(),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn to_str(&self) -> &str {
        &self.name
    }

    /// True when an event at `self` passes a gate set to `gate`.
    pub fn is_at_least(&self, gate: &Level) -> bool {
        self.value >= gate.value
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self.value {
            v if v >= Self::FATAL.value => BrightRed,
            v if v >= Self::ERROR.value => Red,
            v if v >= Self::WARN.value => Yellow,
            v if v >= Self::INFO.value => Green,
            v if v >= Self::DEBUG.value => Blue,
            _ => BrightBlack,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::DEBUG
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Level {}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for Level {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ALL" => Ok(Level::ALL),
            "DEBUG" => Ok(Level::DEBUG),
            "INFO" => Ok(Level::INFO),
            "WARN" | "WARNING" => Ok(Level::WARN),
            "ERROR" => Ok(Level::ERROR),
            "FATAL" => Ok(Level::FATAL),
            "OFF" => Ok(Level::OFF),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}
