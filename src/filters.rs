//! Built-in filters
//!
//! Filters attach to appenders and form chains: the first `Deny` or `Accept`
//! wins, `Neutral` defers to the next filter, and a chain that runs out of
//! filters accepts. `DenyAllFilter` at the end of a chain flips that default,
//! turning the chain into a whitelist.

use crate::core::event::LoggingEvent;
use crate::core::filter::{Filter, FilterDecision};
use crate::core::level::Level;

/// Accepts or denies events by level range.
///
/// Events below `min` or above `max` are denied. Events inside the range are
/// accepted when `accept_on_match` is set (the default), or passed to the
/// next filter otherwise.
#[derive(Debug, Clone)]
pub struct LevelRangeFilter {
    min: Option<Level>,
    max: Option<Level>,
    accept_on_match: bool,
}

impl LevelRangeFilter {
    pub fn new() -> Self {
        Self {
            min: None,
            max: None,
            accept_on_match: true,
        }
    }

    #[must_use]
    pub fn with_min(mut self, min: Level) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: Level) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_accept_on_match(mut self, accept: bool) -> Self {
        self.accept_on_match = accept;
        self
    }
}

impl Default for LevelRangeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LevelRangeFilter {
    fn decide(&self, event: &LoggingEvent) -> FilterDecision {
        if let Some(min) = &self.min {
            if event.level() < min {
                return FilterDecision::Deny;
            }
        }
        if let Some(max) = &self.max {
            if event.level() > max {
                return FilterDecision::Deny;
            }
        }
        if self.accept_on_match {
            FilterDecision::Accept
        } else {
            FilterDecision::Neutral
        }
    }
}

/// Matches one exact level.
///
/// A match accepts (or denies, when `accept_on_match` is false); anything
/// else is neutral.
#[derive(Debug, Clone)]
pub struct LevelMatchFilter {
    level: Level,
    accept_on_match: bool,
}

impl LevelMatchFilter {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            accept_on_match: true,
        }
    }

    #[must_use]
    pub fn with_accept_on_match(mut self, accept: bool) -> Self {
        self.accept_on_match = accept;
        self
    }
}

impl Filter for LevelMatchFilter {
    fn decide(&self, event: &LoggingEvent) -> FilterDecision {
        if event.level() != &self.level {
            return FilterDecision::Neutral;
        }
        if self.accept_on_match {
            FilterDecision::Accept
        } else {
            FilterDecision::Deny
        }
    }
}

/// Denies everything. The conventional chain terminator.
#[derive(Debug, Clone, Default)]
pub struct DenyAllFilter;

impl DenyAllFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Filter for DenyAllFilter {
    fn decide(&self, _event: &LoggingEvent) -> FilterDecision {
        FilterDecision::Deny
    }
}
