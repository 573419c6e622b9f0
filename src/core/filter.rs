//! Filter trait for per-appender event selection

use super::event::LoggingEvent;

/// Three-state verdict of one filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum FilterDecision {
    /// Drop the event; no further filter is consulted.
    Deny = -1,
    /// No opinion; defer to the next filter in the chain.
    Neutral = 0,
    /// Deliver the event; no further filter is consulted.
    Accept = 1,
}

/// A per-appender gate consulted before delivery.
///
/// Filters compose into chains: evaluation stops at the first `Deny` or
/// `Accept`, `Neutral` falls through to the next filter, and a chain that
/// ends without a verdict accepts.
pub trait Filter: Send + Sync {
    fn decide(&self, event: &LoggingEvent) -> FilterDecision;
}

/// Run a filter chain to its final accept/deny verdict
pub fn run_filter_chain(filters: &[Box<dyn Filter>], event: &LoggingEvent) -> bool {
    for filter in filters {
        match filter.decide(event) {
            FilterDecision::Deny => return false,
            FilterDecision::Accept => return true,
            FilterDecision::Neutral => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::Level;

    struct Fixed(FilterDecision);

    impl Filter for Fixed {
        fn decide(&self, _event: &LoggingEvent) -> FilterDecision {
            self.0
        }
    }

    fn event() -> LoggingEvent {
        LoggingEvent::new("app", Level::INFO, "msg")
    }

    #[test]
    fn empty_chain_accepts() {
        assert!(run_filter_chain(&[], &event()));
    }

    #[test]
    fn first_deny_short_circuits() {
        let chain: Vec<Box<dyn Filter>> = vec![
            Box::new(Fixed(FilterDecision::Neutral)),
            Box::new(Fixed(FilterDecision::Deny)),
            Box::new(Fixed(FilterDecision::Accept)),
        ];
        assert!(!run_filter_chain(&chain, &event()));
    }

    #[test]
    fn first_accept_short_circuits() {
        let chain: Vec<Box<dyn Filter>> = vec![
            Box::new(Fixed(FilterDecision::Accept)),
            Box::new(Fixed(FilterDecision::Deny)),
        ];
        assert!(run_filter_chain(&chain, &event()));
    }

    #[test]
    fn all_neutral_accepts() {
        let chain: Vec<Box<dyn Filter>> = vec![
            Box::new(Fixed(FilterDecision::Neutral)),
            Box::new(Fixed(FilterDecision::Neutral)),
        ];
        assert!(run_filter_chain(&chain, &event()));
    }
}
