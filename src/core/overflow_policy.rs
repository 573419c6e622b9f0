//! What the buffering appender does with a full queue

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Resolution strategy for an event arriving at a full queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Drop the arriving event silently. Metrics still count it. For
    /// high-throughput callers that tolerate loss.
    DropNewest,

    /// Wait for space. Backpressures the logging thread; only for callers
    /// that value every event over latency.
    Block,

    /// Wait up to the given duration, then drop.
    BlockWithTimeout(Duration),

    /// Drop, but tell someone: the diagnostic channel and the overflow
    /// callback fire on the first drop and periodically after. The default.
    AlertAndDrop,
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        OverflowPolicy::AlertAndDrop
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::BlockWithTimeout(d) => write!(f, "BlockWithTimeout({:?})", d),
            OverflowPolicy::AlertAndDrop => write!(f, "AlertAndDrop"),
        }
    }
}

/// Invoked with the running total of dropped events when an alerting policy
/// drops.
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_default_policy_alerts() {
        assert_eq!(OverflowPolicy::default(), OverflowPolicy::AlertAndDrop);
    }

    #[test]
    fn display_names_the_variant() {
        assert_eq!(OverflowPolicy::DropNewest.to_string(), "DropNewest");
        assert_eq!(
            OverflowPolicy::BlockWithTimeout(Duration::from_millis(100)).to_string(),
            "BlockWithTimeout(100ms)"
        );
    }
}
