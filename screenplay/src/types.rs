//! Core type definitions for the screenplay engine
//!
//! Identity and bookkeeping types shared by the execution engine and the
//! event pipeline.

use screenplay_types::ActivityKind;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Subscription identifier
///
/// Returned when subscribing to an event pipeline, used to later
/// unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

static SUBSCRIPTION_COUNTER: AtomicU64 = AtomicU64::new(1);

impl SubscriptionId {
    /// Create a new unique subscription ID
    pub fn new() -> Self {
        Self(SUBSCRIPTION_COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub:{}", self.0)
    }
}

/// Nesting depth of the activity currently executing
///
/// Carried by value through each execution context. Entering a task or a
/// skip-on-fail activity derives a deeper copy for the activity's children;
/// the parent's copy is never mutated, so leaving the activity on any path
/// restores the previous depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Depth {
    /// Number of enclosing tasks
    pub indentation: u32,
    /// Number of enclosing skip-on-fail activities
    pub skip_nesting: u32,
}

impl Depth {
    /// Depth of a top-level `attempts_to` / `asks` call
    pub fn root() -> Self {
        Self::default()
    }

    /// Depth seen by the children of an activity
    pub fn enter(self, kind: ActivityKind, skip_on_fail: bool) -> Self {
        Self {
            indentation: self.indentation + u32::from(kind == ActivityKind::Task),
            skip_nesting: self.skip_nesting + u32::from(skip_on_fail),
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wrap:{} skip:{}", self.indentation, self.skip_nesting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_id_uniqueness() {
        let s1 = SubscriptionId::new();
        let s2 = SubscriptionId::new();
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_depth_enter() {
        let root = Depth::root();

        let task = root.enter(ActivityKind::Task, false);
        assert_eq!(task, Depth { indentation: 1, skip_nesting: 0 });

        let action = task.enter(ActivityKind::Action, true);
        assert_eq!(action, Depth { indentation: 1, skip_nesting: 1 });

        // The parent copy is untouched
        assert_eq!(root, Depth::root());
    }
}
