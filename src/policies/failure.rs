//! # Failure policies for subscriber callbacks.
//!
//! [`FailurePolicy`] decides what a broadcast does when one subscriber's callback fails.
//!
//! - [`FailurePolicy::Propagate`] the first failure stops the broadcast and is returned to the caller (default).
//! - [`FailurePolicy::Isolate`] failures (and panics) are logged and recorded; the broadcast continues.
//!
//! ## Choosing the right policy
//!
//! **Subscribers that must all agree** (one failure invalidates the round):
//! ```text
//! FailurePolicy::Propagate      → stop at first failure, remaining subscribers not called
//! ```
//!
//! **Independent listeners** (plugins, observers, UI hooks):
//! ```text
//! FailurePolicy::Isolate        → log failure, keep notifying the rest
//! ```
//!
//! Either way the slot table is untouched by a failing callback.

/// Policy controlling how callback failures affect a broadcast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing subscriber and return its error.
    ///
    /// Panics unwind to the caller of `send`.
    #[default]
    Propagate,
    /// Log and record failures, then continue with the next subscriber.
    ///
    /// Panics are caught and recorded as
    /// [`CallbackError::Panicked`](crate::CallbackError::Panicked).
    Isolate,
}

impl FailurePolicy {
    /// True if failures are contained within the broadcast.
    #[inline]
    pub fn isolates(self) -> bool {
        matches!(self, FailurePolicy::Isolate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_propagates() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Propagate);
        assert!(!FailurePolicy::default().isolates());
        assert!(FailurePolicy::Isolate.isolates());
    }
}
