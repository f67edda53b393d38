//! Error types used by the subscriber registry and its callbacks.
//!
//! This module defines two main error enums:
//!
//! - [`RegistryError`] errors raised by registry operations (handle misuse, propagated callback failures).
//! - [`CallbackError`] errors raised by individual subscriber callbacks.
//!
//! Both types provide a stable `as_label` for logs/metrics.

use thiserror::Error;

use crate::core::SubscriptionId;

/// Result type returned by subscriber callbacks.
pub type CallbackResult = Result<(), CallbackError>;

/// # Errors produced by registry operations.
///
/// Handle misuse (`OutOfRange`, `Stale`) is a programming error on the caller's side;
/// it is always reported, never silently ignored.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The handle's index is beyond the slot table.
    #[error("subscription {id} out of range (slots: {len})")]
    OutOfRange {
        /// The offending handle.
        id: SubscriptionId,
        /// Number of slots in the table at the time of the call.
        len: usize,
    },

    /// The handle's slot has been reused by a newer subscription.
    #[error("subscription {id} is stale; slot is now at generation {current}")]
    Stale {
        /// The offending handle.
        id: SubscriptionId,
        /// Generation of the slot's current occupant.
        current: u32,
    },

    /// A subscriber callback failed and the registry propagates failures.
    #[error("subscriber {id} failed: {source}")]
    Callback {
        /// Subscriber whose callback failed.
        id: SubscriptionId,
        /// The callback's own error.
        #[source]
        source: CallbackError,
    },
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use slotcast::{RegistryError, Subscribers};
    ///
    /// let subs: Subscribers<u32> = Subscribers::new();
    /// let id = subs.subscribe(|_, _| Ok(()), ());
    /// subs.unsubscribe(id).unwrap();
    /// let _reused = subs.subscribe(|_, _| Ok(()), ());
    ///
    /// let err = subs.unsubscribe(id).unwrap_err();
    /// assert_eq!(err.as_label(), "registry_stale_handle");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::OutOfRange { .. } => "registry_out_of_range",
            RegistryError::Stale { .. } => "registry_stale_handle",
            RegistryError::Callback { .. } => "registry_callback_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RegistryError::OutOfRange { id, len } => {
                format!("handle index {} >= slot count {len}", id.index())
            }
            RegistryError::Stale { id, current } => {
                format!(
                    "handle generation {} does not match slot generation {current}",
                    id.generation()
                )
            }
            RegistryError::Callback { id, source } => {
                format!("subscriber {id}: {}", source.as_message())
            }
        }
    }

    /// True if the error stems from misusing a handle rather than from a callback.
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            RegistryError::OutOfRange { .. } | RegistryError::Stale { .. }
        )
    }
}

/// # Errors produced by subscriber callbacks.
///
/// Callbacks report failures as values; under
/// [`FailurePolicy::Isolate`](crate::FailurePolicy::Isolate) panics are converted into
/// [`CallbackError::Panicked`].
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallbackError {
    /// Callback reported a failure.
    #[error("callback failed: {reason}")]
    Failed {
        /// The underlying error message.
        reason: String,
    },

    /// Callback panicked (only observed when failures are isolated).
    #[error("callback panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl CallbackError {
    /// Shorthand for [`CallbackError::Failed`].
    pub fn failed(reason: impl Into<String>) -> Self {
        CallbackError::Failed {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use slotcast::CallbackError;
    ///
    /// let err = CallbackError::failed("disk full");
    /// assert_eq!(err.as_label(), "callback_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CallbackError::Failed { .. } => "callback_failed",
            CallbackError::Panicked { .. } => "callback_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            CallbackError::Failed { reason } => format!("failed: {reason}"),
            CallbackError::Panicked { info } => format!("panicked: {info}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let id = SubscriptionId::new(3, 1);
        assert_eq!(
            RegistryError::OutOfRange { id, len: 2 }.as_label(),
            "registry_out_of_range"
        );
        assert_eq!(
            RegistryError::Callback {
                id,
                source: CallbackError::failed("x"),
            }
            .as_label(),
            "registry_callback_failed"
        );
        assert_eq!(
            CallbackError::Panicked { info: "boom".into() }.as_label(),
            "callback_panicked"
        );
    }

    #[test]
    fn test_misuse_classification() {
        let id = SubscriptionId::new(0, 0);
        assert!(RegistryError::OutOfRange { id, len: 0 }.is_misuse());
        assert!(RegistryError::Stale { id, current: 2 }.is_misuse());
        assert!(
            !RegistryError::Callback {
                id,
                source: CallbackError::failed("x"),
            }
            .is_misuse()
        );
    }

    #[test]
    fn test_display_mentions_handle() {
        let err = RegistryError::OutOfRange {
            id: SubscriptionId::new(7, 0),
            len: 3,
        };
        assert_eq!(err.to_string(), "subscription #7@0 out of range (slots: 3)");
        assert_eq!(err.as_message(), "handle index 7 >= slot count 3");
    }
}
