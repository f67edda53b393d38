//! Outcome of one broadcast.

use crate::core::SubscriptionId;
use crate::error::CallbackError;

/// Summary returned by [`Subscribers::send`](crate::Subscribers::send).
///
/// `visited` is the table length snapshotted when the broadcast started; slots
/// appended by callbacks during the broadcast are not part of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Number of slots the broadcast walked over (live or not).
    pub visited: usize,
    /// Number of callbacks that returned `Ok`.
    pub delivered: usize,
    /// Failures recorded under `FailurePolicy::Isolate`, in handle order.
    pub failed: Vec<(SubscriptionId, CallbackError)>,
}

impl DispatchReport {
    /// True if no subscriber failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of callbacks invoked (successful or not).
    #[must_use]
    pub fn invoked(&self) -> usize {
        self.delivered + self.failed.len()
    }
}
