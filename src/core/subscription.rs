//! # Scoped subscriptions.
//!
//! [`Subscription`] ties a subscription's lifetime to a value: dropping the guard
//! unsubscribes. The guard holds only a weak reference, so it neither keeps the
//! registry alive nor fails once the registry is gone.
//!
//! ```text
//! let sub = subs.subscribe_scoped(cb, ctx);   ─► live
//! drop(sub)                                   ─► unsubscribe(id)
//! sub.detach()                                ─► live, caller owns the raw SubscriptionId
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use tracing::warn;

use crate::error::{CallbackResult, RegistryError};

use super::id::SubscriptionId;
use super::registry::Subscribers;

/// Guard that unsubscribes when dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription<E, C = ()> {
    registry: Weak<Subscribers<E, C>>,
    id: SubscriptionId,
    armed: bool,
}

impl<E, C> Subscription<E, C> {
    /// Handle of the guarded subscription.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// True while the registry exists and the subscription is live.
    pub fn is_live(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.is_live(self.id))
    }

    /// Releases the guard without unsubscribing and returns the raw handle.
    pub fn detach(mut self) -> SubscriptionId {
        self.armed = false;
        self.id
    }

    /// Unsubscribes now and reports the outcome.
    ///
    /// Returns `Ok(false)` if the registry is already gone or the slot was empty.
    pub fn cancel(mut self) -> Result<bool, RegistryError> {
        self.armed = false;
        match self.registry.upgrade() {
            Some(registry) => registry.unsubscribe(self.id),
            None => Ok(false),
        }
    }
}

impl<E, C> Drop for Subscription<E, C> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            if let Err(err) = registry.unsubscribe(self.id) {
                warn!(subscription = %self.id, label = err.as_label(), "scoped unsubscribe failed");
            }
        }
    }
}

impl<E, C> fmt::Debug for Subscription<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("armed", &self.armed)
            .finish()
    }
}

impl<E, C> Subscribers<E, C> {
    /// Like [`subscribe`](Self::subscribe), but returns a guard that unsubscribes on drop.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use slotcast::Subscribers;
    ///
    /// let subs: Arc<Subscribers<u32>> = Arc::new(Subscribers::new());
    /// {
    ///     let _guard = subs.subscribe_scoped(|_, _| Ok(()), ());
    ///     assert_eq!(subs.live_count(), 1);
    /// }
    /// assert_eq!(subs.live_count(), 0);
    /// ```
    pub fn subscribe_scoped<F>(
        self: &Arc<Self>,
        callback: F,
        context: impl Into<Arc<C>>,
    ) -> Subscription<E, C>
    where
        F: Fn(&E, &C) -> CallbackResult + Send + Sync + 'static,
    {
        let id = self.subscribe(callback, context);
        Subscription {
            registry: Arc::downgrade(self),
            id,
            armed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_drop_unsubscribes() {
        let subs: Arc<Subscribers<u32>> = Arc::new(Subscribers::new());
        let guard = subs.subscribe_scoped(|_, _| Ok(()), ());
        let id = guard.id();
        assert!(guard.is_live());

        drop(guard);
        assert!(!subs.is_live(id));
        assert_eq!(subs.send(&1).unwrap().delivered, 0);
    }

    #[test]
    fn test_detach_keeps_subscription() {
        let subs: Arc<Subscribers<u32>> = Arc::new(Subscribers::new());
        let id = subs.subscribe_scoped(|_, _| Ok(()), ()).detach();
        assert!(subs.is_live(id));
        assert_eq!(subs.unsubscribe(id), Ok(true));
    }

    #[test]
    fn test_cancel_reports_outcome() {
        let subs: Arc<Subscribers<u32>> = Arc::new(Subscribers::new());
        let guard = subs.subscribe_scoped(|_, _| Ok(()), ());
        assert_eq!(guard.cancel(), Ok(true));
        assert!(subs.is_empty());
    }

    #[test]
    fn test_guard_outliving_registry_is_inert() {
        let subs: Arc<Subscribers<u32>> = Arc::new(Subscribers::new());
        let guard = subs.subscribe_scoped(|_, _| Ok(()), ());
        drop(subs);
        assert!(!guard.is_live());
        assert_eq!(guard.cancel(), Ok(false));
    }

    #[test]
    fn test_guard_dropped_by_own_callback() {
        // A subscriber that owns its own guard and releases it on first delivery.
        let subs: Arc<Subscribers<u32>> = Arc::new(Subscribers::new());
        let slot: Arc<Mutex<Option<Subscription<u32>>>> = Arc::default();
        let hits = Arc::new(Mutex::new(0u32));

        let (inner_slot, inner_hits) = (Arc::clone(&slot), Arc::clone(&hits));
        let guard = subs.subscribe_scoped(
            move |_, _| {
                *inner_hits.lock() += 1;
                let released = inner_slot.lock().take();
                drop(released);
                Ok(())
            },
            (),
        );
        *slot.lock() = Some(guard);

        subs.send(&1).unwrap();
        subs.send(&2).unwrap();
        assert_eq!(*hits.lock(), 1);
        assert!(subs.is_empty());
    }
}
