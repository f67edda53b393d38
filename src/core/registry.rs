//! # Subscribers - slot-table event subscriber registry.
//!
//! [`Subscribers`] owns a growable table of slots. Each slot is either empty or
//! holds one subscription (callback + caller-owned context).
//!
//! ## Architecture
//! ```text
//! subscribe(cb, ctx) ──► first free slot (lowest index) or push ──► SubscriptionId
//! unsubscribe(id)    ──► validate(id) ──► clear slot (kept for reuse)
//!
//! send(&event)
//!     roster = [generation of each live slot]   (snapshot before iterating)
//!     for (index, generation) in roster:
//!         ├─ empty at entry, emptied, or reoccupied since?  ─► skip
//!         └─ clone entry ─► release table borrow ─► cb(&event, &ctx)
//!                                                    └─ may subscribe/unsubscribe
//! ```
//!
//! ## Rules
//! - Slots are never removed; the table only grows, so an index stays valid for the registry's lifetime.
//! - Reuse is first-fit: the lowest free index wins.
//! - A broadcast calls only the subscriptions live when it started, in ascending index order.
//!   A slot filled during the broadcast, even one reused in place of an earlier occupant, waits
//!   for the next round.
//! - A subscriber removed during a broadcast is never called after `unsubscribe` returns.
//! - Handles carry the slot generation; a handle whose slot was reused is rejected as stale.
//!
//! ## Locking
//! The table sits behind a reentrant mutex held for the whole of `send`. Callbacks running
//! on the dispatching thread may call back into the registry; other threads wait until the
//! broadcast is over. A callback must therefore not block on another thread that uses the
//! same registry.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use tracing::{trace, warn};

use crate::error::{CallbackError, CallbackResult, RegistryError};

use super::config::Config;
use super::id::SubscriptionId;
use super::report::DispatchReport;
use super::slot::{Callback, Entry, Slot};

/// Registry of subscribers receiving events of type `E` with a context of type `C`.
///
/// Callbacks are invoked as `callback(&event, &context)`. The context is stored as an
/// `Arc<C>` and handed back unchanged; the registry never inspects it.
///
/// # Example
/// ```
/// use slotcast::Subscribers;
///
/// let subs: Subscribers<u32, &'static str> = Subscribers::new();
/// let a = subs.subscribe(|ev, name| { println!("{name}: {ev}"); Ok(()) }, "a");
/// let _b = subs.subscribe(|_, _| Ok(()), "b");
///
/// let report = subs.send(&42).unwrap();
/// assert_eq!(report.delivered, 2);
///
/// subs.unsubscribe(a).unwrap();
/// let c = subs.subscribe(|_, _| Ok(()), "c");
/// assert_eq!(c.index(), a.index());
/// ```
pub struct Subscribers<E, C = ()> {
    slots: ReentrantMutex<RefCell<Vec<Slot<E, C>>>>,
    config: Config,
}

impl<E, C> Subscribers<E, C> {
    /// Creates an empty registry with the default [`Config`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty registry with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let slots = match config.capacity_hint() {
            Some(n) => Vec::with_capacity(n),
            None => Vec::new(),
        };
        Self {
            slots: ReentrantMutex::new(RefCell::new(slots)),
            config,
        }
    }

    /// Returns the registry configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers `callback` with `context` and returns its handle.
    ///
    /// Takes the lowest free slot, appending a new one only if none is free.
    /// The handle stays valid until the matching [`unsubscribe`](Self::unsubscribe).
    ///
    /// Safe to call from inside a callback during [`send`](Self::send); the new
    /// subscriber is first called on the next broadcast.
    pub fn subscribe<F>(&self, callback: F, context: impl Into<Arc<C>>) -> SubscriptionId
    where
        F: Fn(&E, &C) -> CallbackResult + Send + Sync + 'static,
    {
        let callback: Callback<E, C> = Arc::new(callback);
        let entry = Entry {
            callback,
            context: context.into(),
        };

        let guard = self.slots.lock();
        let id = {
            let mut slots = guard.borrow_mut();
            let free = slots.iter().position(Slot::is_free);
            match free {
                Some(index) => SubscriptionId::new(index, slots[index].reoccupy(entry)),
                None => {
                    slots.push(Slot::occupied(entry));
                    SubscriptionId::new(slots.len() - 1, 0)
                }
            }
        };
        trace!(subscription = %id, "subscribed");
        id
    }

    /// Removes the subscription `id`, freeing its slot for reuse.
    ///
    /// Returns `Ok(true)` if a live subscriber was removed and `Ok(false)` if the
    /// slot was already empty (double unsubscribe is harmless).
    ///
    /// ### Errors
    /// - [`RegistryError::OutOfRange`] if `id` does not index into the table.
    /// - [`RegistryError::Stale`] if the slot has since been reused by another subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, RegistryError> {
        let guard = self.slots.lock();
        let removed = {
            let mut slots = guard.borrow_mut();
            validate_mut(&mut slots, id)?.clear()
        };
        // Dropped outside the table borrow: a callback's captures may call back in.
        let was_live = removed.is_some();
        drop(removed);
        trace!(subscription = %id, was_live, "unsubscribed");
        Ok(was_live)
    }

    /// Broadcasts `event` to every live subscriber in ascending handle order.
    ///
    /// The set of live subscriptions is fixed before iterating: subscribers added by a
    /// callback are not called during this broadcast, whether appended or placed into a
    /// reused slot. Subscriptions removed by a callback are skipped if not yet visited.
    ///
    /// ### Errors
    /// Under [`FailurePolicy::Propagate`](crate::FailurePolicy::Propagate) the first failing
    /// callback stops the broadcast and its error is returned as [`RegistryError::Callback`].
    /// Under `Isolate` failures are recorded in the returned [`DispatchReport`].
    pub fn send(&self, event: &E) -> Result<DispatchReport, RegistryError> {
        let guard = self.slots.lock();
        // Generation of every slot live at entry; anything else is not part of this round.
        let roster: Vec<Option<u32>> = guard
            .borrow()
            .iter()
            .map(|slot| (!slot.is_free()).then(|| slot.generation()))
            .collect();
        let mut report = DispatchReport {
            visited: roster.len(),
            ..DispatchReport::default()
        };

        for (index, generation) in roster.into_iter().enumerate() {
            let Some(generation) = generation else {
                continue;
            };
            let live = {
                let slots = guard.borrow();
                slots
                    .get(index)
                    .filter(|slot| slot.generation() == generation)
                    .and_then(|slot| slot.entry().map(|e| (slot.id(index), e.clone())))
            };
            let Some((id, entry)) = live else {
                continue;
            };

            match self.invoke(id, &entry, event) {
                Ok(()) => report.delivered += 1,
                Err(source) if self.config.failure_policy.isolates() => {
                    report.failed.push((id, source));
                }
                Err(source) => return Err(RegistryError::Callback { id, source }),
            }
        }
        Ok(report)
    }

    /// Delivers `event` to the single subscriber `id`.
    ///
    /// Returns `Ok(true)` if the subscriber was called and `Ok(false)` if its slot is empty.
    ///
    /// ### Errors
    /// - [`RegistryError::OutOfRange`] / [`RegistryError::Stale`] on handle misuse.
    /// - [`RegistryError::Callback`] if the callback failed. With a single target there is
    ///   nothing to continue with, so this is returned under either policy; `Isolate` still
    ///   turns a panic into [`CallbackError::Panicked`].
    pub fn send_to(&self, id: SubscriptionId, event: &E) -> Result<bool, RegistryError> {
        let guard = self.slots.lock();
        let entry = {
            let slots = guard.borrow();
            validate(&slots, id)?.entry().cloned()
        };
        let Some(entry) = entry else {
            return Ok(false);
        };
        self.invoke(id, &entry, event)
            .map_err(|source| RegistryError::Callback { id, source })?;
        Ok(true)
    }

    /// True if `id` currently addresses a live subscriber.
    pub fn is_live(&self, id: SubscriptionId) -> bool {
        let guard = self.slots.lock();
        let slots = guard.borrow();
        validate(&slots, id).is_ok_and(|slot| !slot.is_free())
    }

    /// Number of live subscribers.
    pub fn live_count(&self) -> usize {
        let guard = self.slots.lock();
        let slots = guard.borrow();
        slots.iter().filter(|slot| !slot.is_free()).count()
    }

    /// Number of slots in the table (high-water mark of concurrent subscribers).
    pub fn slot_count(&self) -> usize {
        self.slots.lock().borrow().len()
    }

    /// True if there are no live subscribers.
    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }

    fn invoke(&self, id: SubscriptionId, entry: &Entry<E, C>, event: &E) -> CallbackResult {
        if !self.config.failure_policy.isolates() {
            return entry.call(event);
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| entry.call(event)))
            .unwrap_or_else(|payload| {
                Err(CallbackError::Panicked {
                    info: panic_message(payload.as_ref()),
                })
            });
        if let Err(err) = &outcome {
            warn!(
                subscription = %id,
                label = err.as_label(),
                error = %err,
                "subscriber failed; continuing"
            );
        }
        outcome
    }
}

impl<E, C> Default for Subscribers<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C> fmt::Debug for Subscribers<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("slots", &self.slot_count())
            .field("live", &self.live_count())
            .field("config", &self.config)
            .finish()
    }
}

fn validate<E, C>(slots: &[Slot<E, C>], id: SubscriptionId) -> Result<&Slot<E, C>, RegistryError> {
    let slot = slots.get(id.index()).ok_or(RegistryError::OutOfRange {
        id,
        len: slots.len(),
    })?;
    if slot.generation() != id.generation() {
        return Err(RegistryError::Stale {
            id,
            current: slot.generation(),
        });
    }
    Ok(slot)
}

fn validate_mut<E, C>(
    slots: &mut [Slot<E, C>],
    id: SubscriptionId,
) -> Result<&mut Slot<E, C>, RegistryError> {
    let len = slots.len();
    let slot = slots
        .get_mut(id.index())
        .ok_or(RegistryError::OutOfRange { id, len })?;
    if slot.generation() != id.generation() {
        return Err(RegistryError::Stale {
            id,
            current: slot.generation(),
        });
    }
    Ok(slot)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
