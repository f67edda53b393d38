//! # Event bus feeding a registry.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that lets many
//! producers hand events to the [`Pump`](crate::Pump) driving a
//! [`Subscribers`](crate::Subscribers) registry.
//!
//! ## Architecture
//! ```text
//! Producers (many):                  Pump (one per registry):
//!   tick loop ──┐
//!   worker    ──┼──────► Bus ───────► Pump::spawn ────► Subscribers::send
//!   plugin    ──┘  (broadcast chan)
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks; it calls `broadcast::Sender::send`.
//! - **Bounded capacity**: a single ring buffer stores recent events for all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: events are lost if no receiver exists at send time.

use tokio::sync::broadcast;

/// Broadcast channel for events of type `E`.
///
/// ### Properties
/// - **Non-blocking**: `publish()` returns immediately.
/// - **Fire-and-forget**: no delivery or durability guarantees.
/// - **Cloneable**: cheap to clone (internally holds an `Arc`-backed sender).
#[derive(Debug)]
pub struct Bus<E> {
    tx: broadcast::Sender<E>,
}

impl<E> Clone for Bus<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E: Clone> Bus<E> {
    /// Creates a new bus with the given channel capacity.
    ///
    /// ### Notes
    /// - Capacity is **shared** across all receivers.
    /// - The minimum capacity is 1 (clamped).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<E>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// Returns the number of receivers the event was queued for (0 if none).
    pub fn publish(&self, ev: E) -> usize {
        self.tx.send(ev).unwrap_or(0)
    }

    /// Publishes a borrowed event by cloning it.
    pub fn publish_ref(&self, ev: &E) -> usize {
        self.publish(ev.clone())
    }

    /// Creates a new receiver that observes subsequently published events.
    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.tx.subscribe()
    }

    /// Number of live receivers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_without_receivers_is_dropped() {
        let bus: Bus<u32> = Bus::new(0);
        assert_eq!(bus.publish(1), 0);

        let mut rx = bus.subscribe();
        assert_eq!(bus.publish_ref(&2), 1);
        assert_eq!(rx.recv().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_lagging_receiver_skips_oldest() {
        let bus: Bus<u32> = Bus::new(2);
        let mut rx = bus.subscribe();
        for n in 0..4 {
            bus.publish(n);
        }
        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(2))
        ));
        assert_eq!(rx.recv().await.unwrap(), 2);
    }
}
