//! # Pump - drives a registry from a [`Bus`].
//!
//! The owner of an event stream typically calls [`Subscribers::send`] once per
//! tick. [`Pump`] does that on a tokio task: every event received from the bus is
//! broadcast to the registry's live subscribers.
//!
//! ## Architecture
//! ```text
//! Bus ──► Pump::run()
//!           ├─► Ok(event)   → registry.send(&event)  (errors logged, pump keeps going)
//!           ├─► Lagged(n)   → warn, count, continue
//!           ├─► Closed      → exit PumpExit::Closed
//!           └─► cancelled   → exit PumpExit::Cancelled
//! ```
//!
//! ## Rules
//! - One failing broadcast never stops the pump.
//! - Cancellation wins over pending events (`biased` select).
//! - The registry lock is never held across an await point.
//! - `send` runs inline and takes the registry's blocking lock. While another thread is
//!   broadcasting, this runtime worker is parked; keep callbacks short, or give the pump
//!   its own runtime when callbacks can be slow.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::core::Subscribers;

use super::bus::Bus;

/// Why a pump stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PumpExit {
    /// The cancellation token fired.
    Cancelled,
    /// Every bus sender was dropped and the backlog drained.
    Closed,
}

/// Counters reported when a pump stops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PumpStats {
    /// Why the pump stopped.
    pub exit: PumpExit,
    /// Events broadcast to the registry.
    pub dispatched: u64,
    /// Subscriber failures observed (propagated errors and isolated failures).
    pub failed: u64,
    /// Events skipped because the pump fell behind the bus.
    pub lagged: u64,
}

/// Bus-to-registry dispatcher.
pub struct Pump;

impl Pump {
    /// Subscribes to `bus` and spawns a task broadcasting each event to `registry`.
    ///
    /// The bus receiver is created before this returns, so events published
    /// afterwards are never missed.
    pub fn spawn<E, C>(
        registry: Arc<Subscribers<E, C>>,
        bus: &Bus<E>,
        token: CancellationToken,
    ) -> JoinHandle<PumpStats>
    where
        E: Clone + Send + 'static,
        C: Send + Sync + 'static,
    {
        let rx = bus.subscribe();
        tokio::spawn(Self::run(registry, rx, token))
    }

    /// Runs the pump loop on the current task until cancelled or the bus closes.
    pub async fn run<E, C>(
        registry: Arc<Subscribers<E, C>>,
        mut rx: broadcast::Receiver<E>,
        token: CancellationToken,
    ) -> PumpStats
    where
        E: Clone,
    {
        let mut stats = PumpStats {
            exit: PumpExit::Closed,
            dispatched: 0,
            failed: 0,
            lagged: 0,
        };
        debug!(subscribers = registry.live_count(), "pump started");

        stats.exit = loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break PumpExit::Cancelled,
                msg = rx.recv() => match msg {
                    Ok(event) => {
                        stats.dispatched += 1;
                        match registry.send(&event) {
                            Ok(report) => stats.failed += report.failed.len() as u64,
                            Err(err) => {
                                stats.failed += 1;
                                warn!(label = err.as_label(), error = %err, "broadcast aborted");
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        stats.lagged += skipped;
                        warn!(skipped, "pump lagged behind bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break PumpExit::Closed,
                }
            }
        };

        debug!(
            exit = ?stats.exit,
            dispatched = stats.dispatched,
            failed = stats.failed,
            lagged = stats.lagged,
            "pump stopped"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::error::CallbackError;
    use crate::policies::FailurePolicy;
    use parking_lot::Mutex;

    fn collecting(subs: &Subscribers<u32>) -> Arc<Mutex<Vec<u32>>> {
        let seen: Arc<Mutex<Vec<u32>>> = Arc::default();
        let sink = Arc::clone(&seen);
        subs.subscribe(
            move |ev, _| {
                sink.lock().push(*ev);
                Ok(())
            },
            (),
        );
        seen
    }

    #[tokio::test]
    async fn test_pump_drains_until_closed() {
        let subs = Arc::new(Subscribers::<u32>::new());
        let seen = collecting(&subs);
        let bus = Bus::new(Config::default().bus_capacity_clamped());

        let handle = Pump::spawn(Arc::clone(&subs), &bus, CancellationToken::new());
        for n in 1..=3 {
            bus.publish(n);
        }
        drop(bus);

        let stats = handle.await.unwrap();
        assert_eq!(stats.exit, PumpExit::Closed);
        assert_eq!(stats.dispatched, 3);
        assert_eq!(stats.failed, 0);
        assert_eq!(*seen.lock(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_pump_stops_on_cancel() {
        let subs = Arc::new(Subscribers::<u32>::new());
        let bus: Bus<u32> = Bus::new(8);
        let token = CancellationToken::new();

        let handle = Pump::spawn(subs, &bus, token.clone());
        token.cancel();

        let stats = handle.await.unwrap();
        assert_eq!(stats.exit, PumpExit::Cancelled);
        assert_eq!(stats.dispatched, 0);
    }

    #[tokio::test]
    async fn test_pump_counts_lag() {
        let subs = Arc::new(Subscribers::<u32>::new());
        let seen = collecting(&subs);
        let bus: Bus<u32> = Bus::new(1);

        // Current-thread runtime: the pump only runs once we await it.
        let handle = Pump::spawn(Arc::clone(&subs), &bus, CancellationToken::new());
        for n in 0..3 {
            bus.publish(n);
        }
        drop(bus);

        let stats = handle.await.unwrap();
        assert_eq!(stats.lagged, 2);
        assert_eq!(stats.dispatched, 1);
        assert_eq!(*seen.lock(), vec![2]);
    }

    #[tokio::test]
    async fn test_pump_survives_failing_subscribers() {
        let subs = Arc::new(Subscribers::<u32>::with_config(Config {
            failure_policy: FailurePolicy::Isolate,
            ..Config::default()
        }));
        subs.subscribe(
            |ev, _| match ev % 2 {
                0 => Ok(()),
                _ => Err(CallbackError::failed("odd")),
            },
            (),
        );
        let seen = collecting(&subs);
        let bus: Bus<u32> = Bus::new(8);

        let handle = Pump::spawn(Arc::clone(&subs), &bus, CancellationToken::new());
        for n in 0..4 {
            bus.publish(n);
        }
        drop(bus);

        let stats = handle.await.unwrap();
        assert_eq!(stats.dispatched, 4);
        assert_eq!(stats.failed, 2);
        assert_eq!(*seen.lock(), vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_pump_propagated_failure_is_counted() {
        let subs = Arc::new(Subscribers::<u32>::new());
        subs.subscribe(|_, _| Err(CallbackError::failed("always")), ());
        let bus: Bus<u32> = Bus::new(8);

        let handle = Pump::spawn(Arc::clone(&subs), &bus, CancellationToken::new());
        bus.publish(1);
        bus.publish(2);
        drop(bus);

        let stats = handle.await.unwrap();
        assert_eq!(stats.dispatched, 2);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.exit, PumpExit::Closed);
    }
}
