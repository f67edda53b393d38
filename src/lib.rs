//! # slotcast
//!
//! **slotcast** is a small event subscriber registry for Rust.
//!
//! It hands out stable subscription handles, recycles freed slots, and dispatches
//! values to every live subscriber (or to one subscriber by handle). Subscribers may
//! subscribe and unsubscribe from inside their own callbacks while a broadcast is
//! running.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   producers ──► Bus<E> (broadcast channel) ──► Pump (tokio task)
//!                                                   │ send(&event) per event
//!                                                   ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Subscribers<E, C>                                                │
//! │  ┌────────┬────────┬────────┬────────┐                            │
//! │  │ slot 0 │ slot 1 │ slot 2 │ slot 3 │  ... (grows, never shrinks)│
//! │  │ live   │ empty  │ live   │ live   │                            │
//! │  └───┬────┴────────┴───┬────┴───┬────┘                            │
//! │      ▼                 ▼        ▼                                 │
//! │   cb(&e, &ctx)     cb(&e, &ctx) cb(&e, &ctx)   (ascending index)  │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Slot lifecycle
//! ```text
//! Empty ──subscribe──► Live(generation g) ──unsubscribe──► Empty ──subscribe──► Live(g+1) ...
//! ```
//!
//! A [`SubscriptionId`] is `(index, generation)`. Reuse is first-fit by index; the
//! generation makes a handle kept after `unsubscribe` detectably stale instead of
//! silently addressing the slot's next occupant.
//!
//! ## Features
//! | Area              | Description                                                     | Key types                                  |
//! |-------------------|-----------------------------------------------------------------|--------------------------------------------|
//! | **Registry**      | Subscribe, unsubscribe, broadcast, directed dispatch.           | [`Subscribers`], [`SubscriptionId`]        |
//! | **Scoped handles**| Unsubscribe on drop.                                            | [`Subscription`]                           |
//! | **Policies**      | Propagate or isolate callback failures.                         | [`FailurePolicy`], [`DispatchReport`]      |
//! | **Delivery**      | Feed a registry from a broadcast channel on a tokio task.       | [`Bus`], [`Pump`], [`PumpStats`]           |
//! | **Errors**        | Typed errors for handle misuse and callback failures.           | [`RegistryError`], [`CallbackError`]       |
//! | **Configuration** | Centralize registry settings.                                   | [`Config`]                                 |
//!
//! ## Optional features
//! - `logging` (default): exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use slotcast::{Bus, Config, Pump, PumpExit, Subscribers};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config::default();
//!     let subs: Arc<Subscribers<u64, &'static str>> = Arc::new(Subscribers::with_config(cfg.clone()));
//!
//!     // Plain handle: stays live until unsubscribed.
//!     let physics = subs.subscribe(|frame, name| { println!("{name} @ {frame}"); Ok(()) }, "physics");
//!
//!     // Scoped handle: unsubscribes when the guard drops.
//!     let ui = subs.subscribe_scoped(|_, _| Ok(()), "ui");
//!
//!     // Drive the registry from a bus.
//!     let bus = Bus::new(cfg.bus_capacity_clamped());
//!     let pump = Pump::spawn(Arc::clone(&subs), &bus, CancellationToken::new());
//!     for frame in 0..3 {
//!         bus.publish(frame);
//!     }
//!     drop(bus);
//!     let stats = pump.await?;
//!     assert_eq!(stats.exit, PumpExit::Closed);
//!     assert_eq!(stats.dispatched, 3);
//!
//!     drop(ui);
//!     subs.send_to(physics, &99)?;
//!     subs.unsubscribe(physics)?;
//!     assert!(subs.is_empty());
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{Config, DispatchReport, Subscribers, Subscription, SubscriptionId};
pub use error::{CallbackError, CallbackResult, RegistryError};
pub use events::{Bus, Pump, PumpExit, PumpStats};
pub use policies::FailurePolicy;

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
