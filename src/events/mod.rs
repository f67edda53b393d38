//! Event delivery around the registry: broadcast bus and pump.
//!
//! ## Contents
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//! - [`Pump`] task that broadcasts every bus event to a [`Subscribers`](crate::Subscribers) registry
//!
//! ## Quick reference
//! - **Publishers**: any code holding a `Bus` clone (tick loops, workers).
//! - **Consumers**: one `Pump` per registry; the registry's subscribers see each event once.

mod bus;
mod pump;

pub use bus::Bus;
pub use pump::{Pump, PumpExit, PumpStats};
