//! # Built-in subscribers.
//!
//! Ready-made callbacks for [`Subscribers`](crate::Subscribers) registries.
//!
//! - [`LogWriter`] emits each event through `tracing` (feature `logging`).
//!
//! ## Writing your own
//! Any `Fn(&E, &C) -> CallbackResult + Send + Sync + 'static` is a subscriber:
//! ```rust
//! use slotcast::{CallbackError, Subscribers};
//!
//! let subs: Subscribers<u32, &'static str> = Subscribers::new();
//! subs.subscribe(
//!     |frame, name| {
//!         if *frame == 0 {
//!             return Err(CallbackError::failed(format!("{name}: frame 0")));
//!         }
//!         Ok(())
//!     },
//!     "metrics",
//! );
//! ```

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
