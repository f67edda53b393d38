//! Dispatch policies.
//!
//! ## Contents
//! - [`FailurePolicy`] what a broadcast does when a subscriber fails (propagate / isolate)
//!
//! ## Quick wiring
//! ```text
//! Config { failure_policy: FailurePolicy, .. }
//!      └─► core::Subscribers::send / send_to use it to decide stop vs continue
//! ```
//!
//! ## Defaults
//! - `FailurePolicy::Propagate` (a failing subscriber aborts the rest of the broadcast).

mod failure;

pub use failure::FailurePolicy;
