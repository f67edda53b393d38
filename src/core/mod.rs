//! Registry core: slot table, handles and dispatch.
//!
//! The public API from this module is [`Subscribers`] together with the
//! handle, guard, report and configuration types it hands out.
//!
//! Internal modules:
//! - [`registry`]: the slot table; subscribe/unsubscribe/send/send_to;
//! - [`slot`]: one table entry (empty or live) with its generation;
//! - [`id`]: generation-tagged handles;
//! - [`subscription`]: RAII guard unsubscribing on drop;
//! - [`report`]: outcome of a broadcast;
//! - [`config`]: registry and bus settings.

mod config;
mod id;
mod registry;
mod report;
mod slot;
mod subscription;

pub use config::Config;
pub use id::SubscriptionId;
pub use registry::Subscribers;
pub use report::DispatchReport;
pub use subscription::Subscription;
