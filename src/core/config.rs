//! # Registry configuration.
//!
//! Provides [`Config`] centralized settings for a [`Subscribers`](crate::Subscribers)
//! registry and the [`Bus`](crate::Bus) that feeds it.
//!
//! Config is used in two ways:
//! 1. **Registry creation**: `Subscribers::with_config(config)`
//! 2. **Bus creation**: `Bus::new(config.bus_capacity_clamped())`
//!
//! ## Sentinel values
//! - `initial_capacity = 0` → no preallocation (table grows on demand)
//! - `bus_capacity = 0` → clamped to 1

use crate::policies::FailurePolicy;

/// Configuration for a subscriber registry.
///
/// ## Field semantics
/// - `failure_policy`: What a broadcast does when a callback fails
/// - `initial_capacity`: Slots preallocated up front (`0` = none)
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Behavior on callback failure.
    ///
    /// Applies to both broadcast and directed dispatch.
    pub failure_policy: FailurePolicy,

    /// Number of slots to preallocate.
    ///
    /// Only reserves storage; it does not create slots, so handles still start at 0.
    pub initial_capacity: usize,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// A pump that lags behind more than `bus_capacity` messages observes
    /// `Lagged` and skips older items. Minimum value is 1 (enforced by Bus).
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the preallocation hint as an `Option`.
    ///
    /// - `None` → no preallocation
    /// - `Some(n)` → reserve `n` slots
    #[inline]
    pub fn capacity_hint(&self) -> Option<usize> {
        if self.initial_capacity == 0 {
            None
        } else {
            Some(self.initial_capacity)
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `failure_policy = FailurePolicy::Propagate` (first failure aborts the broadcast)
    /// - `initial_capacity = 0` (grow on demand)
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            initial_capacity: 0,
            bus_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.failure_policy, FailurePolicy::Propagate);
        assert_eq!(cfg.capacity_hint(), None);
        assert_eq!(cfg.bus_capacity_clamped(), 1024);
    }

    #[test]
    fn test_sentinels() {
        let cfg = Config {
            initial_capacity: 16,
            bus_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.capacity_hint(), Some(16));
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
