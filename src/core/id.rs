//! # Subscription handles.
//!
//! A [`SubscriptionId`] pairs a slot index with the slot's generation at the time
//! the subscription was made. The index alone is what first-fit reuse hands out
//! again; the generation tells successive occupants of the same slot apart, so a
//! handle kept after `unsubscribe` can never address a newer subscriber.

use std::fmt;

/// Handle identifying one subscription for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId {
    index: usize,
    generation: u32,
}

impl SubscriptionId {
    /// Builds a handle from raw parts.
    ///
    /// Mostly useful in tests; handles obtained from `subscribe` are the only ones
    /// guaranteed to address a live subscription.
    #[must_use]
    pub const fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index; also the broadcast position of this subscriber.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Generation of the slot when this subscription was made.
    #[inline]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_index_first() {
        let a = SubscriptionId::new(0, 9);
        let b = SubscriptionId::new(1, 0);
        assert!(a < b);
        assert_eq!(a.to_string(), "#0@9");
    }
}
