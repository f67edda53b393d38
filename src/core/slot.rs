//! Slot storage for [`Subscribers`](super::Subscribers).

use std::sync::Arc;

use crate::error::CallbackResult;

use super::id::SubscriptionId;

/// Shared callback stored in a slot.
pub(crate) type Callback<E, C> = Arc<dyn Fn(&E, &C) -> CallbackResult + Send + Sync>;

/// Live occupant of a slot.
///
/// Cloned out of the table before invocation so no table borrow is held while
/// user code runs.
pub(crate) struct Entry<E, C> {
    pub(crate) callback: Callback<E, C>,
    pub(crate) context: Arc<C>,
}

impl<E, C> Clone for Entry<E, C> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
            context: Arc::clone(&self.context),
        }
    }
}

impl<E, C> Entry<E, C> {
    #[inline]
    pub(crate) fn call(&self, event: &E) -> CallbackResult {
        (self.callback)(event, &*self.context)
    }
}

/// One table entry: empty or live, plus the generation of its latest occupant.
pub(crate) struct Slot<E, C> {
    entry: Option<Entry<E, C>>,
    generation: u32,
}

impl<E, C> Slot<E, C> {
    /// Fresh slot holding `entry` at generation 0.
    pub(crate) fn occupied(entry: Entry<E, C>) -> Self {
        Self {
            entry: Some(entry),
            generation: 0,
        }
    }

    #[inline]
    pub(crate) fn is_free(&self) -> bool {
        self.entry.is_none()
    }

    #[inline]
    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }

    #[inline]
    pub(crate) fn entry(&self) -> Option<&Entry<E, C>> {
        self.entry.as_ref()
    }

    /// Reuses a free slot; the new occupant gets the next generation.
    pub(crate) fn reoccupy(&mut self, entry: Entry<E, C>) -> u32 {
        debug_assert!(self.is_free());
        self.generation = self.generation.wrapping_add(1);
        self.entry = Some(entry);
        self.generation
    }

    /// Empties the slot, handing back the previous occupant if any.
    pub(crate) fn clear(&mut self) -> Option<Entry<E, C>> {
        self.entry.take()
    }

    /// Handle of the current (or most recent) occupant at `index`.
    #[inline]
    pub(crate) fn id(&self, index: usize) -> SubscriptionId {
        SubscriptionId::new(index, self.generation)
    }
}
