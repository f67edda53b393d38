//! # LogWriter - tracing-backed event printer
//!
//! A minimal subscriber that emits every incoming event through [`tracing`].
//! Use it for tests or demos, or to see what a registry is dispatching.
//!
//! ## Example output (with a `fmt` subscriber installed)
//! ```text
//! INFO slotcast: event subscriber="frame" event=Tick { frame: 1 }
//! INFO slotcast: event subscriber="frame" event=Tick { frame: 2 }
//! ```

use std::fmt::Debug;

use tracing::info;

use crate::error::CallbackResult;

/// Event writer subscriber.
#[derive(Clone, Copy, Debug)]
pub struct LogWriter {
    name: &'static str,
}

impl LogWriter {
    /// Construct a new [`LogWriter`] tagging its records with `name`.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Name attached to every record.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Turns the writer into a callback for [`Subscribers::subscribe`](crate::Subscribers::subscribe).
    ///
    /// # Example
    /// ```
    /// use slotcast::{LogWriter, Subscribers};
    ///
    /// let subs: Subscribers<u32> = Subscribers::new();
    /// subs.subscribe(LogWriter::new("ticks").into_callback::<u32, ()>(), ());
    /// assert_eq!(subs.send(&1).unwrap().delivered, 1);
    /// ```
    pub fn into_callback<E, C>(self) -> impl Fn(&E, &C) -> CallbackResult + Send + Sync + 'static
    where
        E: Debug + 'static,
        C: 'static,
    {
        move |event: &E, _ctx: &C| {
            info!(target: "slotcast", subscriber = self.name, event = ?event, "event");
            Ok(())
        }
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new("LogWriter")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Subscribers;

    #[derive(Debug)]
    struct Tick {
        #[allow(dead_code)]
        frame: u64,
    }

    #[test]
    fn test_log_writer_always_succeeds() {
        let subs: Subscribers<Tick, String> = Subscribers::new();
        let id = subs.subscribe(
            LogWriter::default().into_callback::<Tick, String>(),
            String::from("ctx"),
        );
        assert_eq!(subs.send(&Tick { frame: 1 }).unwrap().delivered, 1);
        assert_eq!(subs.send_to(id, &Tick { frame: 2 }), Ok(true));
        assert_eq!(LogWriter::default().name(), "LogWriter");
    }
}
