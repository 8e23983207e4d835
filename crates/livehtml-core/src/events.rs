//! Session notifications.
//!
//! Observers get a `Subscription` back from `subscribe` and hand it to
//! `unsubscribe` when they are done. No handler is ever looked up through
//! shared state.

use std::fmt;

/// Something the session did that a host may want to react to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The preview was rebuilt.
    PreviewRendered { wrapped: bool, failures: usize },
    /// The hint popup opened with this many candidates.
    HintsShown { count: usize },
    /// The hint popup closed.
    HintsClosed,
    /// A candidate was accepted.
    Accepted { label: smol_str::SmolStr },
    /// The document was replaced by a load.
    Loaded { bytes: usize },
    /// The document was emptied.
    Cleared,
}

/// Handle returned by `Listeners::subscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping the handle makes the listener impossible to remove"]
pub struct Subscription(u64);

type Handler<E> = Box<dyn FnMut(&E)>;

/// Ordered set of event handlers.
pub struct Listeners<E> {
    next_id: u64,
    handlers: Vec<(u64, Handler<E>)>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.handlers.len())
            .finish()
    }
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. It runs for every event until unsubscribed.
    pub fn subscribe(&mut self, handler: impl FnMut(&E) + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        Subscription(id)
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(id, _)| *id != subscription.0);
        self.handlers.len() != before
    }

    /// Deliver an event to every handler, in subscription order.
    pub fn emit(&mut self, event: &E) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
