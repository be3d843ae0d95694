//! Value-changed listener registry shared by all drivers.
//!
//! Listeners carry no payload: they learn that a value may have changed and
//! re-read it from the driver. Notification order is registration order.

use std::fmt;

use crate::ids::{IdAllocator, ListenerId};

type Listener = Box<dyn FnMut()>;

#[derive(Default)]
pub struct Listeners {
    ids: IdAllocator,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, returning the id used to remove it.
    pub fn add(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        let id = self.ids.alloc_listener();
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false when the id is unknown.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    /// Invoke every registered listener once.
    pub fn notify(&mut self) {
        for (_, listener) in self.entries.iter_mut() {
            listener();
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
