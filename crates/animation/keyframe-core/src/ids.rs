//! Identifiers and a simple allocator for listener registrations.

use serde::{Deserialize, Serialize};

/// Handle returned when registering a value-changed listener.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

/// Monotonic allocator for ListenerId.
/// IDs are opaque externally and never reused by one allocator.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_listener: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        id
    }
}
