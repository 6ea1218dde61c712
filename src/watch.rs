//! Single-value channel: the publisher stores the latest value, subscribers read it or ask
//! whether it changed since they last looked.
//!
//! Everything runs on one thread, so the shared slot is an `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::rc::Rc;

struct Slot<T> {
    value: T,
    version: u64,
}

/// Write side of a [`channel`].
pub struct Publisher<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

/// Read side of a [`channel`].
pub struct Subscriber<T> {
    slot: Rc<RefCell<Slot<T>>>,
    seen: u64,
}

/// Creates a channel holding `initial`.
pub fn channel<T: Clone + PartialEq>(initial: T) -> (Publisher<T>, Subscriber<T>) {
    let slot = Rc::new(RefCell::new(Slot {
        value: initial,
        version: 0,
    }));
    let subscriber = Subscriber {
        slot: Rc::clone(&slot),
        seen: 0,
    };
    (Publisher { slot }, subscriber)
}

impl<T: Clone + PartialEq> Publisher<T> {
    /// Stores `value`. Returns false, and wakes nobody, if it equals the current one.
    pub fn publish(&self, value: T) -> bool {
        let mut slot = self.slot.borrow_mut();
        if slot.value == value {
            return false;
        }
        slot.value = value;
        slot.version += 1;
        true
    }

    #[must_use]
    /// Current value.
    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    #[must_use]
    /// New subscriber. If anything was published already, its first `changed` call reports it.
    pub fn subscribe(&self) -> Subscriber<T> {
        Subscriber {
            slot: Rc::clone(&self.slot),
            seen: 0,
        }
    }
}

impl<T: Clone> Subscriber<T> {
    #[must_use]
    /// Current value, whether or not it was seen.
    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Returns the value if it was published since the last call.
    pub fn changed(&mut self) -> Option<T> {
        let slot = self.slot.borrow();
        if slot.version == self.seen {
            return None;
        }
        self.seen = slot.version;
        Some(slot.value.clone())
    }
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
            seen: self.seen,
        }
    }
}

#[cfg(test)]
#[path = "tests/watch.rs"]
mod tests;
