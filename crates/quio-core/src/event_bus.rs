//! Event bus between the session controller and whatever observes it.
//!
//! The bus is single-threaded (WASM constraint) and uses interior mutability
//! via RefCell. Events are buffered until the observer drains them.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use quio_types::event::SessionEvent;

/// Shared event bus, cheap to clone via Rc.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<SessionEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Publish an event. Called by the controller.
    pub fn emit(&self, event: SessionEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Drain all pending events.
    pub fn drain(&self) -> Vec<SessionEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
