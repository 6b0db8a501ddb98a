use std::cell::RefCell;

use crate::event::CanvasEvent;

/// Receives every canvas notification. Handlers run synchronously on the
/// owning thread; `Send` lets hosts hand ownership across threads before
/// subscribing.
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &CanvasEvent);
}

/// Broadcasts canvas events to registered handlers in subscription order.
///
/// Dispatch is synchronous; handlers must not re-enter the store mutation
/// that triggered the event.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.borrow().len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    pub fn emit(&self, event: CanvasEvent) {
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(&event);
        }
    }
}
