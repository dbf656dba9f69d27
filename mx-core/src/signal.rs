// SPDX-License-Identifier: LGPL-3.0-only
use std::fmt;

/// Identifies a connected handler, so it can be disconnected later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// A boxed handler invoked with a reference to the emitted value.
pub type Handler<T> = Box<dyn FnMut(&T)>;

/// An ordered list of handlers for one signal.
///
/// Handlers are invoked in connection order.
pub struct Handlers<T: 'static> {
    next_id: u64,
    handlers: Vec<(HandlerId, Handler<T>)>,
}

impl<T: 'static> Handlers<T> {
    /// Create an empty handler list.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }

    /// Connect a handler and return its id.
    pub fn connect(&mut self, handler: impl FnMut(&T) + 'static) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Disconnect a handler. Returns false if it was not connected.
    pub fn disconnect(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Invoke every handler with the value.
    pub fn emit(&mut self, value: &T) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(value);
        }
    }

    /// Number of connected handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handler is connected.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Disconnect every handler.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl<T: 'static> Default for Handlers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Handlers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("connected", &self.handlers.len())
            .finish()
    }
}
