//! Top-level event delegation registry.
//!
//! Handlers are never attached to individual nodes. Generation and control
//! record event-name to handler bindings against a node address; dispatch
//! starts at the target address and bubbles along the ancestor chain, so one
//! root listener serves the whole tree.

use crate::address::NodeAddress;
use indexmap::IndexMap;
use smartstring::{LazyCompact, SmartString};
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub type EventName = SmartString<LazyCompact>;

/// Cloneable event handler. Handlers share ownership so the registry can keep
/// a binding alive while a dispatch is in flight.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&DomEvent)>);

impl Handler {
    pub fn new(f: impl Fn(&DomEvent) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &DomEvent) {
        (self.0)(event);
    }

    /// Identity comparison. Two handlers are the same binding only when they
    /// share the same allocation.
    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler")
    }
}

pub type HandlerMap = IndexMap<EventName, Handler>;

/// Event delivered to handlers during dispatch.
#[derive(Debug)]
pub struct DomEvent {
    pub kind: EventName,
    /// Address the event was dispatched at.
    pub target: NodeAddress,
    /// Address whose handler is currently running; changes as the event
    /// bubbles.
    pub current: NodeAddress,
    stopped: Cell<bool>,
}

impl DomEvent {
    fn new(kind: &str, target: NodeAddress) -> Self {
        Self {
            kind: EventName::from(kind),
            current: target.clone(),
            target,
            stopped: Cell::new(false),
        }
    }

    pub fn stop_propagation(&self) {
        self.stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// Process-wide (per render context) table from node address to event
/// bindings.
#[derive(Default)]
pub struct EventRegistry {
    table: HashMap<NodeAddress, HandlerMap>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)bind handlers for `at`. Existing bindings for other event names
    /// are kept; bindings for the same event name are overwritten, so
    /// re-registration is idempotent.
    pub fn register_handlers(&mut self, at: &NodeAddress, handlers: &HandlerMap) {
        if handlers.is_empty() {
            return;
        }
        let slot = self.table.entry(at.clone()).or_default();
        for (event, handler) in handlers {
            slot.insert(event.clone(), handler.clone());
        }
        tracing::trace!(address = %at, count = handlers.len(), "registered handlers");
    }

    /// Drop every binding recorded for `at`.
    pub fn unregister(&mut self, at: &NodeAddress) {
        if self.table.remove(at).is_some() {
            tracing::trace!(address = %at, "unregistered handlers");
        }
    }

    pub fn handlers_at(&self, at: &NodeAddress) -> Option<&HandlerMap> {
        self.table.get(at)
    }

    /// Number of addresses with at least one binding.
    pub fn bound_address_count(&self) -> usize {
        self.table.len()
    }

    /// Route an event to `target`, bubbling toward the root. Returns how many
    /// handlers ran.
    pub fn dispatch(&self, kind: &str, target: &NodeAddress) -> usize {
        let mut event = DomEvent::new(kind, target.clone());
        let mut invoked = 0;
        let mut current = Some(target.clone());
        while let Some(at) = current {
            let handler = self
                .table
                .get(&at)
                .and_then(|map| map.get(event.kind.as_str()))
                .cloned();
            if let Some(handler) = handler {
                event.current = at.clone();
                handler.call(&event);
                invoked += 1;
                if event.propagation_stopped() {
                    break;
                }
            }
            current = at.parent();
        }
        invoked
    }
}
