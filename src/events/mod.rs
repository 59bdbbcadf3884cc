// src/events/mod.rs

//! Notifications a circuit broadcasts to whoever renders or follows it.
//!
//! An [`EventBus`] is handed to a circuit at construction (or created for
//! it) and shared through `Rc`. Delivery is synchronous: every listener has
//! seen an event before the call that emitted it returns, in the order the
//! listeners subscribed.

use crate::core::{Bit, WireIndex};
use crate::evaluation::WireState;
use crate::operations::OutputWire;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CIRCUIT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a circuit, carried by every event so a
/// listener attached to a shared bus can tell circuits apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CircuitId(pub u64);

impl CircuitId {
    pub(crate) fn next() -> Self {
        CircuitId(NEXT_CIRCUIT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CircuitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "circuit #{}", self.0)
    }
}

/// Something that happened to a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitEvent {
    /// A gate was placed (or replaced one) at `moment` on `registers`.
    GatePlaced {
        circuit: CircuitId,
        moment: u32,
        registers: Vec<WireIndex>,
    },
    /// The gate anchored at `(moment, registers[0])` was removed.
    GateCleared {
        circuit: CircuitId,
        moment: u32,
        registers: Vec<WireIndex>,
    },
    EvaluateBegan {
        circuit: CircuitId,
    },
    /// One operation was evaluated.
    EvaluateProgressed {
        circuit: CircuitId,
        /// `completed / total`, in `0.0..=1.0`
        progress: f64,
        completed: usize,
        total: usize,
        moment: u32,
        inputs: Vec<WireIndex>,
        output: OutputWire,
        /// Display name of the gate
        gate: &'static str,
        /// Wire values right after this operation
        state: WireState,
    },
    EvaluateCompleted {
        circuit: CircuitId,
        results: Vec<Bit>,
        intermediate_wires: WireState,
        trace: Vec<WireState>,
    },
    UndoDepleted {
        circuit: CircuitId,
    },
    UndoCapable {
        circuit: CircuitId,
    },
    RedoDepleted {
        circuit: CircuitId,
    },
    RedoCapable {
        circuit: CircuitId,
    },
}

impl CircuitEvent {
    /// The circuit the event concerns.
    pub fn circuit(&self) -> CircuitId {
        match self {
            CircuitEvent::GatePlaced { circuit, .. }
            | CircuitEvent::GateCleared { circuit, .. }
            | CircuitEvent::EvaluateBegan { circuit }
            | CircuitEvent::EvaluateProgressed { circuit, .. }
            | CircuitEvent::EvaluateCompleted { circuit, .. }
            | CircuitEvent::UndoDepleted { circuit }
            | CircuitEvent::UndoCapable { circuit }
            | CircuitEvent::RedoDepleted { circuit }
            | CircuitEvent::RedoCapable { circuit } => *circuit,
        }
    }

    /// Short event name, e.g. `"gate placed"`.
    pub fn name(&self) -> &'static str {
        match self {
            CircuitEvent::GatePlaced { .. } => "gate placed",
            CircuitEvent::GateCleared { .. } => "gate cleared",
            CircuitEvent::EvaluateBegan { .. } => "evaluate began",
            CircuitEvent::EvaluateProgressed { .. } => "evaluate progressed",
            CircuitEvent::EvaluateCompleted { .. } => "evaluate completed",
            CircuitEvent::UndoDepleted { .. } => "undo is depleted",
            CircuitEvent::UndoCapable { .. } => "undo is capable",
            CircuitEvent::RedoDepleted { .. } => "redo is depleted",
            CircuitEvent::RedoCapable { .. } => "redo is capable",
        }
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CircuitEvent)>;

/// Synchronous publish/subscribe channel for [`CircuitEvent`]s.
#[derive(Default)]
pub struct EventBus {
    next_id: Cell<u64>,
    // Ids of every live subscription, delivering or not.
    subscribed: RefCell<Vec<SubscriptionId>>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    // Subscriptions made while an event is being delivered.
    pending: RefCell<Vec<(SubscriptionId, Listener)>>,
    // Events emitted from inside a listener.
    queued: RefCell<VecDeque<CircuitEvent>>,
    emitting: Cell<bool>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener; it receives every event emitted from now on.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CircuitEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribed.borrow_mut().push(id);
        if self.emitting.get() {
            self.pending.borrow_mut().push((id, Box::new(listener)));
        } else {
            self.listeners.borrow_mut().push((id, Box::new(listener)));
        }
        tracing::debug!(subscription = id.0, deferred = self.emitting.get(), "listener subscribed");
        id
    }

    /// Removes a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribed = self.subscribed.borrow_mut();
        let before = subscribed.len();
        subscribed.retain(|sid| *sid != id);
        if subscribed.len() == before {
            return false;
        }
        if !self.emitting.get() {
            self.listeners.borrow_mut().retain(|(sid, _)| *sid != id);
        }
        tracing::debug!(subscription = id.0, "listener removed");
        true
    }

    pub fn listener_count(&self) -> usize {
        self.subscribed.borrow().len()
    }

    /// Delivers `event` to every listener before returning.
    ///
    /// Listeners may subscribe or unsubscribe while handling an event; the
    /// change applies from the next event on. Events emitted from inside a
    /// listener are delivered after the current one, before this call
    /// returns.
    pub fn emit(&self, event: &CircuitEvent) {
        if self.emitting.get() {
            self.queued.borrow_mut().push_back(event.clone());
            return;
        }

        self.emitting.set(true);
        let mut listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        let mut next = None;
        loop {
            let current = next.as_ref().unwrap_or(event);
            for (_, listener) in listeners.iter_mut() {
                listener(current);
            }
            listeners.append(&mut self.pending.borrow_mut());
            let subscribed = self.subscribed.borrow();
            listeners.retain(|(sid, _)| subscribed.contains(sid));
            drop(subscribed);

            next = self.queued.borrow_mut().pop_front();
            if next.is_none() {
                break;
            }
        }
        self.emitting.set(false);
        *self.listeners.borrow_mut() = listeners;
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn began(id: u64) -> CircuitEvent {
        CircuitEvent::EvaluateBegan { circuit: CircuitId(id) }
    }

    #[test]
    fn test_listeners_see_events_in_subscription_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b"] {
            let log = Rc::clone(&log);
            bus.subscribe(move |e| log.borrow_mut().push((tag, e.circuit().0)));
        }
        bus.emit(&began(1));
        bus.emit(&began(2));
        assert_eq!(*log.borrow(), vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = bus.subscribe(move |_| c.set(c.get() + 1));
        bus.emit(&began(0));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(&began(0));
        assert_eq!(count.get(), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_subscribing_from_a_listener_applies_to_next_event() {
        let bus = Rc::new(EventBus::new());
        let late = Rc::new(Cell::new(0));
        let bus_in = Rc::clone(&bus);
        let late_in = Rc::clone(&late);
        let armed = Cell::new(true);
        bus.subscribe(move |_| {
            if armed.replace(false) {
                let late = Rc::clone(&late_in);
                bus_in.subscribe(move |_| late.set(late.get() + 1));
            }
        });
        bus.emit(&began(0));
        assert_eq!(late.get(), 0);
        bus.emit(&began(0));
        assert_eq!(late.get(), 1);
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(began(3).name(), "evaluate began");
        assert_eq!(CircuitEvent::RedoCapable { circuit: CircuitId(3) }.name(), "redo is capable");
    }
}
