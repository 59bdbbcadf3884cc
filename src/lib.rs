// src/lib.rs

//! `logiq` - A library for building and evaluating classical logic circuits
//!
//! A circuit is a grid of gates laid out over wires (bandwidth) and moments
//! (timewidth). Evaluating it threads the input bits through the gates moment
//! by moment and keeps a snapshot of every wire after each moment, so a
//! viewer can replay how the signals travelled.

pub mod core;
pub mod gates;
pub mod operations;
pub mod events;
pub mod history;
pub mod circuits;
pub mod evaluation;
pub mod validation;
pub mod names;

// Re-export the most common types for easier top-level use
pub use core::{Bit, CircuitError, IntermediateId, IntoWireIndex, Wire, WireIndex};
pub use gates::Gate;
pub use operations::{Operation, OutputWire};
pub use events::{CircuitEvent, CircuitId, EventBus, SubscriptionId};
pub use history::{Command, Entry, History};
pub use circuits::{Circuit, CircuitBuilder, CircuitConfig, TableCell};
pub use evaluation::{Diagnostic, EvaluationResult, Evaluator, EvaluatorConfig, WireState};
pub use validation::{
    check_bounds,
    check_ordering,
    find_shared_intermediate_positions,
    validate_circuit,
};
pub use names::{random_name, NameGenerator};

// Example 1: A single inverter
// The NOT gate overwrites the wire it sits on; the trace holds the initial
// state plus one snapshot per moment.
/// ```
/// use logiq::{Bit, Circuit, CircuitError};
///
/// # fn main() -> Result<(), CircuitError> {
/// let mut circuit = Circuit::new(1, 3)?;
/// circuit.set("NOT", 2, [1])?;
///
/// assert_eq!(circuit.evaluate(), vec![Bit::ONE]);
///
/// let trace = circuit.trace().expect("just evaluated");
/// assert_eq!(trace.len(), 4);
/// assert_eq!(trace[0].primary(1), Some(Bit::ZERO));
/// assert_eq!(trace[3].primary(1), Some(Bit::ONE));
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Undo and redo
// Replacing a gate and undoing the replacement brings the old gate back.
/// ```
/// use logiq::{Circuit, CircuitError, Gate};
///
/// # fn main() -> Result<(), CircuitError> {
/// let mut circuit = Circuit::new(2, 1)?;
/// circuit.set("AND", 1, [1, 2])?;
/// circuit.set("OR", 1, [1, 2])?;
/// assert_eq!(circuit.get(1, 1).map(|op| op.gate()), Some(Gate::Or));
///
/// assert!(circuit.undo()?);
/// assert_eq!(circuit.get(1, 1).map(|op| op.gate()), Some(Gate::And));
/// assert!(circuit.redo()?);
/// assert_eq!(circuit.get(1, 1).map(|op| op.gate()), Some(Gate::Or));
/// assert!(!circuit.redo()?);
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = ();

// Example 3: Following a circuit through its event bus
/// ```
/// use logiq::{Circuit, CircuitError, CircuitEvent};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// # fn main() -> Result<(), CircuitError> {
/// let mut circuit = Circuit::new(2, 2)?;
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// circuit.events().subscribe(move |event| {
///     if let CircuitEvent::EvaluateProgressed { progress, .. } = event {
///         sink.borrow_mut().push(*progress);
///     }
/// });
///
/// circuit.set("NOT", 1, [1])?.set("XOR", 2, [1, 2])?;
/// circuit.evaluate();
/// assert_eq!(*seen.borrow(), vec![0.5, 1.0]);
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = ();
