// tests/history_tests.rs

use logiq::{Bit, Circuit, CircuitError, CircuitEvent, EventBus, Gate, CircuitConfig};
use std::cell::RefCell;
use std::rc::Rc;

// Helper: gate and registers at every operation, for comparing circuit states
fn layout(circuit: &Circuit) -> Vec<(u32, Gate, Vec<String>)> {
    circuit
        .operations()
        .iter()
        .map(|op| (op.moment(), op.gate(), op.registers().iter().map(ToString::to_string).collect()))
        .collect()
}

fn history_events(circuit: &Circuit) -> Rc<RefCell<Vec<&'static str>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    circuit.events().subscribe(move |event| match event {
        CircuitEvent::UndoCapable { .. }
        | CircuitEvent::UndoDepleted { .. }
        | CircuitEvent::RedoCapable { .. }
        | CircuitEvent::RedoDepleted { .. } => sink.borrow_mut().push(event.name()),
        _ => {}
    });
    log
}

#[test]
fn test_replace_undo_redo_round_trip() -> Result<(), CircuitError> {
    let mut c = Circuit::new(3, 2)?;
    c.set_bits(&[Bit::ONE, Bit::ONE, Bit::ZERO])?;
    c.set("AND", 1, [1, 2])?;
    let before = layout(&c);
    let before_bits = c.evaluate();
    let before_wires = c.intermediate_wires().cloned();

    c.set("XOR", 1, [1, 2])?;
    let after = layout(&c);
    assert_ne!(before, after);

    assert!(c.undo()?);
    assert_eq!(layout(&c), before);
    assert_eq!(c.evaluate(), before_bits);
    // the restored gate writes the same intermediate wire as before
    assert_eq!(c.intermediate_wires().cloned(), before_wires);

    assert!(c.redo()?);
    assert_eq!(layout(&c), after);
    Ok(())
}

#[test]
fn test_undo_and_redo_at_the_ends() -> Result<(), CircuitError> {
    let mut c = Circuit::new(2, 2)?;
    assert!(!c.undo()?);
    assert!(!c.redo()?);
    c.set("NOT", 1, [1])?;
    assert!(!c.redo()?);
    assert!(c.undo()?);
    assert!(!c.undo()?);
    assert!(c.is_empty());
    Ok(())
}

#[test]
fn test_clear_is_idempotent() -> Result<(), CircuitError> {
    let mut c = Circuit::new(2, 2)?;
    c.set("NOT", 1, [1])?.set("OR", 2, [1, 2])?;
    c.clear(2, [1])?;
    let once = layout(&c);
    let recorded = c.history().len();
    c.clear(2, [1])?;
    assert_eq!(layout(&c), once);
    assert_eq!(c.history().len(), recorded);
    Ok(())
}

#[test]
fn test_clear_can_be_undone() -> Result<(), CircuitError> {
    let mut c = Circuit::new(2, 1)?;
    c.set("NAND", 1, [2, 1])?;
    let placed = layout(&c);
    c.clear(1, [2])?;
    assert!(c.is_empty());
    assert!(c.undo()?);
    assert_eq!(layout(&c), placed);
    assert!(c.redo()?);
    assert!(c.is_empty());
    Ok(())
}

#[test]
fn test_new_edit_after_undo_drops_redo() -> Result<(), CircuitError> {
    let mut c = Circuit::new(2, 3)?;
    c.set("NOT", 1, [1])?.set("NOT", 2, [1])?;
    c.undo()?;
    assert!(c.history().can_redo());
    c.set("BUF", 3, [2])?;
    assert!(!c.history().can_redo());
    assert_eq!(c.history().len(), 2);
    assert_eq!(c.history().position(), 2);
    Ok(())
}

#[test]
fn test_boundary_events_fire_on_change_only() -> Result<(), CircuitError> {
    let mut c = Circuit::new(2, 3)?;
    let log = history_events(&c);

    c.set("NOT", 1, [1])?; // undo becomes possible
    c.set("NOT", 2, [2])?; // nothing changes
    c.undo()?; // redo becomes possible
    c.undo()?; // undo runs out
    c.redo()?; // undo possible again
    c.set("NOT", 3, [1])?; // redo branch dropped

    assert_eq!(
        *log.borrow(),
        vec![
            "undo is capable",
            "redo is capable",
            "undo is depleted",
            "undo is capable",
            "redo is depleted",
        ]
    );
    Ok(())
}

#[test]
fn test_rejected_edits_are_not_recorded() -> Result<(), CircuitError> {
    let mut c = Circuit::new(2, 2)?;
    assert!(c.set("MAYBE", 1, [1]).is_err());
    assert!(c.set("NOT", 1, [5]).is_err());
    assert!(c.clear(9, [1]).is_err());
    assert!(c.history().is_empty());
    Ok(())
}

#[test]
fn test_bit_changes_are_not_undoable() -> Result<(), CircuitError> {
    let mut c = Circuit::new(2, 2)?;
    c.toggle_bit(0)?;
    assert!(!c.history().can_undo());
    assert_eq!(c.bits()[0], Bit::ONE);
    Ok(())
}

#[test]
fn test_circuits_sharing_a_bus() -> Result<(), CircuitError> {
    let bus = Rc::new(EventBus::new());
    let mut a = Circuit::with_events(CircuitConfig::default(), Rc::clone(&bus))?;
    let mut b = Circuit::with_events(CircuitConfig::default(), Rc::clone(&bus))?;
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    bus.subscribe(move |event| {
        if let CircuitEvent::GatePlaced { circuit, .. } = event {
            sink.borrow_mut().push(*circuit);
        }
    });
    a.set("NOT", 1, [1])?;
    b.set("NOT", 1, [1])?;
    a.undo()?;
    assert_eq!(*seen.borrow(), vec![a.id(), b.id()]);
    Ok(())
}
