// tests/evaluation_tests.rs

// Import necessary types from the logiq crate
use logiq::{
    Bit, Circuit, CircuitConfig, CircuitError, CircuitEvent, Diagnostic, Gate, IntermediateId, Wire,
    WireIndex,
};
use std::cell::RefCell;
use std::rc::Rc;

// Helper to build a named circuit so reports and diagrams are stable
fn circuit(bandwidth: u32, timewidth: u32) -> Result<Circuit, CircuitError> {
    Circuit::from_config(CircuitConfig {
        bandwidth,
        timewidth,
        name: Some("Test circuit".to_string()),
    })
}

fn bits(values: &[u8]) -> Vec<Bit> {
    values.iter().map(|&v| Bit::from(v)).collect()
}

fn half(value: f64) -> WireIndex {
    WireIndex::from_f64(value).expect("valid position")
}

#[test]
fn test_empty_circuit_returns_inputs() -> Result<(), CircuitError> {
    let mut c = circuit(3, 2)?;
    c.set_bits(&bits(&[1, 0, 1]))?;
    assert_eq!(c.evaluate(), bits(&[1, 0, 1]));
    assert!(c.diagnostics().is_empty());
    Ok(())
}

#[test]
fn test_identity_is_passthrough() -> Result<(), CircuitError> {
    let mut c = circuit(2, 3)?;
    c.set_bits(&bits(&[1, 0]))?;
    c.set("I", 1, [1])?.set("BUF", 2, [2])?.set("P", 3, [1])?;
    assert_eq!(c.evaluate(), bits(&[1, 0]));
    Ok(())
}

#[test]
fn test_single_not() -> Result<(), CircuitError> {
    let mut c = circuit(1, 1)?;
    c.set("NOT", 1, [1])?;
    assert_eq!(c.evaluate(), bits(&[1]));
    Ok(())
}

#[test]
fn test_and_writes_intermediate_and_keeps_inputs() -> Result<(), CircuitError> {
    let mut c = circuit(2, 1)?;
    c.set_bits(&bits(&[1, 1]))?;
    c.set("AND", 1, [1, 2])?;

    assert_eq!(c.evaluate(), bits(&[1, 1]));
    let wires = c.intermediate_wires().expect("evaluated");
    assert_eq!(wires.read(half(1.5)), Some(Bit::ONE));
    assert_eq!(
        wires.intermediates(),
        vec![(Wire::Intermediate { id: IntermediateId(0), position: half(1.5) }, Bit::ONE)]
    );
    Ok(())
}

#[test]
fn test_every_two_input_gate_through_a_circuit() -> Result<(), CircuitError> {
    let table = [
        ("AND", [0u8, 0, 0, 1]),
        ("OR", [0, 1, 1, 1]),
        ("NAND", [1, 1, 1, 0]),
        ("NOR", [1, 0, 0, 0]),
        ("XOR", [0, 1, 1, 0]),
        ("XNOR", [1, 0, 0, 1]),
    ];
    for (symbol, outputs) in table {
        for (i, expected) in outputs.iter().enumerate() {
            let mut c = circuit(2, 1)?;
            c.set_bits(&bits(&[(i >> 1) as u8, (i & 1) as u8]))?;
            c.set(symbol, 1, [1, 2])?;
            c.evaluate();
            let result = c.last_evaluation().expect("evaluated");
            assert_eq!(result.value_at(half(1.5)), Some(Bit::from(*expected)), "{} on {}", symbol, i);
        }
    }
    Ok(())
}

#[test]
fn test_three_input_gates_land_between_outer_wires() -> Result<(), CircuitError> {
    let mut c = circuit(3, 2)?;
    c.set_bits(&bits(&[1, 1, 0]))?;
    c.set("AND3", 1, [1, 2, 3])?.set("OR3", 2, [1, 2, 3])?;
    c.evaluate();
    // both outputs sit at 2.5; the OR3 is the later writer
    let result = c.last_evaluation().expect("evaluated");
    assert_eq!(result.value_at(half(2.5)), Some(Bit::ONE));
    assert!(matches!(
        result.diagnostics(),
        [Diagnostic::SharedIntermediatePosition { moment: 2, .. }]
    ));
    Ok(())
}

#[test]
fn test_gates_can_read_intermediate_wires() -> Result<(), CircuitError> {
    // half adder plus carry inversion
    let mut c = circuit(3, 2)?;
    c.set_bits(&bits(&[1, 1, 0]))?;
    c.set("XOR", 1, [1, 2])?;
    c.set("AND", 1, [2, 3])?;
    c.set("OR", 2, [1.5, 3.0])?;
    c.evaluate();
    let result = c.last_evaluation().expect("evaluated");
    // XOR(1,1) = 0 at 1.5; AND(1,0) = 0 at 2.5; OR(0,0) = 0 at 2.5 (midpoint of 1.5 and 3)
    assert_eq!(result.value_at(half(1.5)), Some(Bit::ZERO));
    assert_eq!(result.intermediate_wires().intermediates().len(), 3);
    Ok(())
}

#[test]
fn test_trace_has_one_snapshot_per_moment() -> Result<(), CircuitError> {
    let mut c = circuit(2, 5)?;
    c.set("NOT", 2, [1])?.set("NOT", 4, [2])?;
    c.evaluate();

    let trace = c.trace().expect("evaluated");
    assert_eq!(trace.len(), 6);
    let wire1: Vec<Option<Bit>> = trace.iter().map(|s| s.primary(1)).collect();
    let wire2: Vec<Option<Bit>> = trace.iter().map(|s| s.primary(2)).collect();
    assert_eq!(wire1[0], Some(Bit::ZERO));
    // moment 1 is back-filled with the moment 2 snapshot
    assert!(wire1[1..].iter().all(|b| *b == Some(Bit::ONE)));
    assert_eq!(wire2[..3], [Some(Bit::ZERO); 3]);
    assert_eq!(wire2[4..], [Some(Bit::ONE); 2]);
    Ok(())
}

#[test]
fn test_evaluation_is_deterministic() -> Result<(), CircuitError> {
    let build = || -> Result<Circuit, CircuitError> {
        let mut c = circuit(4, 3)?;
        c.set_bits(&bits(&[1, 0, 1, 1]))?;
        c.set("XOR", 1, [1, 2])?.set("NAND", 1, [3, 4])?;
        c.set("OR", 2, [1.5, 3.5])?.set("NOT", 3, [4])?;
        Ok(c)
    };
    let mut a = build()?;
    let mut b = build()?;
    assert_eq!(a.evaluate(), b.evaluate());
    assert_eq!(a.trace(), b.trace());
    assert_eq!(a.evaluate(), b.evaluate());
    assert_eq!(a.last_evaluation(), b.last_evaluation());
    Ok(())
}

#[test]
fn test_underfed_gate_is_skipped_with_diagnostic() -> Result<(), CircuitError> {
    let mut c = circuit(2, 2)?;
    c.set_bits(&bits(&[1, 1]))?;
    c.set("AND", 1, [2])?.set("NOT", 2, [1])?;
    assert_eq!(c.evaluate(), bits(&[0, 1]));
    assert_eq!(
        c.diagnostics(),
        &[Diagnostic::InsufficientInputs {
            moment: 1,
            anchor: WireIndex::primary(2),
            gate: Gate::And,
            required: 2,
            found: 1,
        }]
    );
    Ok(())
}

#[test]
fn test_in_place_gate_on_unwritten_position() -> Result<(), CircuitError> {
    let mut c = circuit(2, 1)?;
    c.set("NOT", 1, [1.5])?;
    assert_eq!(c.evaluate(), bits(&[0, 0]));
    assert_eq!(c.intermediate_wires().and_then(|w| w.read(half(1.5))), Some(Bit::ONE));
    assert!(c.diagnostics().is_empty());
    assert_eq!(c.report(), "Bit 1: 0 (LOW)\nBit 2: 0 (LOW)\nWire 1.5: 1 (HIGH)\n");
    Ok(())
}

#[test]
fn test_in_place_wire_does_not_clash_with_placed_ones() -> Result<(), CircuitError> {
    let mut c = circuit(3, 2)?;
    c.set_bits(&bits(&[1, 1, 0]))?;
    c.set("BUF", 1, [2.5])?.set("AND", 2, [1, 2])?;
    c.evaluate();
    let wires = c.intermediate_wires().expect("evaluated").intermediates();
    assert_eq!(wires.len(), 2);
    assert_ne!(wires[0].0, wires[1].0);
    assert_eq!(c.last_evaluation().and_then(|r| r.value_at(half(1.5))), Some(Bit::ONE));
    assert_eq!(c.last_evaluation().and_then(|r| r.value_at(half(2.5))), Some(Bit::ZERO));
    Ok(())
}

#[test]
fn test_report_lists_bits_then_wires() -> Result<(), CircuitError> {
    let mut c = circuit(3, 2)?;
    c.set_bits(&bits(&[1, 0, 1]))?;
    c.set("OR", 1, [2, 3])?.set("AND", 2, [1, 2])?;
    let report = c.report();
    assert_eq!(
        report,
        "Bit 1: 1 (HIGH)\nBit 2: 0 (LOW)\nBit 3: 1 (HIGH)\nWire 1.5: 0 (LOW)\nWire 2.5: 1 (HIGH)\n"
    );
    assert!(!c.needs_evaluation());
    Ok(())
}

#[test]
fn test_evaluation_events_carry_state() -> Result<(), CircuitError> {
    let mut c = circuit(2, 1)?;
    c.set_bits(&bits(&[0, 1]))?;
    c.set("OR", 1, [1, 2])?;
    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&snapshots);
    c.events().subscribe(move |event| match event {
        CircuitEvent::EvaluateProgressed { state, gate, .. } => {
            sink.borrow_mut().push((*gate, state.read(half(1.5))));
        }
        CircuitEvent::EvaluateCompleted { trace, results, .. } => {
            assert_eq!(trace.len(), 2);
            assert_eq!(results.len(), 2);
        }
        _ => {}
    });
    c.evaluate();
    assert_eq!(*snapshots.borrow(), vec![(Gate::Or.name(), Some(Bit::ONE))]);
    Ok(())
}
