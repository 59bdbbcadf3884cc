// tests/text_tests.rs

use logiq::{Bit, Circuit, CircuitError, Gate};

fn layout(circuit: &Circuit) -> Vec<(u32, Gate, Vec<String>)> {
    circuit
        .operations()
        .iter()
        .map(|op| (op.moment(), op.gate(), op.registers().iter().map(ToString::to_string).collect()))
        .collect()
}

#[test]
fn test_text_round_trip() -> Result<(), CircuitError> {
    let mut original = Circuit::new(4, 4)?;
    original.set_bits(&[Bit::ONE, Bit::ZERO, Bit::ONE, Bit::ONE])?;
    original
        .set("NOT", 1, [2])?
        .set("XOR", 1, [3, 4])?
        .set("AND3", 2, [4, 1, 2])?
        .set("NAND", 3, [1, 3])?
        .set("BUF", 4, [4])?;

    let text = original.to_text();
    let mut restored = Circuit::from_text(&text)?;
    assert_eq!((restored.bandwidth(), restored.timewidth()), (4, 4));
    assert_eq!(layout(&restored), layout(&original));
    assert_eq!(restored.to_text(), text);

    restored.set_bits(original.bits())?;
    assert_eq!(restored.evaluate(), original.evaluate());
    assert_eq!(restored.trace(), original.trace());
    Ok(())
}

#[test]
fn test_labels_survive_a_round_trip() -> Result<(), CircuitError> {
    let text = "NOT-OR.carry#1\nI---OR.carry#0";
    let circuit = Circuit::from_text(text)?;
    assert_eq!(circuit.operations()[1].label(), Some("carry"));
    assert_eq!(circuit.to_text(), text);
    Ok(())
}

#[test]
fn test_separators_are_interchangeable() -> Result<(), CircuitError> {
    let dashes = Circuit::from_text("NOT-AND.x#0\nI-AND.x#1")?;
    let mixed = Circuit::from_text("NOT + AND.x#0\nI   ==AND.x#1")?;
    assert_eq!(layout(&dashes), layout(&mixed));
    Ok(())
}

#[test]
fn test_same_label_in_different_moments_is_independent() -> Result<(), CircuitError> {
    let circuit = Circuit::from_text("XOR.a-XOR.a\nXOR.a-I\nI-----XOR.a")?;
    let layout = layout(&circuit);
    assert_eq!(layout.len(), 2);
    assert_eq!(layout[0].2, vec!["1", "2"]);
    assert_eq!(layout[1].2, vec!["1", "3"]);
    Ok(())
}

#[test]
fn test_half_position_registers_are_dropped_from_text() -> Result<(), CircuitError> {
    let mut circuit = Circuit::new(3, 2)?;
    circuit.set("AND", 1, [1, 2])?.set("OR", 2, [1.5, 3.0])?;
    assert_eq!(circuit.to_text(), "AND.m1w1#0-I\nAND.m1w1#1-I\nI----------OR.m2w1_5#1");
    Ok(())
}

#[test]
fn test_unknown_symbol_is_located() {
    let err = Circuit::from_text("NOT-I\nI-BLAH").err();
    assert_eq!(
        err,
        Some(CircuitError::MalformedToken {
            line: 2,
            column: 3,
            token: "BLAH".to_string(),
            reason: "no gate with this symbol".to_string(),
        })
    );
}

#[test]
fn test_table_uses_identity_for_empty_cells() -> Result<(), CircuitError> {
    let mut circuit = Circuit::new(2, 2)?;
    circuit.set("NOT", 2, [2])?;
    let table = circuit.to_table();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0][0].symbol, "I");
    assert_eq!(table[0][0].gate_input_index, None);
    assert_eq!(table[1][1].name, Gate::Not.name());
    assert_eq!(table[1][1].gate_input_index, Some(0));
    Ok(())
}
