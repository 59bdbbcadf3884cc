//! Builds a half adder, evaluates it for every input and replays the signal
//! trace of one run.

use logiq::{Bit, Circuit, CircuitBuilder, CircuitError, CircuitEvent, WireIndex};
use std::cell::RefCell;
use std::rc::Rc;

// Wires 1 and 3 carry a, wires 2 and 4 carry b.
// Sum lands on 1.5, carry on 3.5.
fn half_adder(a: Bit, b: Bit) -> Result<Circuit, CircuitError> {
    CircuitBuilder::new()
        .name("Half adder")
        .bandwidth(4)
        .timewidth(1)
        .bits(&[a, b, a, b])
        .gate("XOR", 1, [1, 2])
        .gate("AND", 1, [3, 4])
        .build()
}

fn main() -> Result<(), CircuitError> {
    let sum_at = WireIndex::from_f64(1.5)?;
    let carry_at = WireIndex::from_f64(3.5)?;

    println!("Half adder truth table (a b -> carry sum)");
    for i in 0..4u8 {
        let (a, b) = (Bit::from(i >> 1 & 1), Bit::from(i & 1));
        let mut circuit = half_adder(a, b)?;
        circuit.evaluate();
        if let Some(result) = circuit.last_evaluation() {
            let show = |bit: Option<Bit>| bit.map_or("-".to_string(), |b| b.to_string());
            println!("  {} {} -> {} {}", a, b, show(result.value_at(carry_at)), show(result.value_at(sum_at)));
        }
    }

    // --- A circuit read from text, with a visible trace ---

    let mut circuit = Circuit::from_text("XOR.s#0-I\nXOR.s#1-AND.c#0\nI-------AND.c#1")?;
    circuit.set_name("XOR then AND");
    circuit.set_bits(&[Bit::ONE, Bit::ONE, Bit::ONE])?;

    let progress = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&progress);
    circuit.events().subscribe(move |event| {
        if let CircuitEvent::EvaluateProgressed { progress, gate, .. } = event {
            sink.borrow_mut().push(format!("{:>4.0}% {}", progress * 100.0, gate));
        }
    });

    println!("\n{}", circuit);
    print!("{}", circuit.report());
    for line in progress.borrow().iter() {
        println!("  {}", line);
    }

    if let Some(trace) = circuit.trace() {
        println!("\nTrace:");
        for (moment, state) in trace.iter().enumerate() {
            let wires: Vec<String> = (1..=circuit.bandwidth())
                .map(|w| state.primary(w).map_or("-".to_string(), |b| b.to_string()))
                .collect();
            println!("  moment {}: {}", moment, wires.join(" "));
        }
    }

    println!("\nText form:\n{}", circuit.to_text());

    // Undo the carry gate and compare
    circuit.clear(2, [2])?;
    println!("\nWithout the carry gate:\n{}", circuit.report());
    circuit.undo()?;
    println!("Carry gate restored: {}", circuit.get(2, 3).is_some());
    Ok(())
}
