// src/validation/mod.rs

//! Provides functions to check the structure of a `Circuit`.
//!
//! Circuits built through the public API satisfy these checks already; they
//! are meant for tests and for circuits assembled from untrusted input.

use crate::circuits::Circuit;
use crate::core::{CircuitError, IntermediateId, Wire, WireIndex};
use crate::operations::{Operation, OutputWire};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Checks that operations are in evaluation order: by moment, then by
/// lowest wire.
///
/// # Arguments
/// * `operations` - The operation list to check.
///
/// # Returns
/// * `Ok(())` if every operation sorts at or after the one before it.
/// * `Err(CircuitError::NotMonotonic)` naming the first one that does not.
pub fn check_ordering(operations: &[Operation]) -> Result<(), CircuitError> {
    for (index, pair) in operations.windows(2).enumerate() {
        if pair[0].canonical_cmp(&pair[1]) == Ordering::Greater {
            return Err(CircuitError::NotMonotonic {
                index: index + 1,
                moment: pair[1].moment(),
            });
        }
    }
    Ok(())
}

/// Checks that every operation fits the circuit's grid.
///
/// # Returns
/// * `Err(CircuitError::MomentOutOfRange)` or `Err(CircuitError::WireOutOfRange)`
///   for the first operation outside `1..=timewidth` × `1..=bandwidth`.
pub fn check_bounds(circuit: &Circuit) -> Result<(), CircuitError> {
    let first = WireIndex::primary(1);
    let last = WireIndex::primary(circuit.bandwidth());
    for op in circuit.operations() {
        if op.moment() == 0 || op.moment() > circuit.timewidth() {
            return Err(CircuitError::MomentOutOfRange {
                moment: op.moment(),
                timewidth: circuit.timewidth(),
            });
        }
        for wire in op.registers() {
            if *wire < first || *wire > last {
                return Err(CircuitError::WireOutOfRange {
                    wire: *wire,
                    bandwidth: circuit.bandwidth(),
                });
            }
        }
    }
    Ok(())
}

/// Positions where more than one intermediate wire is drawn.
///
/// Gates reading such a position see whichever wire was written last at
/// evaluation time, which is rarely what the author meant.
pub fn find_shared_intermediate_positions(circuit: &Circuit) -> Vec<(WireIndex, Vec<IntermediateId>)> {
    let mut positions: BTreeMap<WireIndex, Vec<IntermediateId>> = BTreeMap::new();
    for op in circuit.operations() {
        if let OutputWire::Allocated(Wire::Intermediate { id, position }) = op.output() {
            positions.entry(position).or_default().push(id);
        }
    }
    positions.into_iter().filter(|(_, ids)| ids.len() > 1).collect()
}

/// Runs the ordering and bounds checks.
pub fn validate_circuit(circuit: &Circuit) -> Result<(), CircuitError> {
    check_ordering(circuit.operations())?;
    check_bounds(circuit)
}
