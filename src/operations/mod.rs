// src/operations/mod.rs

//! Defines operations: gate placements on a circuit's moment × wire grid.
//!
//! An operation is the edge of the circuit's dataflow graph. It reads its
//! input wires at a given moment and writes one output wire.

use crate::core::{Wire, WireIndex};
use crate::gates::Gate;
use std::cmp::Ordering;
use std::fmt;

/// Where an operation writes its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputWire {
    /// Overwrites the wire its single input was read from.
    InPlace(WireIndex),
    /// Writes a fresh intermediate wire allocated for this operation.
    Allocated(Wire),
}

impl OutputWire {
    /// Grid position of the output.
    pub fn position(&self) -> WireIndex {
        match self {
            OutputWire::InPlace(position) => *position,
            OutputWire::Allocated(wire) => wire.position(),
        }
    }
}

/// A gate placed at one moment across one or more wires.
///
/// `registers[0]` is the anchor: at most one operation exists per
/// `(moment, anchor)` pair. The registers double as the input wires, in
/// the order given.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub(crate) gate: Gate,
    pub(crate) moment: u32,
    pub(crate) registers: Vec<WireIndex>,
    pub(crate) output: OutputWire,
    pub(crate) label: Option<String>,
}

impl Operation {
    pub fn gate(&self) -> Gate {
        self.gate
    }

    /// Moment (1-based column) the operation sits in.
    pub fn moment(&self) -> u32 {
        self.moment
    }

    /// Registers touched, anchor first.
    pub fn registers(&self) -> &[WireIndex] {
        &self.registers
    }

    /// Wires read, in input order.
    pub fn inputs(&self) -> &[WireIndex] {
        &self.registers
    }

    pub fn anchor(&self) -> WireIndex {
        self.registers[0]
    }

    /// Lowest wire touched; the tie-break key when sorting a moment.
    pub fn min_register(&self) -> WireIndex {
        self.registers.iter().copied().min().unwrap_or(self.registers[0])
    }

    pub fn output(&self) -> OutputWire {
        self.output
    }

    /// Grid position of the output wire (1.5 for an AND on wires 1 and 2).
    pub fn output_position(&self) -> WireIndex {
        self.output.position()
    }

    /// Label given by the text format, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// `true` when the operation touches `register`.
    pub fn covers(&self, register: WireIndex) -> bool {
        self.registers.contains(&register)
    }

    /// Canonical order: moment first, then lowest wire, then anchor. At
    /// most one operation sits at each (moment, anchor), so the order is
    /// total for a circuit's operations.
    pub fn canonical_cmp(&self, other: &Operation) -> Ordering {
        self.moment
            .cmp(&other.moment)
            .then_with(|| self.min_register().cmp(&other.min_register()))
            .then_with(|| self.anchor().cmp(&other.anchor()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}[", self.gate.symbol(), self.moment)?;
        for (i, register) in self.registers.iter().enumerate() {
            write!(f, "{}{}", if i > 0 { ", " } else { "" }, register)?;
        }
        write!(f, "] -> {}", self.output_position())
    }
}
