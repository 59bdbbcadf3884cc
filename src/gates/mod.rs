// src/gates/mod.rs

//! The fixed catalog of combinational logic gates.
//!
//! Every gate is a pure function from `input_count` bits to one bit. Gates
//! with a `wire_span` above one straddle several wires and write their output
//! to an intermediate wire instead of overwriting an input.

use crate::core::{Bit, CircuitError};
use std::fmt;
use std::str::FromStr;

/// A logic gate from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Passes its input through. Also the placeholder for empty grid cells.
    Identity,
    /// Passes its input through.
    Buffer,
    /// Inverts its input.
    Not,
    And,
    Or,
    Nand,
    Nor,
    Xor,
    Xnor,
    /// Three-input AND.
    And3,
    /// Three-input OR.
    Or3,
    /// Passes its input through; placed to watch a signal.
    Probe,
}

impl Gate {
    /// Every gate, in catalog order.
    pub const ALL: [Gate; 12] = [
        Gate::Identity,
        Gate::Buffer,
        Gate::Not,
        Gate::And,
        Gate::Or,
        Gate::Nand,
        Gate::Nor,
        Gate::Xor,
        Gate::Xnor,
        Gate::And3,
        Gate::Or3,
        Gate::Probe,
    ];

    /// Unique symbol, used by the text format and by lookups.
    pub fn symbol(&self) -> &'static str {
        match self {
            Gate::Identity => "I",
            Gate::Buffer => "BUF",
            Gate::Not => "NOT",
            Gate::And => "AND",
            Gate::Or => "OR",
            Gate::Nand => "NAND",
            Gate::Nor => "NOR",
            Gate::Xor => "XOR",
            Gate::Xnor => "XNOR",
            Gate::And3 => "AND3",
            Gate::Or3 => "OR3",
            Gate::Probe => "P",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gate::Identity => "Identity",
            Gate::Buffer => "Buffer",
            Gate::Not => "NOT",
            Gate::And => "AND",
            Gate::Or => "OR",
            Gate::Nand => "NAND",
            Gate::Nor => "NOR",
            Gate::Xor => "XOR",
            Gate::Xnor => "XNOR",
            Gate::And3 => "AND (3-input)",
            Gate::Or3 => "OR (3-input)",
            Gate::Probe => "Probe",
        }
    }

    /// Lower-case class name a renderer can style the gate with.
    pub fn css_name(&self) -> &'static str {
        match self {
            Gate::Identity => "identity",
            Gate::Buffer => "buffer",
            Gate::Not => "not",
            Gate::And => "and",
            Gate::Or => "or",
            Gate::Nand => "nand",
            Gate::Nor => "nor",
            Gate::Xor => "xor",
            Gate::Xnor => "xnor",
            Gate::And3 => "and3",
            Gate::Or3 => "or3",
            Gate::Probe => "probe",
        }
    }

    /// Number of bits [`Gate::apply`] reads.
    pub fn input_count(&self) -> usize {
        match self {
            Gate::Identity | Gate::Buffer | Gate::Not | Gate::Probe => 1,
            Gate::And | Gate::Or | Gate::Nand | Gate::Nor | Gate::Xor | Gate::Xnor => 2,
            Gate::And3 | Gate::Or3 => 3,
        }
    }

    /// Number of physical wires a placement of this gate straddles.
    pub fn wire_span(&self) -> usize {
        // Equal to the input count for every gate in the catalog.
        self.input_count()
    }

    /// `true` when the output goes to an intermediate wire.
    pub fn is_multi_wire(&self) -> bool {
        self.wire_span() > 1
    }

    /// Computes the gate's output.
    ///
    /// Reads the first `input_count` bits and ignores the rest. Returns
    /// `None` when fewer bits are supplied.
    pub fn apply(&self, inputs: &[Bit]) -> Option<Bit> {
        if inputs.len() < self.input_count() {
            return None;
        }
        let a = inputs[0].is_high();
        let output = match self {
            Gate::Identity | Gate::Buffer | Gate::Probe => a,
            Gate::Not => !a,
            Gate::And => a && inputs[1].is_high(),
            Gate::Or => a || inputs[1].is_high(),
            Gate::Nand => !(a && inputs[1].is_high()),
            Gate::Nor => !(a || inputs[1].is_high()),
            Gate::Xor => a != inputs[1].is_high(),
            Gate::Xnor => a == inputs[1].is_high(),
            Gate::And3 => a && inputs[1].is_high() && inputs[2].is_high(),
            Gate::Or3 => a || inputs[1].is_high() || inputs[2].is_high(),
        };
        Some(Bit::new(output))
    }

    /// Case-insensitive lookup by symbol.
    pub fn find_by_symbol(symbol: &str) -> Option<Gate> {
        Self::ALL.into_iter().find(|g| g.symbol().eq_ignore_ascii_case(symbol))
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(name: &str) -> Option<Gate> {
        Self::ALL.into_iter().find(|g| g.name().eq_ignore_ascii_case(name))
    }
}

impl FromStr for Gate {
    type Err = CircuitError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        Gate::find_by_symbol(symbol).ok_or_else(|| CircuitError::UnknownGate { symbol: symbol.to_string() })
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
