// src/evaluation/results.rs
use crate::core::{Bit, IntermediateId, Wire, WireIndex};
use crate::gates::Gate;
use std::collections::BTreeMap;
use std::fmt;

/// Values of every wire that carries a signal at some point in time.
///
/// Primary wires are present from the start; an intermediate wire appears
/// once the gate producing it has been evaluated. Half positions are read
/// through [`WireState::read`], which resolves to the intermediate wire most
/// recently written at that position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireState {
    values: BTreeMap<Wire, Bit>,
    // Latest intermediate wire written at each half position.
    latest: BTreeMap<WireIndex, Wire>,
}

impl WireState {
    /// State holding only the primary wires, seeded from `bits`.
    pub(crate) fn seeded(bits: &[Bit]) -> Self {
        let values = bits
            .iter()
            .enumerate()
            .map(|(i, bit)| (Wire::Primary(i as u32 + 1), *bit))
            .collect();
        Self { values, latest: BTreeMap::new() }
    }

    /// Value of a specific wire, if it carries one.
    pub fn get(&self, wire: &Wire) -> Option<Bit> {
        self.values.get(wire).copied()
    }

    /// Wire a reader at `position` sees.
    pub fn resolve(&self, position: WireIndex) -> Option<Wire> {
        match position.register() {
            Some(n) => Some(Wire::Primary(n)),
            None => self.latest.get(&position).copied(),
        }
    }

    /// Value a reader at `position` sees, if any.
    pub fn read(&self, position: WireIndex) -> Option<Bit> {
        self.resolve(position).and_then(|wire| self.get(&wire))
    }

    /// Writes `wire`, returning the other intermediate wire that held the
    /// same position before, if there was one.
    pub(crate) fn write(&mut self, wire: Wire, bit: Bit) -> Option<Wire> {
        self.values.insert(wire, bit);
        match wire {
            Wire::Primary(_) => None,
            Wire::Intermediate { position, .. } => {
                self.latest.insert(position, wire).filter(|previous| *previous != wire)
            }
        }
    }

    /// Value of primary register `n`.
    pub fn primary(&self, n: u32) -> Option<Bit> {
        self.get(&Wire::Primary(n))
    }

    /// Value of the intermediate wire with this identity.
    pub fn intermediate(&self, id: IntermediateId) -> Option<Bit> {
        self.values.iter().find_map(|(wire, bit)| match wire {
            Wire::Intermediate { id: wid, .. } if *wid == id => Some(*bit),
            _ => None,
        })
    }

    /// Intermediate wires with their values, ordered by position.
    pub fn intermediates(&self) -> Vec<(Wire, Bit)> {
        let mut wires: Vec<(Wire, Bit)> = self
            .values
            .iter()
            .filter(|(wire, _)| wire.is_intermediate())
            .map(|(wire, bit)| (*wire, *bit))
            .collect();
        wires.sort_by_key(|(wire, _)| (wire.position(), *wire));
        wires
    }

    /// All wires with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&Wire, &Bit)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for WireState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (wire, bit)) in self.values.iter().enumerate() {
            write!(f, "{}{}: {}", if i > 0 { ", " } else { "" }, wire.position(), bit)?;
        }
        write!(f, "}}")
    }
}

/// A gap found while evaluating. The evaluation carries on past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The operation named fewer wires than its gate reads; it was skipped.
    InsufficientInputs {
        moment: u32,
        anchor: WireIndex,
        gate: Gate,
        required: usize,
        found: usize,
    },
    /// Two different intermediate wires were written at the same position.
    /// Readers at that position see the later one.
    SharedIntermediatePosition {
        moment: u32,
        position: WireIndex,
        previous: Wire,
        current: Wire,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InsufficientInputs { moment, anchor, gate, required, found } => write!(
                f,
                "moment {}, wire {}: {} needs {} inputs but only has {}",
                moment, anchor, gate, required, found
            ),
            Diagnostic::SharedIntermediatePosition { moment, position, previous, current } => write!(
                f,
                "moment {}: {} replaces {} at position {}",
                moment, current, previous, position
            ),
        }
    }
}

/// Everything an evaluation produces.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    /// Final bit on each primary wire, wire 1 first.
    pub(crate) results: Vec<Bit>,
    /// Final value of every wire, intermediate ones included.
    pub(crate) intermediate_wires: WireState,
    /// One snapshot per moment; index 0 is the initial state.
    pub(crate) trace: Vec<WireState>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl EvaluationResult {
    pub fn results(&self) -> &[Bit] {
        &self.results
    }

    /// Full final wire state, including intermediate wires.
    pub fn intermediate_wires(&self) -> &WireState {
        &self.intermediate_wires
    }

    /// Snapshots for moments `0..=timewidth`.
    pub fn trace(&self) -> &[WireState] {
        &self.trace
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Value a reader at `position` sees once the circuit has settled.
    pub fn value_at(&self, position: WireIndex) -> Option<Bit> {
        self.intermediate_wires.read(position)
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bit) in self.results.iter().enumerate() {
            writeln!(f, "Bit {}: {} ({})", i + 1, bit, bit.level())?;
        }
        for (wire, bit) in self.intermediate_wires.intermediates() {
            writeln!(f, "Wire {}: {} ({})", wire.position(), bit, bit.level())?;
        }
        Ok(())
    }
}
