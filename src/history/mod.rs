// src/history/mod.rs

//! Linear undo/redo for circuit edits.
//!
//! Every edit is stored as an [`Entry`]: the commands that redo it and the
//! commands that undo it. Commands are a closed set and are applied by the
//! circuit itself, so replaying never goes through a name lookup.

use crate::core::WireIndex;
use crate::events::{CircuitEvent, CircuitId};
use crate::gates::Gate;
use crate::operations::{Operation, OutputWire};
use std::fmt;

/// A single reversible step on a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Put a gate on the grid, replacing whatever is anchored at
    /// `(moment, registers[0])`.
    PlaceGate {
        gate: Gate,
        moment: u32,
        registers: Vec<WireIndex>,
        /// Output wire the operation had when it was recorded, so a restored
        /// gate keeps its intermediate wire identity.
        output: OutputWire,
        label: Option<String>,
    },
    /// Remove the gate anchored at `(moment, registers[0])`.
    ClearGate {
        moment: u32,
        registers: Vec<WireIndex>,
    },
}

impl Command {
    /// Command that puts `op` back exactly as it was.
    pub fn place(op: &Operation) -> Self {
        Command::PlaceGate {
            gate: op.gate(),
            moment: op.moment(),
            registers: op.registers().to_vec(),
            output: op.output(),
            label: op.label().map(str::to_owned),
        }
    }

    /// Command that removes `op`.
    pub fn clear(op: &Operation) -> Self {
        Command::ClearGate {
            moment: op.moment(),
            registers: op.registers().to_vec(),
        }
    }

    /// Commands that take the circuit back to where it was before `self`
    /// ran, given the operation `self` displaced (if any).
    ///
    /// Undoing a replacement clears the new gate and then restores the old
    /// one; the list is meant to be run in order.
    pub fn invert(&self, prior: Option<&Operation>) -> Vec<Command> {
        let mut undo = Vec::with_capacity(2);
        if let Command::PlaceGate { moment, registers, .. } = self {
            undo.push(Command::ClearGate {
                moment: *moment,
                registers: registers.clone(),
            });
        }
        undo.extend(prior.map(Command::place));
        undo
    }

    pub fn moment(&self) -> u32 {
        match self {
            Command::PlaceGate { moment, .. } | Command::ClearGate { moment, .. } => *moment,
        }
    }

    /// `(moment, anchor)` cell the command acts on.
    pub fn anchor(&self) -> Option<WireIndex> {
        match self {
            Command::PlaceGate { registers, .. } | Command::ClearGate { registers, .. } => {
                registers.first().copied()
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registers = |registers: &[WireIndex]| {
            registers.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        };
        match self {
            Command::PlaceGate { gate, moment, registers: r, .. } => {
                write!(f, "place {} at moment {} on [{}]", gate, moment, registers(r))
            }
            Command::ClearGate { moment, registers: r } => {
                write!(f, "clear moment {} on [{}]", moment, registers(r))
            }
        }
    }
}

/// One undoable edit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entry {
    /// Commands that re-apply the edit, in order.
    pub redo: Vec<Command>,
    /// Commands that revert the edit, in order.
    pub undo: Vec<Command>,
}

impl Entry {
    pub fn new(redo: Vec<Command>, undo: Vec<Command>) -> Self {
        Self { redo, undo }
    }
}

/// Whether undo and redo are currently possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Capabilities {
    pub(crate) undo: bool,
    pub(crate) redo: bool,
}

impl Capabilities {
    /// Boundary events for the flags that differ between `self` and `after`.
    pub(crate) fn changes(self, after: Capabilities, circuit: CircuitId) -> Vec<CircuitEvent> {
        let mut events = Vec::new();
        if self.undo != after.undo {
            events.push(if after.undo {
                CircuitEvent::UndoCapable { circuit }
            } else {
                CircuitEvent::UndoDepleted { circuit }
            });
        }
        if self.redo != after.redo {
            events.push(if after.redo {
                CircuitEvent::RedoCapable { circuit }
            } else {
                CircuitEvent::RedoDepleted { circuit }
            });
        }
        events
    }
}

/// Ordered list of edits plus a cursor.
///
/// Entries before `position` have been applied; entries from `position` on
/// have been undone and can be redone until something new is recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<Entry>,
    position: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an edit, dropping anything that had been undone.
    pub fn record(&mut self, entry: Entry) {
        self.entries.truncate(self.position);
        self.entries.push(entry);
        self.position = self.entries.len();
    }

    /// Moves the cursor back one entry and returns the commands that
    /// revert it.
    pub(crate) fn step_back(&mut self) -> Option<Vec<Command>> {
        if !self.can_undo() {
            return None;
        }
        self.position -= 1;
        Some(self.entries[self.position].undo.clone())
    }

    /// Moves the cursor forward one entry and returns the commands that
    /// re-apply it.
    pub(crate) fn step_forward(&mut self) -> Option<Vec<Command>> {
        if !self.can_redo() {
            return None;
        }
        self.position += 1;
        Some(self.entries[self.position - 1].redo.clone())
    }

    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        self.position < self.entries.len()
    }

    pub(crate) fn capabilities(&self) -> Capabilities {
        Capabilities {
            undo: self.can_undo(),
            redo: self.can_redo(),
        }
    }

    /// Number of recorded entries, undone ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries currently applied.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{IntermediateId, Wire};

    fn and_on_1_2() -> Operation {
        Operation {
            gate: Gate::And,
            moment: 1,
            registers: vec![WireIndex::primary(1), WireIndex::primary(2)],
            output: OutputWire::Allocated(Wire::Intermediate {
                id: IntermediateId(0),
                position: WireIndex::midpoint_slot(WireIndex::primary(1), WireIndex::primary(2)),
            }),
            label: None,
        }
    }

    fn entry(tag: u32) -> Entry {
        let cmd = Command::ClearGate { moment: tag, registers: vec![WireIndex::primary(1)] };
        Entry::new(vec![cmd.clone()], vec![cmd])
    }

    #[test]
    fn test_invert_replacement_clears_then_restores() {
        let prior = and_on_1_2();
        let new = Command::PlaceGate {
            gate: Gate::Or,
            moment: 1,
            registers: vec![WireIndex::primary(1), WireIndex::primary(2)],
            output: prior.output(),
            label: None,
        };
        let undo = new.invert(Some(&prior));
        assert_eq!(undo.len(), 2);
        assert!(matches!(undo[0], Command::ClearGate { moment: 1, .. }));
        assert_eq!(undo[1], Command::place(&prior));
    }

    #[test]
    fn test_invert_clear_restores_only() {
        let prior = and_on_1_2();
        let undo = Command::clear(&prior).invert(Some(&prior));
        assert_eq!(undo, vec![Command::place(&prior)]);
        assert!(Command::clear(&prior).invert(None).is_empty());
    }

    #[test]
    fn test_record_after_undo_drops_forward_branch() {
        let mut history = History::new();
        history.record(entry(1));
        history.record(entry(2));
        assert!(history.step_back().is_some());
        assert!(history.can_redo());

        history.record(entry(3));
        assert_eq!(history.len(), 2);
        assert_eq!(history.position(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.entries()[1].redo[0].moment(), 3);
    }

    #[test]
    fn test_cursor_stops_at_both_ends() {
        let mut history = History::new();
        assert!(history.step_back().is_none());
        history.record(entry(1));
        assert!(history.step_forward().is_none());
        assert!(history.step_back().is_some());
        assert!(history.step_back().is_none());
        assert!(history.step_forward().is_some());
        assert_eq!(history.position(), 1);
    }

    #[test]
    fn test_capability_changes() {
        let id = CircuitId(7);
        let none = Capabilities { undo: false, redo: false };
        let undo_only = Capabilities { undo: true, redo: false };
        let redo_only = Capabilities { undo: false, redo: true };
        assert_eq!(none.changes(undo_only, id), vec![CircuitEvent::UndoCapable { circuit: id }]);
        assert_eq!(
            undo_only.changes(redo_only, id),
            vec![CircuitEvent::UndoDepleted { circuit: id }, CircuitEvent::RedoCapable { circuit: id }]
        );
        assert!(undo_only.changes(undo_only, id).is_empty());
    }
}
