// src/circuits/mod.rs

//! Defines the `Circuit`: a grid of gate placements over a fixed number of
//! wires (bandwidth) and moments (timewidth), together with its input bits,
//! edit history and cached evaluation.
//!
//! All edits go through [`Circuit::set`] / [`Circuit::clear`] (or their
//! relatives), which keep the operation list sorted by (moment, lowest wire,
//! anchor), drop any cached evaluation, record an undo entry and broadcast
//! a [`CircuitEvent`] on the circuit's [`EventBus`].

mod text;

pub use text::TableCell;

use crate::core::{
    Bit, CircuitError, IntermediateId, IntoWireIndex, Wire, WireIndex, DEFAULT_BANDWIDTH,
    DEFAULT_TIMEWIDTH,
};
use crate::evaluation::{Diagnostic, EvaluationResult, Evaluator, WireState};
use crate::events::{CircuitEvent, CircuitId, EventBus};
use crate::gates::Gate;
use crate::history::{Capabilities, Command, Entry, History};
use crate::names::random_name;
use crate::operations::{Operation, OutputWire};
use std::fmt;
use std::rc::Rc;

/// Dimensions and name of a new circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitConfig {
    /// Number of primary wires.
    pub bandwidth: u32,
    /// Number of moments (columns).
    pub timewidth: u32,
    /// Display name; a random "Color Device" name when `None`.
    pub name: Option<String>,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            bandwidth: DEFAULT_BANDWIDTH,
            timewidth: DEFAULT_TIMEWIDTH,
            name: None,
        }
    }
}

/// A logic circuit laid out on a moment × wire grid.
///
/// Operations are evaluated left to right, moment by moment; within a
/// moment, the operation on the lowest wire goes first. Single-wire gates
/// overwrite the wire they sit on. Multi-wire gates write a fresh
/// intermediate wire drawn halfway between their inputs, which later gates
/// can read by naming that half position (e.g. `1.5`).
///
/// ```
/// # use logiq::{Bit, Circuit, CircuitError, WireIndex};
/// # fn main() -> Result<(), CircuitError> {
/// let mut circuit = Circuit::new(2, 2)?;
/// circuit.set_bits(&[Bit::ONE, Bit::ONE])?;
/// circuit.set("AND", 1, [1, 2])?.set("NOT", 2, [1.5])?;
///
/// assert_eq!(circuit.evaluate(), vec![Bit::ONE, Bit::ONE]);
/// let wires = circuit.intermediate_wires().expect("evaluated");
/// assert_eq!(wires.read(WireIndex::from_f64(1.5)?), Some(Bit::ZERO));
/// # Ok(())
/// # }
/// ```
pub struct Circuit {
    id: CircuitId,
    name: String,
    bandwidth: u32,
    timewidth: u32,
    /// Input value of each primary wire, wire 1 first.
    bits: Vec<Bit>,
    /// Sorted by (moment, lowest register).
    operations: Vec<Operation>,
    next_intermediate: u32,
    needs_evaluation: bool,
    last: Option<EvaluationResult>,
    history: History,
    events: Rc<EventBus>,
}

impl Circuit {
    /// Creates an empty circuit with a random name and its own event bus.
    ///
    /// # Errors
    /// `CircuitError::InvalidDimensions` when either dimension is zero.
    pub fn new(bandwidth: u32, timewidth: u32) -> Result<Self, CircuitError> {
        Self::from_config(CircuitConfig {
            bandwidth,
            timewidth,
            name: None,
        })
    }

    pub fn from_config(config: CircuitConfig) -> Result<Self, CircuitError> {
        Self::with_events(config, Rc::new(EventBus::new()))
    }

    /// Creates a circuit that broadcasts on an existing bus, so one listener
    /// can follow several circuits.
    pub fn with_events(config: CircuitConfig, events: Rc<EventBus>) -> Result<Self, CircuitError> {
        if config.bandwidth == 0 || config.timewidth == 0 {
            return Err(CircuitError::InvalidDimensions {
                bandwidth: config.bandwidth,
                timewidth: config.timewidth,
            });
        }
        Ok(Self::assemble(config, events))
    }

    fn assemble(config: CircuitConfig, events: Rc<EventBus>) -> Self {
        let id = CircuitId::next();
        let name = config.name.unwrap_or_else(random_name);
        tracing::debug!(
            circuit = %id,
            name = %name,
            bandwidth = config.bandwidth,
            timewidth = config.timewidth,
            "circuit created"
        );
        Self {
            id,
            name,
            bandwidth: config.bandwidth,
            timewidth: config.timewidth,
            bits: vec![Bit::ZERO; config.bandwidth as usize],
            operations: Vec::new(),
            next_intermediate: 0,
            needs_evaluation: true,
            last: None,
            history: History::new(),
            events,
        }
    }

    pub fn id(&self) -> CircuitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of primary wires.
    pub fn bandwidth(&self) -> u32 {
        self.bandwidth
    }

    /// Number of moments.
    pub fn timewidth(&self) -> u32 {
        self.timewidth
    }

    /// Input bits, wire 1 first.
    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    /// Operations in evaluation order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of operations placed.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if no gate has been placed.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn events(&self) -> &Rc<EventBus> {
        &self.events
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// `true` until the circuit is evaluated, and again after every edit.
    pub fn needs_evaluation(&self) -> bool {
        self.needs_evaluation
    }

    /// Id the next multi-wire placement will get.
    pub(crate) fn next_intermediate(&self) -> u32 {
        self.next_intermediate
    }

    //---------------------------------------------------------------------
    // Placement
    //---------------------------------------------------------------------

    /// Places the gate with symbol `symbol` at `moment` on `registers`,
    /// replacing the gate anchored at `(moment, registers[0])` if any.
    ///
    /// Registers are input wires in order; the first one is the anchor.
    /// Whole numbers name primary wires, half numbers (`1.5`) name
    /// intermediate wire positions.
    ///
    /// # Errors
    /// * `UnknownGate` if no gate has this symbol.
    /// * `MissingRegister`, `InvalidWire`, `WireOutOfRange` or
    ///   `MomentOutOfRange` if the placement does not fit the grid.
    ///
    /// The circuit is unchanged on error.
    pub fn set<I, R>(&mut self, symbol: &str, moment: u32, registers: I) -> Result<&mut Self, CircuitError>
    where
        I: IntoIterator<Item = R>,
        R: IntoWireIndex,
    {
        let gate = symbol.parse::<Gate>().inspect_err(|e| {
            tracing::error!(circuit = %self.id, error = %e, "gate placement rejected");
        })?;
        self.set_gate(gate, moment, registers)
    }

    /// [`Circuit::set`] with a gate instead of its symbol.
    pub fn set_gate<I, R>(&mut self, gate: Gate, moment: u32, registers: I) -> Result<&mut Self, CircuitError>
    where
        I: IntoIterator<Item = R>,
        R: IntoWireIndex,
    {
        let registers = collect_registers(registers)?;
        let op = self.place(gate, moment, registers, None)?;
        let redo = Command::place(&op.placed);
        let undo = redo.invert(op.prior.as_ref());
        self.record(Entry::new(vec![redo], undo));
        Ok(self)
    }

    /// Removes the gate anchored at `(moment, registers[0])`. Nothing
    /// happens, and nothing is recorded, if the cell is empty.
    ///
    /// # Errors
    /// The same range errors as [`Circuit::set`].
    pub fn clear<I, R>(&mut self, moment: u32, registers: I) -> Result<&mut Self, CircuitError>
    where
        I: IntoIterator<Item = R>,
        R: IntoWireIndex,
    {
        let registers = collect_registers(registers)?;
        self.check_placement(moment, &registers)?;
        if let Some(prior) = self.remove_at(moment, registers[0]) {
            self.record(Entry::new(vec![Command::clear(&prior)], vec![Command::place(&prior)]));
        }
        Ok(self)
    }

    /// Removes every gate as a single undoable edit.
    pub fn clear_all(&mut self) -> &mut Self {
        if self.operations.is_empty() {
            return self;
        }
        let removed = std::mem::take(&mut self.operations);
        self.invalidate();
        for op in &removed {
            self.emit(CircuitEvent::GateCleared {
                circuit: self.id,
                moment: op.moment(),
                registers: op.registers().to_vec(),
            });
        }
        tracing::debug!(circuit = %self.id, removed = removed.len(), "circuit cleared");
        self.record(Entry::new(
            removed.iter().map(Command::clear).collect(),
            removed.iter().map(Command::place).collect(),
        ));
        self
    }

    /// The operation at `moment` that touches `register`, if any.
    pub fn get(&self, moment: u32, register: impl IntoWireIndex) -> Option<&Operation> {
        let register = register.into_wire_index().ok()?;
        self.operations
            .iter()
            .find(|op| op.moment() == moment && op.covers(register))
    }

    /// Restores (moment, lowest wire, anchor) order. Edits keep the list
    /// sorted already.
    pub fn sort(&mut self) -> &mut Self {
        self.operations.sort_by(|a, b| a.canonical_cmp(b));
        self
    }

    /// Validates and places one operation without recording it.
    fn place(
        &mut self,
        gate: Gate,
        moment: u32,
        registers: Vec<WireIndex>,
        label: Option<String>,
    ) -> Result<Placement, CircuitError> {
        self.check_placement(moment, &registers)?;
        let output = if gate.is_multi_wire() {
            let min = registers.iter().copied().min().unwrap_or(registers[0]);
            let max = registers.iter().copied().max().unwrap_or(registers[0]);
            let id = IntermediateId(self.next_intermediate);
            self.next_intermediate += 1;
            OutputWire::Allocated(Wire::Intermediate {
                id,
                position: WireIndex::midpoint_slot(min, max),
            })
        } else {
            OutputWire::InPlace(registers[0])
        };
        let placed = Operation {
            gate,
            moment,
            registers,
            output,
            label,
        };
        let prior = self.insert(placed.clone());
        Ok(Placement { placed, prior })
    }

    fn check_placement(&self, moment: u32, registers: &[WireIndex]) -> Result<(), CircuitError> {
        let checked = self.check_moment(moment).and_then(|()| {
            if registers.is_empty() {
                return Err(CircuitError::MissingRegister);
            }
            registers.iter().try_for_each(|r| self.check_register(*r))
        });
        checked.inspect_err(|e| {
            tracing::error!(circuit = %self.id, moment, error = %e, "gate placement rejected");
        })
    }

    fn check_moment(&self, moment: u32) -> Result<(), CircuitError> {
        if moment == 0 || moment > self.timewidth {
            return Err(CircuitError::MomentOutOfRange {
                moment,
                timewidth: self.timewidth,
            });
        }
        Ok(())
    }

    /// Primary wires lie in `1..=bandwidth`; half positions strictly between
    /// the first and last wire.
    fn check_register(&self, wire: WireIndex) -> Result<(), CircuitError> {
        let first = WireIndex::primary(1);
        let last = WireIndex::primary(self.bandwidth);
        let inside = if wire.is_primary() {
            first <= wire && wire <= last
        } else {
            first < wire && wire < last
        };
        if !inside {
            return Err(CircuitError::WireOutOfRange {
                wire,
                bandwidth: self.bandwidth,
            });
        }
        Ok(())
    }

    /// Puts `op` on the grid, returning the operation it displaced.
    fn insert(&mut self, op: Operation) -> Option<Operation> {
        let prior = self.take_at(op.moment(), op.anchor());
        tracing::debug!(circuit = %self.id, operation = %op, replaced = prior.is_some(), "gate placed");
        let event = CircuitEvent::GatePlaced {
            circuit: self.id,
            moment: op.moment(),
            registers: op.registers().to_vec(),
        };
        self.operations.push(op);
        self.sort();
        self.invalidate();
        self.emit(event);
        prior
    }

    fn remove_at(&mut self, moment: u32, anchor: WireIndex) -> Option<Operation> {
        let removed = self.take_at(moment, anchor)?;
        tracing::debug!(circuit = %self.id, operation = %removed, "gate cleared");
        self.invalidate();
        self.emit(CircuitEvent::GateCleared {
            circuit: self.id,
            moment,
            registers: removed.registers().to_vec(),
        });
        Some(removed)
    }

    fn take_at(&mut self, moment: u32, anchor: WireIndex) -> Option<Operation> {
        let index = self
            .operations
            .iter()
            .position(|op| op.moment() == moment && op.anchor() == anchor)?;
        Some(self.operations.remove(index))
    }

    //---------------------------------------------------------------------
    // Input bits
    //---------------------------------------------------------------------

    /// Input bit of wire `index + 1`.
    pub fn bit(&self, index: usize) -> Option<Bit> {
        self.bits.get(index).copied()
    }

    /// Sets the input bit of wire `index + 1`.
    pub fn set_bit(&mut self, index: usize, bit: impl Into<Bit>) -> Result<&mut Self, CircuitError> {
        let slot = self.bit_slot(index)?;
        *slot = bit.into();
        self.invalidate();
        Ok(self)
    }

    /// Flips the input bit of wire `index + 1` and returns its new value.
    pub fn toggle_bit(&mut self, index: usize) -> Result<Bit, CircuitError> {
        let slot = self.bit_slot(index)?;
        let flipped = *slot.flip();
        self.invalidate();
        Ok(flipped)
    }

    /// Sets the leading input bits; wires past `bits.len()` keep theirs.
    pub fn set_bits(&mut self, bits: &[Bit]) -> Result<&mut Self, CircuitError> {
        if bits.len() > self.bits.len() {
            return Err(CircuitError::BitOutOfRange {
                index: self.bits.len(),
                bandwidth: self.bandwidth,
            });
        }
        self.bits[..bits.len()].copy_from_slice(bits);
        self.invalidate();
        Ok(self)
    }

    fn bit_slot(&mut self, index: usize) -> Result<&mut Bit, CircuitError> {
        let bandwidth = self.bandwidth;
        self.bits
            .get_mut(index)
            .ok_or(CircuitError::BitOutOfRange { index, bandwidth })
    }

    //---------------------------------------------------------------------
    // History
    //---------------------------------------------------------------------

    /// Reverts the most recent edit. Returns `false` if there is none.
    pub fn undo(&mut self) -> Result<bool, CircuitError> {
        let before = self.history.capabilities();
        let Some(commands) = self.history.step_back() else {
            return Ok(false);
        };
        tracing::debug!(circuit = %self.id, position = self.history.position(), "undo");
        self.replay(&commands, before)?;
        Ok(true)
    }

    /// Re-applies the most recently undone edit. Returns `false` if there
    /// is none.
    pub fn redo(&mut self) -> Result<bool, CircuitError> {
        let before = self.history.capabilities();
        let Some(commands) = self.history.step_forward() else {
            return Ok(false);
        };
        tracing::debug!(circuit = %self.id, position = self.history.position(), "redo");
        self.replay(&commands, before)?;
        Ok(true)
    }

    fn replay(&mut self, commands: &[Command], before: Capabilities) -> Result<(), CircuitError> {
        for command in commands {
            self.apply(command)?;
        }
        self.emit_capability_changes(before);
        Ok(())
    }

    /// Runs one command without recording it.
    fn apply(&mut self, command: &Command) -> Result<(), CircuitError> {
        match command {
            Command::PlaceGate { gate, moment, registers, output, label } => {
                self.check_placement(*moment, registers)?;
                self.insert(Operation {
                    gate: *gate,
                    moment: *moment,
                    registers: registers.clone(),
                    output: *output,
                    label: label.clone(),
                });
            }
            Command::ClearGate { moment, registers } => {
                let anchor = registers.first().copied().ok_or(CircuitError::MissingRegister)?;
                self.remove_at(*moment, anchor);
            }
        }
        Ok(())
    }

    fn record(&mut self, entry: Entry) {
        let before = self.history.capabilities();
        self.history.record(entry);
        self.emit_capability_changes(before);
    }

    fn emit_capability_changes(&self, before: Capabilities) {
        for event in before.changes(self.history.capabilities(), self.id) {
            self.emit(event);
        }
    }

    //---------------------------------------------------------------------
    // Evaluation
    //---------------------------------------------------------------------

    /// Evaluates the circuit with default settings, caches the outcome and
    /// returns the final bit on each primary wire.
    pub fn evaluate(&mut self) -> Vec<Bit> {
        self.evaluate_with(&Evaluator::new())
    }

    pub fn evaluate_with(&mut self, evaluator: &Evaluator) -> Vec<Bit> {
        let result = evaluator.run(self);
        let bits = result.results().to_vec();
        self.last = Some(result);
        self.needs_evaluation = false;
        bits
    }

    /// Outcome of the last evaluation, dropped on every edit.
    pub fn last_evaluation(&self) -> Option<&EvaluationResult> {
        self.last.as_ref()
    }

    pub fn results(&self) -> Option<&[Bit]> {
        self.last.as_ref().map(EvaluationResult::results)
    }

    /// Per-moment snapshots of the last evaluation.
    pub fn trace(&self) -> Option<&[WireState]> {
        self.last.as_ref().map(EvaluationResult::trace)
    }

    pub fn intermediate_wires(&self) -> Option<&WireState> {
        self.last.as_ref().map(EvaluationResult::intermediate_wires)
    }

    /// Diagnostics of the last evaluation; empty if there was none.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.last.as_ref().map(EvaluationResult::diagnostics).unwrap_or(&[])
    }

    /// Human-readable results, evaluating first if needed.
    ///
    /// One `Bit n: v (HIGH|LOW)` line per primary wire, then one
    /// `Wire p: v (HIGH|LOW)` line per intermediate wire by position.
    pub fn report(&mut self) -> String {
        if self.needs_evaluation || self.last.is_none() {
            self.evaluate();
        }
        self.last.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    //---------------------------------------------------------------------
    // Misc
    //---------------------------------------------------------------------

    /// Copy with the same bits, gates and name but a new identity and an
    /// empty history. The copy broadcasts on the same bus.
    pub fn duplicate(&self) -> Circuit {
        let copy = Circuit {
            id: CircuitId::next(),
            name: self.name.clone(),
            bandwidth: self.bandwidth,
            timewidth: self.timewidth,
            bits: self.bits.clone(),
            operations: self.operations.clone(),
            next_intermediate: self.next_intermediate,
            needs_evaluation: true,
            last: None,
            history: History::new(),
            events: Rc::clone(&self.events),
        };
        tracing::debug!(circuit = %self.id, copy = %copy.id, "circuit duplicated");
        copy
    }

    /// ASCII rendering of the grid; the same text as `Display`.
    pub fn to_diagram(&self) -> String {
        self.to_string()
    }

    fn invalidate(&mut self) {
        self.needs_evaluation = true;
        self.last = None;
    }

    fn emit(&self, event: CircuitEvent) {
        self.events.emit(&event);
    }
}

impl Default for Circuit {
    /// A 3-wire, 5-moment circuit.
    fn default() -> Self {
        Self::assemble(CircuitConfig::default(), Rc::new(EventBus::new()))
    }
}

/// What a placement put down and what it displaced.
struct Placement {
    placed: Operation,
    prior: Option<Operation>,
}

fn collect_registers<I, R>(registers: I) -> Result<Vec<WireIndex>, CircuitError>
where
    I: IntoIterator<Item = R>,
    R: IntoWireIndex,
{
    registers
        .into_iter()
        .map(IntoWireIndex::into_wire_index)
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| tracing::error!(error = %e, "gate placement rejected"))
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances
/// using method chaining. Gates placed through the builder are not part of
/// the circuit's undo history.
///
/// # Examples
/// ```
/// # use logiq::{Bit, CircuitBuilder, CircuitError};
/// # fn main() -> Result<(), CircuitError> {
/// let mut circuit = CircuitBuilder::new()
///     .bandwidth(2)
///     .timewidth(1)
///     .name("Half adder")
///     .bits(&[Bit::ONE, Bit::ZERO])
///     .gate("XOR", 1, [1, 2])
///     .build()?;
///
/// assert!(!circuit.history().can_undo());
/// assert_eq!(circuit.report(), "Bit 1: 1 (HIGH)\nBit 2: 0 (LOW)\nWire 1.5: 1 (HIGH)\n");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct CircuitBuilder {
    config: CircuitConfig,
    events: Option<Rc<EventBus>>,
    bits: Vec<Bit>,
    gates: Vec<Result<(String, u32, Vec<WireIndex>), CircuitError>>,
}

impl CircuitBuilder {
    /// Creates a builder for a default 3 × 5 circuit.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bandwidth(mut self, bandwidth: u32) -> Self {
        self.config.bandwidth = bandwidth;
        self
    }

    pub fn timewidth(mut self, timewidth: u32) -> Self {
        self.config.timewidth = timewidth;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// Broadcast on `events` instead of a private bus.
    pub fn events(mut self, events: Rc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    /// Leading input bits.
    pub fn bits(mut self, bits: &[Bit]) -> Self {
        self.bits = bits.to_vec();
        self
    }

    /// Queues a gate; see [`Circuit::set`].
    pub fn gate<I, R>(mut self, symbol: &str, moment: u32, registers: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoWireIndex,
    {
        let gate = collect_registers(registers).map(|r| (symbol.to_owned(), moment, r));
        self.gates.push(gate);
        self
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    ///
    /// # Errors
    /// The first error any queued gate or the dimensions produce.
    pub fn build(self) -> Result<Circuit, CircuitError> {
        let events = self.events.unwrap_or_default();
        let mut circuit = Circuit::with_events(self.config, events)?;
        circuit.set_bits(&self.bits)?;
        for gate in self.gates {
            let (symbol, moment, registers) = gate?;
            let gate = symbol.parse::<Gate>()?;
            circuit.place(gate, moment, registers, None)?;
        }
        Ok(circuit)
    }
}

//-------------------------------------------------------------------------
// Diagram
//-------------------------------------------------------------------------

const GATE_WIDTH: usize = 7; // e.g. "──NOT──"
const WIRE: &str = "───────"; // GATE_WIDTH dashes
const H_WIRE: char = '─';
const V_WIRE: char = '│';
const OUTPUT: char = '●';

fn format_gate(symbol: &str) -> String {
    let slen = symbol.chars().count();
    if slen >= GATE_WIDTH {
        symbol.chars().take(GATE_WIDTH).collect()
    } else {
        let pre = (GATE_WIDTH - slen) / 2;
        let post = GATE_WIDTH - slen - pre;
        format!("{}{}{}", H_WIRE.to_string().repeat(pre), symbol, H_WIRE.to_string().repeat(post))
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.bandwidth as usize;
        let columns = self.timewidth as usize;

        // grid[row][moment] is the wire segment; links[row][moment] the
        // character drawn between row and row + 1.
        let mut grid = vec![vec![WIRE.to_string(); columns]; rows];
        let mut links = vec![vec![' '; columns]; rows];

        for op in &self.operations {
            let t = op.moment() as usize - 1;
            for register in op.registers() {
                if let Some(r) = register.register() {
                    grid[r as usize - 1][t] = format_gate(op.gate().symbol());
                }
            }
            // Rows between the lowest and highest wire touched are linked.
            let low = op.min_register().half_steps();
            let high = op.registers().iter().map(WireIndex::half_steps).max().unwrap_or(low);
            for (row, link) in links.iter_mut().enumerate().take(rows - 1) {
                let between = (row as u32 + 1) * 2 + 1;
                if low < between && between < high {
                    link[t] = V_WIRE;
                }
            }
            if let OutputWire::Allocated(wire) = op.output() {
                let row = (wire.position().half_steps() / 2) as usize;
                if (1..rows).contains(&row) {
                    links[row - 1][t] = OUTPUT;
                }
            }
        }

        let label_width = format!("Bit {}: ", rows).len();
        writeln!(
            f,
            "logiq::Circuit \"{}\" [{} wires x {} moments, {} operations]",
            self.name,
            rows,
            columns,
            self.operations.len()
        )?;
        for r in 0..rows {
            let label = format!("Bit {}: ", r + 1);
            writeln!(f, "{:<width$}{}", label, grid[r].join(""), width = label_width)?;
            if r < rows - 1 {
                write!(f, "{}", " ".repeat(label_width))?;
                for link in &links[r] {
                    let pre = (GATE_WIDTH - 1) / 2;
                    let post = GATE_WIDTH - 1 - pre;
                    write!(f, "{}{}{}", " ".repeat(pre), link, " ".repeat(post))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
