// src/evaluation/engine.rs
use crate::core::{Bit, IntermediateId, Wire};
use crate::evaluation::{Diagnostic, WireState};
use crate::operations::{Operation, OutputWire};

/// What happened when one operation was stepped.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StepOutcome {
    /// The gate ran and its output was written.
    Applied { output: Bit },
    /// The operation was skipped; the diagnostic says why.
    Skipped(Diagnostic),
}

/// Threads wire values through operations in the order they are stepped
/// and keeps the per-moment trace.
/// (Internal visibility)
pub(crate) struct EvaluationEngine {
    /// Current value of every wire seen so far.
    state: WireState,
    /// Slot `m` holds the snapshot for moment `m`; slot 0 is the initial state.
    trace: Vec<Option<WireState>>,
    /// Gaps and oddities met along the way, in evaluation order.
    diagnostics: Vec<Diagnostic>,
    /// First id no operation of the circuit uses. In-place writers on a
    /// half position nothing has written yet get their wire from here.
    next_id: u32,
}

impl EvaluationEngine {
    /// Seeds primary wires `1..=bits.len()` from `bits` and sizes the trace
    /// for `timewidth` moments. `next_id` must lie above every intermediate
    /// id the stepped operations carry.
    pub(crate) fn init(bits: &[Bit], timewidth: u32, next_id: u32) -> Self {
        let state = WireState::seeded(bits);
        let mut trace = vec![None; timewidth as usize + 1];
        trace[0] = Some(state.clone());
        Self { state, trace, diagnostics: Vec::new(), next_id }
    }

    pub(crate) fn state(&self) -> &WireState {
        &self.state
    }

    /// Evaluates one operation against the current state.
    pub(crate) fn step(&mut self, op: &Operation) -> StepOutcome {
        let gate = op.gate();

        // Unwritten wires read as 0.
        let inputs: Vec<Bit> = op
            .inputs()
            .iter()
            .map(|position| self.state.read(*position).unwrap_or(Bit::ZERO))
            .collect();
        let Some(output) = gate.apply(&inputs) else {
            return self.skip(Diagnostic::InsufficientInputs {
                moment: op.moment(),
                anchor: op.anchor(),
                gate,
                required: gate.input_count(),
                found: inputs.len(),
            });
        };

        let target = match op.output() {
            OutputWire::Allocated(wire) => wire,
            OutputWire::InPlace(position) => match self.state.resolve(position) {
                Some(wire) => wire,
                None => {
                    // first write at this half position
                    let wire = Wire::Intermediate {
                        id: IntermediateId(self.next_id),
                        position,
                    };
                    self.next_id += 1;
                    wire
                }
            },
        };

        if let Some(previous) = self.state.write(target, output) {
            let diagnostic = Diagnostic::SharedIntermediatePosition {
                moment: op.moment(),
                position: target.position(),
                previous,
                current: target,
            };
            tracing::warn!(%diagnostic, "intermediate wire position reused");
            self.diagnostics.push(diagnostic);
        }
        self.snapshot(op.moment());
        StepOutcome::Applied { output }
    }

    /// Records the current state for `moment`, back-filling empty slots
    /// before it with the same snapshot.
    fn snapshot(&mut self, moment: u32) {
        let moment = moment as usize;
        if moment >= self.trace.len() {
            self.trace.resize(moment + 1, None);
        }
        for slot in self.trace.iter_mut().take(moment) {
            if slot.is_none() {
                *slot = Some(self.state.clone());
            }
        }
        self.trace[moment] = Some(self.state.clone());
    }

    fn skip(&mut self, diagnostic: Diagnostic) -> StepOutcome {
        tracing::warn!(%diagnostic, "operation skipped");
        self.diagnostics.push(diagnostic.clone());
        StepOutcome::Skipped(diagnostic)
    }

    /// Final state, the forward-filled trace and the diagnostics.
    pub(crate) fn finish(self) -> (WireState, Vec<WireState>, Vec<Diagnostic>) {
        let mut trace = Vec::with_capacity(self.trace.len());
        let mut previous: Option<WireState> = None;
        for slot in self.trace {
            let snapshot = slot
                .or_else(|| previous.clone())
                .unwrap_or_default();
            previous = Some(snapshot.clone());
            trace.push(snapshot);
        }
        (self.state, trace, self.diagnostics)
    }
}
