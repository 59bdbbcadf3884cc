// src/evaluation/mod.rs

//! Evaluates a [`Circuit`](crate::circuits::Circuit) into bits, intermediate
//! wire values and a per-moment trace.
//!
//! The [`Evaluator`] is the entry point; it drives the internal
//! `EvaluationEngine`, which threads a wire-state map through the circuit's
//! operations in (moment, lowest wire) order.

mod results;
pub(crate) mod engine;

// Re-export the main public interface types
pub use results::{Diagnostic, EvaluationResult, WireState};

use crate::circuits::Circuit;
use crate::core::Bit;
use crate::events::CircuitEvent;
use crate::operations::Operation;
use engine::{EvaluationEngine, StepOutcome};

/// Evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Emit `CircuitEvent::EvaluateProgressed` after every evaluated
    /// operation. Each one carries a copy of the wire state.
    pub emit_progress: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self { emit_progress: true }
    }
}

/// Runs circuits. Evaluation is best effort: operations that cannot run
/// are skipped and reported as [`Diagnostic`]s, never as errors.
#[derive(Debug, Default, Clone)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Creates an Evaluator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluates `circuit` without touching its cached results.
    ///
    /// Emits `EvaluateBegan`, one `EvaluateProgressed` per evaluated
    /// operation (unless disabled), then `EvaluateCompleted` on the
    /// circuit's event bus.
    ///
    /// # Returns
    /// The final bit on every primary wire, the full final wire state, a
    /// trace with exactly `timewidth + 1` snapshots and the diagnostics.
    pub fn run(&self, circuit: &Circuit) -> EvaluationResult {
        let id = circuit.id();
        let events = circuit.events();
        events.emit(&CircuitEvent::EvaluateBegan { circuit: id });

        // The circuit keeps its list sorted; sort a view anyway so a
        // hand-assembled list cannot change the outcome.
        let mut operations: Vec<&Operation> = circuit.operations().iter().collect();
        operations.sort_by(|a, b| a.canonical_cmp(b));

        let mut engine = EvaluationEngine::init(
            circuit.bits(),
            circuit.timewidth(),
            circuit.next_intermediate(),
        );
        let total = operations.len();
        let mut completed = 0;

        for op in operations {
            match engine.step(op) {
                StepOutcome::Applied { output } => {
                    completed += 1;
                    tracing::trace!(operation = %op, %output, "operation evaluated");
                    if self.config.emit_progress {
                        events.emit(&CircuitEvent::EvaluateProgressed {
                            circuit: id,
                            progress: completed as f64 / total as f64,
                            completed,
                            total,
                            moment: op.moment(),
                            inputs: op.inputs().to_vec(),
                            output: op.output(),
                            gate: op.gate().name(),
                            state: engine.state().clone(),
                        });
                    }
                }
                StepOutcome::Skipped(_) => {}
            }
        }

        let (state, trace, diagnostics) = engine.finish();
        // Only primary wires are circuit outputs.
        let results: Vec<Bit> = (1..=circuit.bandwidth())
            .map(|n| state.primary(n).unwrap_or(Bit::ZERO))
            .collect();

        tracing::info!(
            circuit = %id,
            operations = total,
            skipped = total - completed,
            "evaluation completed"
        );

        let result = EvaluationResult {
            results,
            intermediate_wires: state,
            trace,
            diagnostics,
        };
        events.emit(&CircuitEvent::EvaluateCompleted {
            circuit: id,
            results: result.results.clone(),
            intermediate_wires: result.intermediate_wires.clone(),
            trace: result.trace.clone(),
        });
        result
    }
}
