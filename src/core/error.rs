//! Error handling logic

use super::wire::WireIndex;

/// Errors raised when a request against a circuit cannot be honoured.
///
/// Placement errors leave the circuit untouched. Evaluation never produces
/// one of these; gaps found while evaluating are reported as
/// [`Diagnostic`](crate::evaluation::Diagnostic)s instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CircuitError {
    /// No gate in the catalog answers to this symbol.
    #[error("no gate with the symbol \"{symbol}\"")]
    UnknownGate {
        /// The symbol that was looked up
        symbol: String,
    },

    /// A circuit needs at least one wire and one moment.
    #[error("circuit dimensions must be at least 1x1, got bandwidth {bandwidth} and timewidth {timewidth}")]
    InvalidDimensions {
        /// Requested number of wires
        bandwidth: u32,
        /// Requested number of moments
        timewidth: u32,
    },

    /// The moment lies outside `1..=timewidth`.
    #[error("moment {moment} is outside 1..={timewidth}")]
    MomentOutOfRange {
        /// Offending moment
        moment: u32,
        /// Moments available on the circuit
        timewidth: u32,
    },

    /// The wire position lies outside the circuit's registers.
    #[error("wire {wire} is outside 1..={bandwidth}")]
    WireOutOfRange {
        /// Offending wire position
        wire: WireIndex,
        /// Registers available on the circuit
        bandwidth: u32,
    },

    /// Wire positions are whole or half steps only (1, 1.5, 2, ...).
    #[error("{value} is not a whole or half wire position")]
    InvalidWire {
        /// The rejected value
        value: f64,
    },

    /// A placement or removal named no register at all.
    #[error("at least one register index is required")]
    MissingRegister,

    /// An input bit index outside `0..bandwidth`.
    #[error("bit {index} is outside 0..{bandwidth}")]
    BitOutOfRange {
        /// Zero-based bit index
        index: usize,
        /// Number of input bits
        bandwidth: u32,
    },

    /// A token of the text circuit format could not be read.
    #[error("line {line}, column {column}: malformed token \"{token}\" ({reason})")]
    MalformedToken {
        /// 1-based line number
        line: usize,
        /// 1-based column of the token's first character
        column: usize,
        /// The token as written
        token: String,
        /// What was wrong with it
        reason: String,
    },

    /// The text circuit format contained no rows.
    #[error("circuit text contains no wires")]
    EmptyText,

    /// Operations are not in (moment, lowest wire) order.
    #[error("operation {index} at moment {moment} is out of order")]
    NotMonotonic {
        /// Position in the operation list
        index: usize,
        /// Moment of the misplaced operation
        moment: u32,
    },
}
