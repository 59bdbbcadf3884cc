// src/core/wire.rs

//! Wire positions and wire identities.
//!
//! A [`WireIndex`] is a place on the grid, counted in half steps so that the
//! slot between registers 1 and 2 is representable as `1.5`. A [`Wire`] is a
//! signal line: either one of the circuit's declared registers, or an
//! intermediate line allocated for the output of a multi-wire gate.

use super::error::CircuitError;
use std::fmt;

/// A wire position on the grid: `1`, `1.5`, `2`, ...
///
/// Stored as the number of half steps, so `1` is `2` and `1.5` is `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireIndex(u32);

impl WireIndex {
    /// Position of primary register `n` (1-based).
    pub const fn primary(n: u32) -> Self {
        Self(n * 2)
    }

    /// Builds a position from a number such as `2.0` or `1.5`.
    ///
    /// # Errors
    /// `CircuitError::InvalidWire` unless `value` is a positive whole or
    /// half number.
    pub fn from_f64(value: f64) -> Result<Self, CircuitError> {
        let doubled = value * 2.0;
        if !value.is_finite() || value <= 0.0 || doubled.fract() != 0.0 || doubled > u32::MAX as f64 {
            return Err(CircuitError::InvalidWire { value });
        }
        Ok(Self(doubled as u32))
    }

    /// Raw half-step count.
    pub fn half_steps(&self) -> u32 {
        self.0
    }

    /// `true` for whole positions, i.e. declared registers.
    pub fn is_primary(&self) -> bool {
        self.0 % 2 == 0
    }

    /// Register number for whole positions.
    pub fn register(&self) -> Option<u32> {
        self.is_primary().then_some(self.0 / 2)
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 2.0
    }

    /// Slot for the output of a gate spanning `min..=max`.
    ///
    /// The half-integer position nearest the midpoint; a whole midpoint
    /// resolves to the slot above it. Inputs on 1 and 2 land on 1.5, inputs
    /// on 1.5 and 4 land on 2.5.
    pub fn midpoint_slot(min: WireIndex, max: WireIndex) -> WireIndex {
        // floor((min + max) / 2) + 0.5, all in half steps
        let whole = (min.0 + max.0) / 4;
        WireIndex(whole * 2 + 1)
    }
}

impl From<u32> for WireIndex {
    fn from(n: u32) -> Self {
        WireIndex::primary(n)
    }
}

impl TryFrom<f64> for WireIndex {
    type Error = CircuitError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        WireIndex::from_f64(value)
    }
}

impl fmt::Display for WireIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_primary() {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

/// Anything a caller may name a register with: `2`, `2u32`, `1.5` or a
/// [`WireIndex`].
pub trait IntoWireIndex {
    fn into_wire_index(self) -> Result<WireIndex, CircuitError>;
}

impl IntoWireIndex for WireIndex {
    fn into_wire_index(self) -> Result<WireIndex, CircuitError> {
        Ok(self)
    }
}

impl IntoWireIndex for u32 {
    fn into_wire_index(self) -> Result<WireIndex, CircuitError> {
        WireIndex::from_f64(self as f64)
    }
}

impl IntoWireIndex for i32 {
    fn into_wire_index(self) -> Result<WireIndex, CircuitError> {
        WireIndex::from_f64(self as f64)
    }
}

impl IntoWireIndex for usize {
    fn into_wire_index(self) -> Result<WireIndex, CircuitError> {
        WireIndex::from_f64(self as f64)
    }
}

impl IntoWireIndex for f64 {
    fn into_wire_index(self) -> Result<WireIndex, CircuitError> {
        WireIndex::from_f64(self)
    }
}

impl<T: IntoWireIndex + Copy> IntoWireIndex for &T {
    fn into_wire_index(self) -> Result<WireIndex, CircuitError> {
        (*self).into_wire_index()
    }
}

/// Identity of an intermediate wire, unique within its circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntermediateId(pub u32);

impl fmt::Display for IntermediateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i{}", self.0)
    }
}

/// A signal line carrying one bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Wire {
    /// Declared register `n` (1-based).
    Primary(u32),
    /// Line created for the output of a multi-wire gate.
    Intermediate {
        /// Allocated identity
        id: IntermediateId,
        /// Where the line is drawn on the grid
        position: WireIndex,
    },
}

impl Wire {
    /// Grid position of the wire.
    pub fn position(&self) -> WireIndex {
        match self {
            Wire::Primary(n) => WireIndex::primary(*n),
            Wire::Intermediate { position, .. } => *position,
        }
    }

    pub fn is_intermediate(&self) -> bool {
        matches!(self, Wire::Intermediate { .. })
    }
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wire::Primary(n) => write!(f, "wire {}", n),
            Wire::Intermediate { id, position } => write!(f, "wire {} ({})", position, id),
        }
    }
}
