// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod bit;
pub mod wire;

// Re-export public types for convenient access via `logiq::core::TypeName`
pub use error::CircuitError;
pub use bit::{Bit, BitConstant};
pub use wire::{IntermediateId, IntoWireIndex, Wire, WireIndex};

pub mod constants;
pub use constants::logiq_constants::{DEFAULT_BANDWIDTH, DEFAULT_TIMEWIDTH, IDENTITY_SYMBOL};
