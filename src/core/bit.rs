// src/core/bit.rs

use num_traits::Zero;
use std::fmt;
use std::ops::Not;

/// A single binary value, always 0 or 1.
///
/// Bits compare by value only. Symbols and names used for display come from
/// the table of named constants (see [`Bit::constants`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bit {
    value: u8,
}

/// A named bit used for notation and lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitConstant {
    /// Constant key, e.g. `"HIGH"`
    pub key: &'static str,
    /// Short symbol, e.g. `"H"`
    pub symbol: &'static str,
    /// Display name, e.g. `"High"`
    pub name: &'static str,
    /// The value it stands for
    pub bit: Bit,
}

const CONSTANTS: [BitConstant; 6] = [
    BitConstant { key: "ZERO", symbol: "0", name: "Zero", bit: Bit::ZERO },
    BitConstant { key: "ONE", symbol: "1", name: "One", bit: Bit::ONE },
    BitConstant { key: "LOW", symbol: "L", name: "Low", bit: Bit::LOW },
    BitConstant { key: "HIGH", symbol: "H", name: "High", bit: Bit::HIGH },
    BitConstant { key: "FALSE", symbol: "F", name: "False", bit: Bit::FALSE },
    BitConstant { key: "TRUE", symbol: "T", name: "True", bit: Bit::TRUE },
];

impl Bit {
    pub const ZERO: Bit = Bit { value: 0 };
    pub const ONE: Bit = Bit { value: 1 };
    pub const LOW: Bit = Bit::ZERO;
    pub const HIGH: Bit = Bit::ONE;
    pub const FALSE: Bit = Bit::ZERO;
    pub const TRUE: Bit = Bit::ONE;

    /// Creates a bit from a boolean.
    pub const fn new(high: bool) -> Self {
        Self { value: high as u8 }
    }

    /// Coerces any number to a bit: zero is 0, everything else is 1.
    pub fn from_number<N: Zero>(n: N) -> Self {
        Self::new(!n.is_zero())
    }

    /// The numeric value, 0 or 1.
    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_high(&self) -> bool {
        self.value == 1
    }

    /// Flips the bit in place.
    pub fn flip(&mut self) -> &mut Self {
        self.value ^= 1;
        self
    }

    /// Symbol of the first constant sharing this value (`"0"` or `"1"`).
    pub fn symbol(&self) -> &'static str {
        Self::find_by_value(*self).map_or("?", |c| c.symbol)
    }

    /// Name of the first constant sharing this value (`"Zero"` or `"One"`).
    pub fn name(&self) -> &'static str {
        Self::find_by_value(*self).map_or("Unnamed", |c| c.name)
    }

    /// `"HIGH"` or `"LOW"`, as used in circuit reports.
    pub fn level(&self) -> &'static str {
        if self.is_high() { "HIGH" } else { "LOW" }
    }

    /// All named constants in declaration order.
    pub fn constants() -> &'static [BitConstant] {
        &CONSTANTS
    }

    /// Case-insensitive lookup by symbol.
    pub fn find_by_symbol(symbol: &str) -> Option<&'static BitConstant> {
        CONSTANTS.iter().find(|c| c.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Case-insensitive lookup by name.
    pub fn find_by_name(name: &str) -> Option<&'static BitConstant> {
        CONSTANTS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn find_by_value(bit: Bit) -> Option<&'static BitConstant> {
        CONSTANTS.iter().find(|c| c.bit == bit)
    }
}

impl Not for Bit {
    type Output = Bit;

    fn not(self) -> Bit {
        Bit { value: self.value ^ 1 }
    }
}

impl From<bool> for Bit {
    fn from(high: bool) -> Self {
        Bit::new(high)
    }
}

impl From<u8> for Bit {
    fn from(n: u8) -> Self {
        Bit::from_number(n)
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.value
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
