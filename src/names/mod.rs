// src/names/mod.rs

//! Friendly circuit names such as "Cobalt Adder".

use crate::core::constants::name_words::{COLORS, DEVICES};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::cell::RefCell;

/// Hands out "Color Device" names without repeating one until every
/// combination has been used.
#[derive(Debug)]
pub struct NameGenerator {
    rng: StdRng,
    // (color, device) pairs not handed out yet in the current round
    remaining: Vec<(usize, usize)>,
}

impl NameGenerator {
    /// Generator seeded from the thread-local RNG.
    pub fn new() -> Self {
        Self::seeded(rand::random::<u64>())
    }

    /// Generator whose sequence is fixed by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            remaining: Vec::new(),
        }
    }

    pub fn next_name(&mut self) -> String {
        if self.remaining.is_empty() {
            self.remaining = (0..COLORS.len())
                .flat_map(|c| (0..DEVICES.len()).map(move |d| (c, d)))
                .collect();
        }
        let pick = (self.rng.random::<u64>() % self.remaining.len() as u64) as usize;
        let (color, device) = self.remaining.swap_remove(pick);
        format!("{} {}", COLORS[color], DEVICES[device])
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for NameGenerator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_name())
    }
}

thread_local! {
    static NAMES: RefCell<NameGenerator> = RefCell::new(NameGenerator::new());
}

/// Next name from the thread's shared generator, so circuits created one
/// after another get different names until the pool runs out.
pub fn random_name() -> String {
    NAMES.with(|names| names.borrow_mut().next_name())
}
