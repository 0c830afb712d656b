//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use ironhold_core::rng::DeterministicRng;

/// A no-op RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. Every d20 is a natural 1, every damage die a 1.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from a predetermined sequence. Panics if the
/// sequence is exhausted. Used in tests that script exact dice rolls.
///
/// Every request's range is recorded so tests can check which dice were
/// rolled, e.g. `(1, 20)` for an attack roll and `(1, 6)` for damage.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
    requests: Vec<(u32, u32)>,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            index: 0,
            requests: Vec::new(),
        }
    }

    /// The `(min, max)` ranges requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> &[(u32, u32)] {
        &self.requests
    }

    /// Whether every scripted value has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.values.len()
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        assert!(
            self.index < self.values.len(),
            "SequenceRng exhausted after {} values (requested range {min}..={max})",
            self.values.len()
        );
        let val = self.values[self.index];
        self.index += 1;
        self.requests.push((min, max));
        val
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}
