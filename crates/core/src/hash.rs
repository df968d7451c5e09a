//! Deterministic hash aggregation shared by value objects and collections.

use crate::field::FieldValue;

/// Seed of every accumulator.
pub const HASH_SEED: i32 = 17;

/// Multiplier applied before each contribution.
pub const HASH_MULTIPLIER: i32 = 59;

/// Order-dependent `hash = hash * 59 + value` accumulator seeded at 17.
///
/// Arithmetic wraps on overflow, so the result is stable across platforms and
/// independent of process state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HashCode {
    value: i32,
}

impl HashCode {
    pub const fn new() -> Self {
        Self { value: HASH_SEED }
    }

    /// Fold one contribution into the accumulator.
    pub fn add(&mut self, value: i32) {
        self.value = self
            .value
            .wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(value);
    }

    /// Fold a field value. Absent values contribute nothing.
    pub fn add_field<F: FieldValue>(&mut self, field: &F) {
        if let Some(hash) = field.field_hash() {
            self.add(hash);
        }
    }

    pub const fn finish(self) -> i32 {
        self.value
    }
}

impl Default for HashCode {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<i32> for HashCode {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}
