//! Configuration value types for declarative rule sets.

use serde::{Deserialize, Serialize};

/// Inclusive length bounds for a `range_length` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

impl LengthRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

// Skip helpers for serde
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
