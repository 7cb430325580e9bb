//! Declarative rule sets.
//!
//! A [`RulesConfig`] describes the same registrations the fluent builder
//! makes, as YAML. It supports forward-compatible parsing (unknown fields are
//! ignored), defaults for every field, and validation before anything is
//! registered.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{PropertyRules, RulesConfig};
pub use types::LengthRange;
