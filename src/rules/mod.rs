//! Rule and condition value objects.
//!
//! - Field rules: validation bound to one property ([`FieldRule`])
//! - Class rules: validation bound to a whole instance ([`ClassRule`])
//! - Conditions: predicates gating a rule ([`RuleCondition`])
//!
//! Everything here is invoked by an external execution engine; this crate
//! only builds and registers the objects.

mod class;
mod condition;
mod conditional;
mod equality;
mod field;

#[cfg(test)]
mod tests;

// Re-export public API
pub use class::{ClassRule, ClassRuleSet, ClassRuleSource};
pub use condition::{FieldRuleCondition, IsValid, RuleCondition};
pub use conditional::ConditionalFieldRule;
pub use equality::FieldEqualityRule;
pub use field::{
    EmailFieldRule, FieldRule, GreaterOrEqualToZeroRule, GreaterThanZeroRule, MaxValueFieldRule,
    MaximumLengthRule, MinValueFieldRule, MinimumLengthRule, NumericBound, RangeLengthRule,
    RegularExpressionFieldRule, RequiredFieldRule,
};
