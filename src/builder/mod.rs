//! Fluent rule builders.
//!
//! - [`ClassValidationRules`]: the per-type entry point and finalizer
//! - [`FieldValidationExpression`]: named rules for one property
//! - [`RuleRegistrationExpression`]: one pending registration, conditionable
//! - [`FieldEqualityRuleExpression`]: follow-up settings for `matches`
//!
//! Builders only collect configuration. Nothing is evaluated until an
//! external engine runs the rules in a
//! [`ValidationGraph`](crate::graph::ValidationGraph).

mod class_rules;
mod equality;
mod field;
mod registration;


// Re-export public API
pub use class_rules::ClassValidationRules;
pub use equality::FieldEqualityRuleExpression;
pub use field::FieldValidationExpression;
pub use registration::{RuleFactory, RuleRegistrationExpression, RuleSource};
