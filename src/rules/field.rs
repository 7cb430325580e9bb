//! Field rules: validation bound to a single property.

use crate::accessor::Accessor;
use crate::context::ValidationContext;
use crate::error::{Result, RulesError};
use crate::tokens::{self, MessageToken};
use regex::Regex;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email regex")
});

/// Validation logic scoped to one field's value.
///
/// Implementations read the field through `ctx.value_of(accessor)` and call
/// `ctx.report` when the value is rejected. Rules that have nothing to check
/// (for example a missing optional value) simply return.
pub trait FieldRule: Send + Sync + fmt::Debug {
    /// Token reported when this rule fails.
    fn token(&self) -> &MessageToken;

    /// Evaluate the rule for `accessor` on the context's target.
    fn validate(&self, accessor: &Accessor, ctx: &mut ValidationContext<'_>);

    /// Concrete rule, for introspection.
    fn as_any(&self) -> &dyn Any;
}

/// Numeric view of a field value. Numeric strings count as numbers.
pub(crate) fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Length of a string (in chars) or an array (in items).
pub(crate) fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Shared body of the built-in rules: look the value up, skip missing values,
/// report when `rejects` says so.
fn check(
    accessor: &Accessor,
    ctx: &mut ValidationContext<'_>,
    token: &MessageToken,
    rejects: impl FnOnce(&Value) -> bool,
) {
    let failed = match ctx.value_of(accessor) {
        None | Some(Value::Null) => false,
        Some(value) => rejects(value),
    };
    if failed {
        ctx.report(accessor, token);
    }
}

/// Numeric types accepted as bounds by the value rules.
///
/// Wide integers are converted with `as`, so bounds beyond 2^53 lose
/// precision the same way JSON numbers do.
pub trait NumericBound {
    fn to_bound(self) -> f64;
}

macro_rules! impl_numeric_bound {
    ($($ty:ty),*) => {
        $(
            impl NumericBound for $ty {
                fn to_bound(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_numeric_bound!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

macro_rules! token_override {
    () => {
        /// Replace the token reported on failure.
        pub fn with_token(mut self, token: impl Into<MessageToken>) -> Self {
            self.token = token.into();
            self
        }
    };
}

macro_rules! impl_rule_plumbing {
    () => {
        fn token(&self) -> &MessageToken {
            &self.token
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    };
}

/// Fails when the value is missing, `null`, a blank string, or an empty array.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredFieldRule {
    token: MessageToken,
}

impl RequiredFieldRule {
    pub fn new() -> Self {
        Self {
            token: tokens::REQUIRED,
        }
    }

    token_override!();
}

impl Default for RequiredFieldRule {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule for RequiredFieldRule {
    impl_rule_plumbing!();

    fn validate(&self, accessor: &Accessor, ctx: &mut ValidationContext<'_>) {
        let missing = match ctx.value_of(accessor) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(_) => false,
        };
        if missing {
            ctx.report(accessor, &self.token);
        }
    }
}

/// Fails when a non-empty string is not an email address.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailFieldRule {
    token: MessageToken,
}

impl EmailFieldRule {
    pub fn new() -> Self {
        Self {
            token: tokens::EMAIL,
        }
    }

    token_override!();
}

impl Default for EmailFieldRule {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule for EmailFieldRule {
    impl_rule_plumbing!();

    fn validate(&self, accessor: &Accessor, ctx: &mut ValidationContext<'_>) {
        check(accessor, ctx, &self.token, |value| {
            non_empty_str(value).is_some_and(|s| !EMAIL_REGEX.is_match(s))
        });
    }
}

/// Fails when the value is longer than `length`.
#[derive(Debug, Clone, PartialEq)]
pub struct MaximumLengthRule {
    length: usize,
    token: MessageToken,
}

impl MaximumLengthRule {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            token: tokens::MAXIMUM_LENGTH,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    token_override!();
}

impl FieldRule for MaximumLengthRule {
    impl_rule_plumbing!();

    fn validate(&self, accessor: &Accessor, ctx: &mut ValidationContext<'_>) {
        let max = self.length;
        check(accessor, ctx, &self.token, |value| {
            length_of(value).is_some_and(|len| len > max)
        });
    }
}

/// Fails when the value is shorter than `length`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimumLengthRule {
    length: usize,
    token: MessageToken,
}

impl MinimumLengthRule {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            token: tokens::MINIMUM_LENGTH,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    token_override!();
}

impl FieldRule for MinimumLengthRule {
    impl_rule_plumbing!();

    fn validate(&self, accessor: &Accessor, ctx: &mut ValidationContext<'_>) {
        let min = self.length;
        check(accessor, ctx, &self.token, |value| {
            length_of(value).is_some_and(|len| len < min)
        });
    }
}

/// Fails when the value's length falls outside `min..=max`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeLengthRule {
    min: usize,
    max: usize,
    token: MessageToken,
}

impl RangeLengthRule {
    /// Build a rule accepting lengths in `min..=max`.
    ///
    /// # Returns
    ///
    /// * `Ok(RangeLengthRule)` - Valid bounds
    /// * `Err(RulesError::InvalidRule)` - If `min` is greater than `max`
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min > max {
            return Err(RulesError::InvalidRule(format!(
                "length range min ({}) is greater than max ({})",
                min, max
            )));
        }

        Ok(Self {
            min,
            max,
            token: tokens::RANGE_LENGTH,
        })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    token_override!();
}

impl FieldRule for RangeLengthRule {
    impl_rule_plumbing!();

    fn validate(&self, accessor: &Accessor, ctx: &mut ValidationContext<'_>) {
        let range = self.min..=self.max;
        check(accessor, ctx, &self.token, |value| {
            length_of(value).is_some_and(|len| !range.contains(&len))
        });
    }
}

/// Fails when the value is below `bound`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinValueFieldRule {
    bound: f64,
    token: MessageToken,
}

impl MinValueFieldRule {
    pub fn new(bound: impl NumericBound) -> Self {
        Self {
            bound: bound.to_bound(),
            token: tokens::MIN_VALUE,
        }
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    token_override!();
}

impl FieldRule for MinValueFieldRule {
    impl_rule_plumbing!();

    fn validate(&self, accessor: &Accessor, ctx: &mut ValidationContext<'_>) {
        let bound = self.bound;
        check(accessor, ctx, &self.token, |value| {
            number_of(value).is_some_and(|n| n < bound)
        });
    }
}

/// Fails when the value is above `bound`.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxValueFieldRule {
    bound: f64,
    token: MessageToken,
}

impl MaxValueFieldRule {
    pub fn new(bound: impl NumericBound) -> Self {
        Self {
            bound: bound.to_bound(),
            token: tokens::MAX_VALUE,
        }
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    token_override!();
}

impl FieldRule for MaxValueFieldRule {
    impl_rule_plumbing!();

    fn validate(&self, accessor: &Accessor, ctx: &mut ValidationContext<'_>) {
        let bound = self.bound;
        check(accessor, ctx, &self.token, |value| {
            number_of(value).is_some_and(|n| n > bound)
        });
    }
}

/// Fails when the value is zero or negative.
#[derive(Debug, Clone, PartialEq)]
pub struct GreaterThanZeroRule {
    token: MessageToken,
}

impl GreaterThanZeroRule {
    pub fn new() -> Self {
        Self {
            token: tokens::GREATER_THAN_ZERO,
        }
    }

    token_override!();
}

impl Default for GreaterThanZeroRule {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule for GreaterThanZeroRule {
    impl_rule_plumbing!();

    fn validate(&self, accessor: &Accessor, ctx: &mut ValidationContext<'_>) {
        check(accessor, ctx, &self.token, |value| {
            number_of(value).is_some_and(|n| n <= 0.0)
        });
    }
}

/// Fails when the value is negative.
#[derive(Debug, Clone, PartialEq)]
pub struct GreaterOrEqualToZeroRule {
    token: MessageToken,
}

impl GreaterOrEqualToZeroRule {
    pub fn new() -> Self {
        Self {
            token: tokens::GREATER_OR_EQUAL_TO_ZERO,
        }
    }

    token_override!();
}

impl Default for GreaterOrEqualToZeroRule {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule for GreaterOrEqualToZeroRule {
    impl_rule_plumbing!();

    fn validate(&self, accessor: &Accessor, ctx: &mut ValidationContext<'_>) {
        check(accessor, ctx, &self.token, |value| {
            number_of(value).is_some_and(|n| n < 0.0)
        });
    }
}

/// Fails when a non-empty string does not match a pattern.
#[derive(Debug, Clone)]
pub struct RegularExpressionFieldRule {
    regex: Regex,
    token: MessageToken,
}

impl RegularExpressionFieldRule {
    /// Compile `pattern` into a rule.
    ///
    /// # Returns
    ///
    /// * `Ok(RegularExpressionFieldRule)` - Successfully compiled pattern
    /// * `Err(RulesError::InvalidRule)` - If the pattern fails to compile
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            RulesError::InvalidRule(format!("invalid regex pattern '{}' - {}", pattern, e))
        })?;

        Ok(Self {
            regex,
            token: tokens::REGEX,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    token_override!();
}

impl FieldRule for RegularExpressionFieldRule {
    impl_rule_plumbing!();

    fn validate(&self, accessor: &Accessor, ctx: &mut ValidationContext<'_>) {
        let regex = &self.regex;
        check(accessor, ctx, &self.token, |value| {
            non_empty_str(value).is_some_and(|s| !regex.is_match(s))
        });
    }
}
