//! Per-property rule chains.

use super::class_rules::ClassValidationRules;
use super::equality::FieldEqualityRuleExpression;
use super::registration::RuleRegistrationExpression;
use crate::accessor::Accessor;
use crate::context::ValidationContext;
use crate::error::{Result, RulesError};
use crate::rules::{
    ClassRule, EmailFieldRule, FieldEqualityRule, FieldRule, FieldRuleCondition,
    GreaterOrEqualToZeroRule, GreaterThanZeroRule, IsValid, MaxValueFieldRule, MaximumLengthRule,
    MinValueFieldRule, MinimumLengthRule, NumericBound, RangeLengthRule, RegularExpressionFieldRule,
    RequiredFieldRule, RuleCondition,
};
use crate::tokens::MessageToken;
use std::sync::Arc;

/// Chain of rules for one property of `T`.
///
/// Every rule method adds its own registration to the parent builder and
/// becomes the "last rule". The `when*` methods condition only that last
/// rule, and fail with [`RulesError::InvalidSequencing`] when no rule has
/// been added through this expression yet.
///
/// # Example
///
/// ```
/// use classrules::builder::ClassValidationRules;
///
/// struct Order { express: bool }
///
/// let mut rules = ClassValidationRules::<Order>::new();
/// rules
///     .property("phone")
///     .maximum_length(20)
///     .required()
///     .when_fn(|order: &Order| order.express)?;
/// # Ok::<(), classrules::error::RulesError>(())
/// ```
pub struct FieldValidationExpression<'a, T> {
    parent: &'a mut ClassValidationRules<T>,
    accessor: Accessor,
    last_rule: Option<usize>,
}

impl<'a, T: 'static> FieldValidationExpression<'a, T> {
    pub(crate) fn new(parent: &'a mut ClassValidationRules<T>, accessor: Accessor) -> Self {
        Self {
            parent,
            accessor,
            last_rule: None,
        }
    }

    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    /// Register an arbitrary rule instance for this property.
    pub fn rule(&mut self, rule: Arc<dyn FieldRule>) -> &mut Self {
        let expression = RuleRegistrationExpression::shared(rule, vec![self.accessor.clone()]);
        self.last_rule = Some(self.parent.push_pending(expression));
        self
    }

    /// Register a default-constructed rule `R` for this property.
    pub fn rule_type<R: FieldRule + Default + 'static>(&mut self) -> &mut Self {
        self.rule(Arc::new(R::default()))
    }

    pub fn required(&mut self) -> &mut Self {
        self.rule(Arc::new(RequiredFieldRule::new()))
    }

    pub fn email(&mut self) -> &mut Self {
        self.rule(Arc::new(EmailFieldRule::new()))
    }

    pub fn maximum_length(&mut self, length: usize) -> &mut Self {
        self.rule(Arc::new(MaximumLengthRule::new(length)))
    }

    pub fn minimum_length(&mut self, length: usize) -> &mut Self {
        self.rule(Arc::new(MinimumLengthRule::new(length)))
    }

    /// Require the length to fall within `min..=max`.
    ///
    /// Inverted bounds fail with [`RulesError::InvalidRule`] and register
    /// nothing.
    pub fn range_length(&mut self, min: usize, max: usize) -> Result<&mut Self> {
        let rule = RangeLengthRule::new(min, max)?;
        Ok(self.rule(Arc::new(rule)))
    }

    pub fn min_value(&mut self, bound: impl NumericBound) -> &mut Self {
        self.rule(Arc::new(MinValueFieldRule::new(bound)))
    }

    pub fn max_value(&mut self, bound: impl NumericBound) -> &mut Self {
        self.rule(Arc::new(MaxValueFieldRule::new(bound)))
    }

    pub fn greater_than_zero(&mut self) -> &mut Self {
        self.rule(Arc::new(GreaterThanZeroRule::new()))
    }

    pub fn greater_or_equal_to_zero(&mut self) -> &mut Self {
        self.rule(Arc::new(GreaterOrEqualToZeroRule::new()))
    }

    /// Require the value to match `pattern`.
    ///
    /// The pattern is compiled here, so a bad pattern surfaces at
    /// configuration time as [`RulesError::InvalidRule`].
    pub fn reg_ex(&mut self, pattern: &str) -> Result<&mut Self> {
        let rule = RegularExpressionFieldRule::new(pattern)?;
        Ok(self.rule(Arc::new(rule)))
    }

    /// Like [`reg_ex`](Self::reg_ex), reporting `token` on failure.
    pub fn reg_ex_with_token(
        &mut self,
        pattern: &str,
        token: impl Into<MessageToken>,
    ) -> Result<&mut Self> {
        let rule = RegularExpressionFieldRule::new(pattern)?.with_token(token);
        Ok(self.rule(Arc::new(rule)))
    }

    /// Condition the last rule added through this expression.
    pub fn when(&mut self, condition: Arc<dyn RuleCondition>) -> Result<&mut Self> {
        self.last_registration()?.when(condition);
        Ok(self)
    }

    pub fn when_type<C: RuleCondition + Default + 'static>(&mut self) -> Result<&mut Self> {
        self.when(Arc::new(C::default()))
    }

    pub fn when_fn<F>(&mut self, predicate: F) -> Result<&mut Self>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.when(FieldRuleCondition::for_target::<T, F>(predicate))
    }

    pub fn when_ctx<F>(&mut self, predicate: F) -> Result<&mut Self>
    where
        F: Fn(&T, &ValidationContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.when(FieldRuleCondition::for_context::<T, F>(predicate))
    }

    /// Run the last rule only if nothing has failed on the target so far.
    pub fn if_valid(&mut self) -> Result<&mut Self> {
        self.when_type::<IsValid>()
    }

    /// Require this property to equal `other`.
    ///
    /// The equality rule is added to the parent as a class rule straight away;
    /// the returned expression adjusts that same instance.
    pub fn matches(&mut self, other: &str) -> FieldEqualityRuleExpression<T> {
        let rule = Arc::new(FieldEqualityRule::new(
            self.accessor.clone(),
            Accessor::new::<T>(other),
        ));
        self.parent.add_class_rule(rule.clone() as Arc<dyn ClassRule>);
        FieldEqualityRuleExpression::new(rule)
    }

    fn last_registration(&mut self) -> Result<&mut RuleRegistrationExpression> {
        let index = self.last_rule.ok_or_else(|| {
            RulesError::InvalidSequencing(format!(
                "cannot attach a condition to '{}' before any rule has been added to it",
                self.accessor
            ))
        })?;

        let accessor = &self.accessor;
        self.parent.pending_mut(index).ok_or_else(|| {
            RulesError::InvalidSequencing(format!(
                "last rule for '{}' is no longer pending",
                accessor
            ))
        })
    }
}
