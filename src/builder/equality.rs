//! Follow-up configuration for field equality rules.

use crate::accessor::Accessor;
use crate::rules::FieldEqualityRule;
use crate::tokens::MessageToken;
use std::marker::PhantomData;
use std::sync::Arc;

/// Adjusts a [`FieldEqualityRule`] that is already registered on its parent.
///
/// Both setters mutate the registered instance directly.
pub struct FieldEqualityRuleExpression<T> {
    rule: Arc<FieldEqualityRule>,
    _target: PhantomData<fn() -> T>,
}

impl<T: 'static> FieldEqualityRuleExpression<T> {
    pub(crate) fn new(rule: Arc<FieldEqualityRule>) -> Self {
        Self {
            rule,
            _target: PhantomData,
        }
    }

    /// Report `token` instead of the default `field_equality`.
    pub fn use_token(&mut self, token: impl Into<MessageToken>) -> &mut Self {
        self.rule.set_token(token.into());
        self
    }

    /// Flag `property` when the values differ.
    pub fn report_errors_on(&mut self, property: &str) -> &mut Self {
        self.rule.set_report_on(Accessor::new::<T>(property));
        self
    }

    /// The registered rule.
    pub fn rule(&self) -> &Arc<FieldEqualityRule> {
        &self.rule
    }
}
