//! Conditional wrapping of field rules.

use super::condition::RuleCondition;
use super::field::FieldRule;
use crate::accessor::Accessor;
use crate::context::ValidationContext;
use crate::tokens::MessageToken;
use std::any::Any;
use std::sync::Arc;

/// Runs `inner` only when `condition` holds.
///
/// The wrapper is transparent: it reports nothing itself, and its token is the
/// inner rule's token. Nesting conditional rules gives a logical AND of every
/// layer's condition, evaluated outermost first.
#[derive(Debug, Clone)]
pub struct ConditionalFieldRule {
    condition: Arc<dyn RuleCondition>,
    inner: Arc<dyn FieldRule>,
}

impl ConditionalFieldRule {
    pub fn new(condition: Arc<dyn RuleCondition>, inner: Arc<dyn FieldRule>) -> Self {
        Self { condition, inner }
    }

    pub fn condition(&self) -> &Arc<dyn RuleCondition> {
        &self.condition
    }

    pub fn inner(&self) -> &Arc<dyn FieldRule> {
        &self.inner
    }

    /// The rule at the bottom of any nested conditional layers.
    pub fn innermost(&self) -> &Arc<dyn FieldRule> {
        let mut rule = &self.inner;
        while let Some(conditional) = rule.as_any().downcast_ref::<ConditionalFieldRule>() {
            rule = &conditional.inner;
        }
        rule
    }
}

impl FieldRule for ConditionalFieldRule {
    fn token(&self) -> &MessageToken {
        self.inner.token()
    }

    fn validate(&self, accessor: &Accessor, ctx: &mut ValidationContext<'_>) {
        if self.condition.matches(ctx) {
            self.inner.validate(accessor, ctx);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
