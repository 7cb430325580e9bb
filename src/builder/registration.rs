//! Pending field-rule registrations.

use crate::accessor::{Accessor, TypeKey};
use crate::context::ValidationContext;
use crate::graph::FieldRules;
use crate::rules::{ConditionalFieldRule, FieldRule, FieldRuleCondition, RuleCondition};
use std::fmt;
use std::sync::Arc;

/// Builds the rule for one accessor.
pub type RuleFactory = Arc<dyn Fn(&Accessor) -> Arc<dyn FieldRule> + Send + Sync>;

/// How a registration produces its rule.
///
/// Built bottom-up by the builder, materialized top-down at finalization.
#[derive(Clone)]
pub enum RuleSource {
    /// One rule instance shared by every accessor.
    Shared(Arc<dyn FieldRule>),
    /// A fresh rule per accessor.
    PerAccessor(RuleFactory),
    /// `inner`, gated by `condition`.
    Conditional {
        condition: Arc<dyn RuleCondition>,
        inner: Box<RuleSource>,
    },
}

impl RuleSource {
    /// Materialize the rule for `accessor`.
    pub fn build(&self, accessor: &Accessor) -> Arc<dyn FieldRule> {
        match self {
            RuleSource::Shared(rule) => rule.clone(),
            RuleSource::PerAccessor(factory) => factory(accessor),
            RuleSource::Conditional { condition, inner } => Arc::new(ConditionalFieldRule::new(
                condition.clone(),
                inner.build(accessor),
            )),
        }
    }

    /// Number of conditional layers wrapped around the base rule.
    pub fn depth(&self) -> usize {
        match self {
            RuleSource::Conditional { inner, .. } => 1 + inner.depth(),
            _ => 0,
        }
    }
}

impl fmt::Debug for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::Shared(rule) => f.debug_tuple("Shared").field(rule).finish(),
            RuleSource::PerAccessor(_) => f.write_str("PerAccessor(..)"),
            RuleSource::Conditional { condition, inner } => f
                .debug_struct("Conditional")
                .field("condition", condition)
                .field("inner", inner)
                .finish(),
        }
    }
}

/// One pending field-rule registration: a rule source and the accessors it
/// applies to.
///
/// Conditions attached with [`when`](Self::when) wrap whatever the source is
/// at that moment, so each call adds one more condition that must hold.
#[derive(Debug, Clone)]
pub struct RuleRegistrationExpression {
    source: RuleSource,
    accessors: Vec<Accessor>,
}

impl RuleRegistrationExpression {
    pub fn new(source: RuleSource, accessors: Vec<Accessor>) -> Self {
        Self { source, accessors }
    }

    /// Register one rule instance for every accessor.
    pub fn shared(rule: Arc<dyn FieldRule>, accessors: Vec<Accessor>) -> Self {
        Self::new(RuleSource::Shared(rule), accessors)
    }

    /// Register a rule built separately for each accessor.
    pub fn per_accessor<F>(factory: F, accessors: Vec<Accessor>) -> Self
    where
        F: Fn(&Accessor) -> Arc<dyn FieldRule> + Send + Sync + 'static,
    {
        Self::new(RuleSource::PerAccessor(Arc::new(factory)), accessors)
    }

    pub fn source(&self) -> &RuleSource {
        &self.source
    }

    pub fn accessors(&self) -> &[Accessor] {
        &self.accessors
    }

    /// Only apply the rule when `condition` holds.
    pub fn when(&mut self, condition: Arc<dyn RuleCondition>) -> &mut Self {
        let inner = self.source.clone();
        self.source = RuleSource::Conditional {
            condition,
            inner: Box::new(inner),
        };
        self
    }

    /// Only apply the rule when a default-constructed `C` holds.
    pub fn when_type<C: RuleCondition + Default + 'static>(&mut self) -> &mut Self {
        self.when(Arc::new(C::default()))
    }

    /// Only apply the rule when `predicate` holds for the target.
    pub fn when_fn<T, F>(&mut self, predicate: F) -> &mut Self
    where
        T: 'static,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.when(FieldRuleCondition::for_target::<T, F>(predicate))
    }

    /// Only apply the rule when `predicate` holds for the target and the
    /// validation state so far.
    pub fn when_ctx<T, F>(&mut self, predicate: F) -> &mut Self
    where
        T: 'static,
        F: Fn(&T, &ValidationContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.when(FieldRuleCondition::for_context::<T, F>(predicate))
    }

    /// Write the rule for every accessor into `registry` under `owner`.
    pub fn register(&self, owner: TypeKey, registry: &mut FieldRules) {
        for accessor in &self.accessors {
            registry.register(owner, accessor.clone(), self.source.build(accessor));
        }
    }
}
