//! Rule conditions: predicates that gate whether a rule runs.

use crate::context::ValidationContext;
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Predicate evaluated against the target being validated.
///
/// Conditions are stateless and shared through `Arc`, so one instance can gate
/// rules on several properties.
pub trait RuleCondition: Send + Sync + fmt::Debug {
    fn matches(&self, ctx: &ValidationContext<'_>) -> bool;
}

/// Holds when nothing has been reported for the target so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsValid;

impl RuleCondition for IsValid {
    fn matches(&self, ctx: &ValidationContext<'_>) -> bool {
        ctx.notification().is_valid()
    }
}

/// Adapters turning closures into [`RuleCondition`]s.
///
/// A closure condition written for `T` never holds when the context's target
/// is some other type.
///
/// # Example
///
/// ```
/// use classrules::rules::FieldRuleCondition;
///
/// struct Order { express: bool }
///
/// let express_only = FieldRuleCondition::for_target(|o: &Order| o.express);
/// ```
pub struct FieldRuleCondition;

impl FieldRuleCondition {
    /// Condition on the target instance alone.
    pub fn for_target<T, F>(predicate: F) -> Arc<dyn RuleCondition>
    where
        T: 'static,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Arc::new(TargetCondition {
            predicate,
            _target: PhantomData,
        })
    }

    /// Condition on the target instance and the validation state so far.
    pub fn for_context<T, F>(predicate: F) -> Arc<dyn RuleCondition>
    where
        T: 'static,
        F: Fn(&T, &ValidationContext<'_>) -> bool + Send + Sync + 'static,
    {
        Arc::new(ContextCondition {
            predicate,
            _target: PhantomData,
        })
    }
}

struct TargetCondition<T, F> {
    predicate: F,
    _target: PhantomData<fn(&T)>,
}

impl<T, F> RuleCondition for TargetCondition<T, F>
where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    fn matches(&self, ctx: &ValidationContext<'_>) -> bool {
        ctx.target::<T>().is_some_and(|target| (self.predicate)(target))
    }
}

impl<T, F> fmt::Debug for TargetCondition<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetCondition<{}>", type_name::<T>())
    }
}

struct ContextCondition<T, F> {
    predicate: F,
    _target: PhantomData<fn(&T)>,
}

impl<T, F> RuleCondition for ContextCondition<T, F>
where
    T: 'static,
    F: Fn(&T, &ValidationContext<'_>) -> bool + Send + Sync + 'static,
{
    fn matches(&self, ctx: &ValidationContext<'_>) -> bool {
        ctx.target::<T>()
            .is_some_and(|target| (self.predicate)(target, ctx))
    }
}

impl<T, F> fmt::Debug for ContextCondition<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextCondition<{}>", type_name::<T>())
    }
}
