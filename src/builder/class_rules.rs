//! The top-level rule builder for one type.

use super::field::FieldValidationExpression;
use super::registration::RuleRegistrationExpression;
use crate::accessor::{Accessor, TypeKey};
use crate::graph::{ValidationGraph, ValidationRegistration};
use crate::rules::{ClassRule, ClassRuleSet, ClassRuleSource, FieldRule, RequiredFieldRule};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Collects field and class rules for `T` until they are registered into a
/// [`ValidationGraph`].
///
/// The builder is meant for a single configuration thread at startup. It does
/// no locking of its own.
///
/// # Example
///
/// ```
/// use classrules::builder::ClassValidationRules;
/// use classrules::graph::ValidationGraph;
/// use classrules::accessor::{Accessor, TypeKey};
///
/// struct Person;
///
/// let mut rules = ClassValidationRules::<Person>::new();
/// rules.property("email").required().email();
///
/// let mut graph = ValidationGraph::new();
/// rules.register(&mut graph);
///
/// let email = Accessor::new::<Person>("email");
/// assert_eq!(graph.fields().rules_for(TypeKey::of::<Person>(), &email).len(), 2);
/// ```
pub struct ClassValidationRules<T> {
    pending: Vec<RuleRegistrationExpression>,
    class_rules: Arc<ClassRuleSet<T>>,
    _target: PhantomData<fn() -> T>,
}

impl<T: 'static> ClassValidationRules<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            class_rules: Arc::new(ClassRuleSet::new(Vec::new())),
            _target: PhantomData,
        }
    }

    /// Require every listed property.
    ///
    /// All properties share one registration, so a condition attached to the
    /// returned expression gates every one of them. An empty list is a no-op
    /// registration.
    pub fn require(&mut self, properties: &[&str]) -> &mut RuleRegistrationExpression {
        let accessors = properties.iter().map(|p| Accessor::new::<T>(*p)).collect();
        let expression = RuleRegistrationExpression::per_accessor(
            |_| Arc::new(RequiredFieldRule::new()) as Arc<dyn FieldRule>,
            accessors,
        );
        let index = self.push_pending(expression);
        &mut self.pending[index]
    }

    /// Start a chain of rules for one property.
    pub fn property(&mut self, property: &str) -> FieldValidationExpression<'_, T> {
        let accessor = Accessor::new::<T>(property);
        FieldValidationExpression::new(self, accessor)
    }

    /// Add a default-constructed class rule `R`.
    pub fn class_rule<R: ClassRule + Default + 'static>(&mut self) -> &mut Self {
        self.add_class_rule(Arc::new(R::default()))
    }

    /// Add a class rule instance. Duplicates are kept.
    ///
    /// Graphs this builder was already registered into see the new rule.
    pub fn add_class_rule(&mut self, rule: Arc<dyn ClassRule>) -> &mut Self {
        self.class_rules.push(rule);
        self
    }

    /// Pending field registrations, in the order they were added.
    pub fn pending(&self) -> &[RuleRegistrationExpression] {
        &self.pending
    }

    /// Class rules added so far, in insertion order.
    pub fn class_rules(&self) -> Vec<Arc<dyn ClassRule>> {
        self.class_rules.rules()
    }

    /// Resolve every pending registration into `graph.fields_mut()`, then
    /// register this builder's class rules as a source for `T`.
    ///
    /// The source is live: class rules added after this call are visible
    /// through the graph. Field rules are not; they are copied now.
    ///
    /// Call this once. A second call registers every rule again.
    pub fn register(&self, graph: &mut ValidationGraph) {
        let owner = TypeKey::of::<T>();

        for expression in &self.pending {
            expression.register(owner, graph.fields_mut());
        }
        graph.register_source(self.class_rules.clone());

        tracing::debug!(
            owner = %owner,
            registrations = self.pending.len(),
            class_rules = self.class_rules.len(),
            "registered validation rules"
        );
    }

    pub(crate) fn push_pending(&mut self, expression: RuleRegistrationExpression) -> usize {
        self.pending.push(expression);
        self.pending.len() - 1
    }

    pub(crate) fn pending_mut(&mut self, index: usize) -> Option<&mut RuleRegistrationExpression> {
        self.pending.get_mut(index)
    }
}

impl<T: 'static> Default for ClassValidationRules<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ValidationRegistration for ClassValidationRules<T> {
    fn register(&self, graph: &mut ValidationGraph) {
        ClassValidationRules::register(self, graph);
    }
}

impl<T: 'static> ClassRuleSource for ClassValidationRules<T> {
    fn rules_for(&self, target: TypeKey) -> Vec<Arc<dyn ClassRule>> {
        self.class_rules.rules_for(target)
    }
}

impl<T> fmt::Debug for ClassValidationRules<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassValidationRules")
            .field("target", &std::any::type_name::<T>())
            .field("pending", &self.pending)
            .field("class_rules", &self.class_rules)
            .finish()
    }
}
