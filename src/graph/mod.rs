//! The validation graph shared by every rule builder.
//!
//! The graph is owned by whoever orchestrates startup configuration. Each
//! [`ClassValidationRules`](crate::builder::ClassValidationRules) writes into
//! it once through [`ValidationRegistration::register`], after which the
//! graph is read-only and can be shared behind an `Arc`.

mod registry;


pub use registry::FieldRules;

use crate::accessor::TypeKey;
use crate::rules::{ClassRule, ClassRuleSource};
use std::fmt;
use std::sync::Arc;

/// Something that can publish its rules into a [`ValidationGraph`].
pub trait ValidationRegistration {
    /// Write every pending rule into `graph`.
    ///
    /// Not idempotent: registering twice duplicates every rule.
    fn register(&self, graph: &mut ValidationGraph);
}

/// Registry of all field rules and class-rule sources across all types.
#[derive(Default)]
pub struct ValidationGraph {
    fields: FieldRules,
    sources: Vec<Arc<dyn ClassRuleSource>>,
}

impl ValidationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a batch of registrations, applied in order.
    ///
    /// # Example
    ///
    /// ```
    /// use classrules::builder::ClassValidationRules;
    /// use classrules::graph::{ValidationGraph, ValidationRegistration};
    ///
    /// struct Person;
    /// struct Company;
    ///
    /// let mut people = ClassValidationRules::<Person>::new();
    /// people.property("email").required().email();
    ///
    /// let mut companies = ClassValidationRules::<Company>::new();
    /// companies.require(&["name"]);
    ///
    /// let graph = ValidationGraph::from_registrations([
    ///     &people as &dyn ValidationRegistration,
    ///     &companies,
    /// ]);
    /// assert_eq!(graph.fields().len(), 3);
    /// ```
    pub fn from_registrations<'a>(
        registrations: impl IntoIterator<Item = &'a dyn ValidationRegistration>,
    ) -> Self {
        let mut graph = Self::new();
        for registration in registrations {
            registration.register(&mut graph);
        }
        graph
    }

    pub fn fields(&self) -> &FieldRules {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldRules {
        &mut self.fields
    }

    /// Add a source of class rules. Sources are queried in registration order.
    pub fn register_source(&mut self, source: Arc<dyn ClassRuleSource>) {
        self.sources.push(source);
    }

    /// Class rules from every source for exactly `target`.
    pub fn class_rules_for(&self, target: TypeKey) -> Vec<Arc<dyn ClassRule>> {
        self.sources
            .iter()
            .flat_map(|source| source.rules_for(target))
            .collect()
    }

    /// Class rules for exactly `T`.
    pub fn class_rules_for_type<T: 'static>(&self) -> Vec<Arc<dyn ClassRule>> {
        self.class_rules_for(TypeKey::of::<T>())
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

impl fmt::Debug for ValidationGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationGraph")
            .field("fields", &self.fields)
            .field("sources", &self.sources.len())
            .finish()
    }
}
