//! The field-rule registry.

use crate::accessor::{Accessor, TypeKey};
use crate::rules::FieldRule;
use std::collections::HashMap;
use std::sync::Arc;

/// Field rules keyed by `(owner type, accessor)`.
///
/// Registration appends; the same rule registered twice is kept twice.
/// Rules for one key are returned in registration order.
#[derive(Debug, Default)]
pub struct FieldRules {
    rules: HashMap<(TypeKey, Accessor), Vec<Arc<dyn FieldRule>>>,
    /// Keys in first-registration order.
    order: Vec<(TypeKey, Accessor)>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `rule` for `accessor` on `owner`.
    pub fn register(&mut self, owner: TypeKey, accessor: Accessor, rule: Arc<dyn FieldRule>) {
        tracing::trace!(owner = %owner, accessor = %accessor, rule = ?rule, "registering field rule");

        let key = (owner, accessor);
        match self.rules.get_mut(&key) {
            Some(existing) => existing.push(rule),
            None => {
                self.order.push(key.clone());
                self.rules.insert(key, vec![rule]);
            }
        }
    }

    /// Rules registered for `accessor` on `owner`, in registration order.
    pub fn rules_for(&self, owner: TypeKey, accessor: &Accessor) -> &[Arc<dyn FieldRule>] {
        self.rules
            .get(&(owner, accessor.clone()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Accessors of `owner` that have at least one rule, in first-registration order.
    pub fn accessors_for(&self, owner: TypeKey) -> Vec<&Accessor> {
        self.order
            .iter()
            .filter(|(key_owner, _)| *key_owner == owner)
            .map(|(_, accessor)| accessor)
            .collect()
    }

    /// Every `(owner, accessor, rules)` entry, in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeKey, &Accessor, &[Arc<dyn FieldRule>])> {
        self.order.iter().map(|key| {
            let rules = self.rules.get(key).map(Vec::as_slice).unwrap_or(&[]);
            (key.0, &key.1, rules)
        })
    }

    /// Total number of registered rules across all keys.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
