//! Class rules: validation bound to a whole instance.

use crate::accessor::TypeKey;
use crate::context::ValidationContext;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Validation logic scoped to an entire instance rather than one field.
pub trait ClassRule: Send + Sync + fmt::Debug {
    fn validate(&self, ctx: &mut ValidationContext<'_>);

    /// Concrete rule, for introspection.
    fn as_any(&self) -> &dyn Any;
}

/// Supplies class rules for the types it knows about.
pub trait ClassRuleSource: Send + Sync {
    /// Rules that apply to exactly `target`. Unknown types yield nothing.
    fn rules_for(&self, target: TypeKey) -> Vec<Arc<dyn ClassRule>>;
}

/// Class rules collected for one type.
///
/// Lookups match the type exactly; no other type ever sees these rules. The
/// set is shared through `Arc`, so a graph holding it sees rules pushed after
/// it was registered.
pub struct ClassRuleSet<T> {
    rules: RwLock<Vec<Arc<dyn ClassRule>>>,
    _target: PhantomData<fn() -> T>,
}

impl<T: 'static> ClassRuleSet<T> {
    pub fn new(rules: Vec<Arc<dyn ClassRule>>) -> Self {
        Self {
            rules: RwLock::new(rules),
            _target: PhantomData,
        }
    }

    /// Append a rule. Duplicates are kept.
    pub fn push(&self, rule: Arc<dyn ClassRule>) {
        self.write().push(rule);
    }

    /// The rules currently in the set, in insertion order.
    pub fn rules(&self) -> Vec<Arc<dyn ClassRule>> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<dyn ClassRule>>> {
        self.rules.read().unwrap_or_else(|poison| poison.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<dyn ClassRule>>> {
        self.rules.write().unwrap_or_else(|poison| poison.into_inner())
    }
}

impl<T: 'static> Default for ClassRuleSet<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: 'static> ClassRuleSource for ClassRuleSet<T> {
    fn rules_for(&self, target: TypeKey) -> Vec<Arc<dyn ClassRule>> {
        if target == TypeKey::of::<T>() {
            self.rules()
        } else {
            Vec::new()
        }
    }
}

impl<T> fmt::Debug for ClassRuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRuleSet")
            .field("target", &std::any::type_name::<T>())
            .field("rules", &self.rules)
            .finish()
    }
}
