//! Evaluation state handed to rules and conditions.
//!
//! The execution engine that walks a [`ValidationGraph`](crate::graph::ValidationGraph)
//! lives outside this crate. It builds one [`ValidationContext`] per target
//! instance and passes it to every rule; rules report failures into the
//! context's [`Notification`].

use crate::accessor::{Accessor, TypeKey};
use crate::error::{Result, RulesError};
use crate::tokens::MessageToken;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The property the failure is reported on.
    pub accessor: Accessor,
    /// Key of the message describing the failure.
    pub token: MessageToken,
}

/// Violations collected while validating one instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Notification {
    violations: Vec<Violation>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations reported on one property, in report order.
    pub fn violations_for<'a>(
        &'a self,
        accessor: &'a Accessor,
    ) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| &v.accessor == accessor)
    }

    pub fn register(&mut self, accessor: Accessor, token: MessageToken) {
        self.violations.push(Violation { accessor, token });
    }
}

/// Per-instance evaluation state.
pub struct ValidationContext<'a> {
    target: &'a dyn Any,
    target_type: TypeKey,
    snapshot: Value,
    notification: Notification,
}

impl<'a> ValidationContext<'a> {
    /// Build a context for `target`.
    ///
    /// The target is serialized once into a `serde_json::Value`; rules read
    /// field values from that snapshot through their accessor.
    ///
    /// # Returns
    ///
    /// * `Ok(ValidationContext)` - Ready for rule evaluation
    /// * `Err(RulesError::SnapshotError)` - If the target cannot be serialized
    pub fn new<T: Serialize + 'static>(target: &'a T) -> Result<Self> {
        let snapshot = serde_json::to_value(target)
            .map_err(|e| RulesError::SnapshotError(e.to_string()))?;

        Ok(Self {
            target,
            target_type: TypeKey::of::<T>(),
            snapshot,
            notification: Notification::new(),
        })
    }

    /// The target instance, if it is a `T`.
    pub fn target<T: 'static>(&self) -> Option<&'a T> {
        self.target.downcast_ref::<T>()
    }

    pub fn target_type(&self) -> TypeKey {
        self.target_type
    }

    pub fn snapshot(&self) -> &Value {
        &self.snapshot
    }

    /// Current value of a property on the target.
    ///
    /// A property that is absent from the snapshot yields `None`.
    pub fn value_of(&self, accessor: &Accessor) -> Option<&Value> {
        accessor.value_in(&self.snapshot)
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    /// Record a failure.
    pub fn report(&mut self, accessor: &Accessor, token: &MessageToken) {
        tracing::trace!(accessor = %accessor, token = %token, "rule failed");
        self.notification.register(accessor.clone(), token.clone());
    }

    /// Finish evaluation and hand back the collected violations.
    pub fn into_notification(self) -> Notification {
        self.notification
    }
}

impl std::fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("target_type", &self.target_type)
            .field("snapshot", &self.snapshot)
            .field("notification", &self.notification)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens;
    use serde_json::json;

    #[derive(Serialize)]
    struct Person {
        name: String,
        age: u32,
    }

    #[test]
    fn test_context_exposes_typed_target_and_snapshot() {
        let person = Person {
            name: "Ada".to_string(),
            age: 36,
        };
        let ctx = ValidationContext::new(&person).unwrap();

        assert_eq!(ctx.target::<Person>().map(|p| p.age), Some(36));
        assert!(ctx.target::<String>().is_none());
        assert_eq!(ctx.target_type(), TypeKey::of::<Person>());
        assert_eq!(
            ctx.value_of(&Accessor::new::<Person>("name")),
            Some(&json!("Ada"))
        );
    }

    #[test]
    fn test_report_collects_violations_in_order() {
        let person = Person {
            name: String::new(),
            age: 0,
        };
        let name = Accessor::new::<Person>("name");
        let age = Accessor::new::<Person>("age");

        let mut ctx = ValidationContext::new(&person).unwrap();
        assert!(ctx.notification().is_valid());

        ctx.report(&name, &tokens::REQUIRED);
        ctx.report(&age, &tokens::GREATER_THAN_ZERO);
        ctx.report(&name, &tokens::MINIMUM_LENGTH);

        let notification = ctx.into_notification();
        assert!(!notification.is_valid());
        assert_eq!(notification.violations().len(), 3);

        let on_name: Vec<_> = notification.violations_for(&name).map(|v| &v.token).collect();
        assert_eq!(on_name, vec![&tokens::REQUIRED, &tokens::MINIMUM_LENGTH]);
    }

    #[test]
    fn test_snapshot_failure_is_reported() {
        use std::collections::HashMap;

        let mut bad: HashMap<(u8, u8), u8> = HashMap::new();
        bad.insert((1, 2), 3);

        let err = ValidationContext::new(&bad).unwrap_err();
        assert!(matches!(err, RulesError::SnapshotError(_)));
    }
}
