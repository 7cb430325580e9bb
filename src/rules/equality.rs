//! Field equality: two properties of the same instance must hold equal values.

use super::class::ClassRule;
use crate::accessor::Accessor;
use crate::context::ValidationContext;
use crate::tokens::{self, MessageToken};
use serde_json::Value;
use std::any::Any;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

static NULL: Value = Value::Null;

/// Compares `property1` and `property2` on the target.
///
/// This is a class rule because it needs two fields at once. A missing
/// property reads as `null`, so it equals an explicit `null`. The token and
/// the reporting property stay adjustable after registration, which is what
/// [`FieldEqualityRuleExpression`](crate::builder::FieldEqualityRuleExpression)
/// relies on.
#[derive(Debug)]
pub struct FieldEqualityRule {
    property1: Accessor,
    property2: Accessor,
    settings: RwLock<EqualitySettings>,
}

#[derive(Debug, Clone)]
struct EqualitySettings {
    token: MessageToken,
    report_on: Accessor,
}

impl FieldEqualityRule {
    /// Failures are reported on `property1` with the `field_equality` token
    /// until told otherwise.
    pub fn new(property1: Accessor, property2: Accessor) -> Self {
        let settings = EqualitySettings {
            token: tokens::FIELD_EQUALITY,
            report_on: property1.clone(),
        };
        Self {
            property1,
            property2,
            settings: RwLock::new(settings),
        }
    }

    pub fn property1(&self) -> &Accessor {
        &self.property1
    }

    pub fn property2(&self) -> &Accessor {
        &self.property2
    }

    pub fn token(&self) -> MessageToken {
        self.read().token.clone()
    }

    pub fn set_token(&self, token: MessageToken) {
        self.write().token = token;
    }

    /// The property flagged when the values differ.
    pub fn report_on(&self) -> Accessor {
        self.read().report_on.clone()
    }

    pub fn set_report_on(&self, accessor: Accessor) {
        self.write().report_on = accessor;
    }

    fn read(&self) -> RwLockReadGuard<'_, EqualitySettings> {
        // Settings are plain values; a panic mid-write cannot leave them torn.
        self.settings
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, EqualitySettings> {
        self.settings
            .write()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl ClassRule for FieldEqualityRule {
    fn validate(&self, ctx: &mut ValidationContext<'_>) {
        let value = |accessor| ctx.value_of(accessor).unwrap_or(&NULL);
        let equal = value(&self.property1) == value(&self.property2);
        if !equal {
            let settings = self.read().clone();
            ctx.report(&settings.report_on, &settings.token);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
