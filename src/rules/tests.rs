//! Tests for rule and condition evaluation.

use super::*;
use crate::accessor::{Accessor, TypeKey};
use crate::context::{Notification, ValidationContext};
use crate::tokens::{self, MessageToken};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

// =========================================================================
// Helper functions
// =========================================================================

#[derive(Serialize)]
struct Person {
    name: Option<String>,
    email: String,
    age: i64,
    password: String,
    confirm: String,
}

fn person() -> Person {
    Person {
        name: Some("Ada".to_string()),
        email: "ada@example.com".to_string(),
        age: 36,
        password: "secret".to_string(),
        confirm: "secret".to_string(),
    }
}

fn accessor(path: &str) -> Accessor {
    Accessor::new::<Person>(path)
}

/// Run one field rule against `target.path` and return the tokens reported.
fn run_field<T: Serialize + 'static>(rule: &dyn FieldRule, target: &T, path: &str) -> Vec<String> {
    let mut ctx = ValidationContext::new(target).unwrap();
    rule.validate(&Accessor::new::<T>(path), &mut ctx);
    tokens_of(&ctx.into_notification())
}

/// Run a rule against a single JSON value stored under `value`.
fn run_value(rule: &dyn FieldRule, value: Value) -> Vec<String> {
    run_field(rule, &json!({ "value": value }), "value")
}

fn tokens_of(notification: &Notification) -> Vec<String> {
    notification
        .violations()
        .iter()
        .map(|v| v.token.key().to_string())
        .collect()
}

#[derive(Debug)]
struct Never;

impl RuleCondition for Never {
    fn matches(&self, _ctx: &ValidationContext<'_>) -> bool {
        false
    }
}

#[derive(Debug)]
struct Always;

impl RuleCondition for Always {
    fn matches(&self, _ctx: &ValidationContext<'_>) -> bool {
        true
    }
}

// =========================================================================
// Built-in field rules
// =========================================================================

#[test]
fn test_required_rejects_missing_and_blank_values() {
    let rule = RequiredFieldRule::new();

    assert_eq!(run_value(&rule, Value::Null), vec!["required"]);
    assert_eq!(run_value(&rule, json!("   ")), vec!["required"]);
    assert_eq!(run_value(&rule, json!([])), vec!["required"]);
    assert!(run_value(&rule, json!("x")).is_empty());
    assert!(run_value(&rule, json!(0)).is_empty());
    assert!(run_value(&rule, json!(false)).is_empty());

    assert_eq!(run_field(&rule, &json!({}), "value"), vec!["required"]);
}

#[test]
fn test_required_on_struct_field() {
    let rule = RequiredFieldRule::new();
    let mut target = person();
    assert!(run_field(&rule, &target, "name").is_empty());

    target.name = None;
    assert_eq!(run_field(&rule, &target, "name"), vec!["required"]);
}

#[test]
fn test_email_accepts_addresses_and_ignores_empty() {
    let rule = EmailFieldRule::new();

    assert!(run_value(&rule, json!("ada@example.com")).is_empty());
    assert!(run_value(&rule, json!("")).is_empty());
    assert!(run_value(&rule, Value::Null).is_empty());
    assert_eq!(run_value(&rule, json!("not-an-email")), vec!["email"]);
    assert_eq!(run_value(&rule, json!("a b@c.com")), vec!["email"]);
}

#[test]
fn test_length_rules_count_chars_and_items() {
    let max = MaximumLengthRule::new(5);
    assert!(run_value(&max, json!("hello")).is_empty());
    assert!(run_value(&max, json!("héllo")).is_empty());
    assert_eq!(run_value(&max, json!("hello!")), vec!["maximum_length"]);
    assert_eq!(run_value(&max, json!([1, 2, 3, 4, 5, 6])), vec!["maximum_length"]);

    let min = MinimumLengthRule::new(3);
    assert_eq!(run_value(&min, json!("ab")), vec!["minimum_length"]);
    assert!(run_value(&min, json!("abc")).is_empty());
    assert!(run_value(&min, Value::Null).is_empty());

    let range = RangeLengthRule::new(2, 4).unwrap();
    assert_eq!(run_value(&range, json!("a")), vec!["range_length"]);
    assert!(run_value(&range, json!("ab")).is_empty());
    assert!(run_value(&range, json!("abcd")).is_empty());
    assert_eq!(run_value(&range, json!("abcde")), vec!["range_length"]);
}

#[test]
fn test_range_length_rejects_inverted_bounds() {
    let err = RangeLengthRule::new(5, 2).unwrap_err();
    assert!(matches!(err, crate::error::RulesError::InvalidRule(_)));
    assert!(err.to_string().contains("min (5) is greater than max (2)"));

    let single = RangeLengthRule::new(3, 3).unwrap();
    assert!(run_value(&single, json!("abc")).is_empty());
}

#[test]
fn test_value_bounds_accept_any_numeric_type() {
    assert_eq!(MinValueFieldRule::new(18i64).bound(), 18.0);
    assert_eq!(MinValueFieldRule::new(7usize).bound(), 7.0);
    assert_eq!(MaxValueFieldRule::new(u64::from(u32::MAX)).bound(), 4_294_967_295.0);
    assert_eq!(MaxValueFieldRule::new(-2.5f32).bound(), -2.5);

    let max = MaxValueFieldRule::new(10u64);
    assert_eq!(run_value(&max, json!(11)), vec!["max_value"]);
}

#[test]
fn test_value_bounds_are_inclusive() {
    let min = MinValueFieldRule::new(18);
    assert!(run_value(&min, json!(18)).is_empty());
    assert_eq!(run_value(&min, json!(17.5)), vec!["min_value"]);
    assert_eq!(run_value(&min, json!("12")), vec!["min_value"]);

    let max = MaxValueFieldRule::new(100);
    assert!(run_value(&max, json!(100)).is_empty());
    assert_eq!(run_value(&max, json!(101)), vec!["max_value"]);
    assert!(run_value(&max, json!("not a number")).is_empty());
}

#[test]
fn test_zero_bound_rules() {
    let positive = GreaterThanZeroRule::new();
    assert_eq!(run_value(&positive, json!(0)), vec!["greater_than_zero"]);
    assert_eq!(run_value(&positive, json!(-3)), vec!["greater_than_zero"]);
    assert!(run_value(&positive, json!(0.01)).is_empty());

    let non_negative = GreaterOrEqualToZeroRule::new();
    assert!(run_value(&non_negative, json!(0)).is_empty());
    assert_eq!(
        run_value(&non_negative, json!(-1)),
        vec!["greater_or_equal_to_zero"]
    );
}

#[test]
fn test_regex_rule_matches_non_empty_strings() {
    let rule = RegularExpressionFieldRule::new(r"^[A-Z]{3}$").unwrap();
    assert_eq!(rule.pattern(), r"^[A-Z]{3}$");

    assert!(run_value(&rule, json!("ABC")).is_empty());
    assert!(run_value(&rule, json!("")).is_empty());
    assert_eq!(run_value(&rule, json!("abc")), vec!["regex"]);
}

#[test]
fn test_regex_rule_rejects_invalid_pattern() {
    let err = RegularExpressionFieldRule::new("([unclosed").unwrap_err();
    assert!(matches!(err, crate::error::RulesError::InvalidRule(_)));
    assert!(err.to_string().contains("([unclosed"));
}

#[test]
fn test_token_override() {
    let rule = MaximumLengthRule::new(2).with_token("too_long_for_code");
    assert_eq!(rule.token(), &MessageToken::new("too_long_for_code"));
    assert_eq!(run_value(&rule, json!("abc")), vec!["too_long_for_code"]);
}

// =========================================================================
// Conditions
// =========================================================================

#[test]
fn test_conditional_rule_short_circuits() {
    let inner: Arc<dyn FieldRule> = Arc::new(RequiredFieldRule::new());

    let skipped = ConditionalFieldRule::new(Arc::new(Never), inner.clone());
    assert!(run_value(&skipped, Value::Null).is_empty());

    let fired = ConditionalFieldRule::new(Arc::new(Always), inner);
    assert_eq!(run_value(&fired, Value::Null), vec!["required"]);
}

#[test]
fn test_nested_conditions_require_every_layer() {
    fn layered(
        a: Arc<dyn RuleCondition>,
        b: Arc<dyn RuleCondition>,
        inner: &Arc<dyn FieldRule>,
    ) -> ConditionalFieldRule {
        let first: Arc<dyn FieldRule> = Arc::new(ConditionalFieldRule::new(a, inner.clone()));
        ConditionalFieldRule::new(b, first)
    }

    let inner: Arc<dyn FieldRule> = Arc::new(RequiredFieldRule::new());

    assert_eq!(
        run_value(&layered(Arc::new(Always), Arc::new(Always), &inner), Value::Null),
        vec!["required"]
    );
    assert!(run_value(&layered(Arc::new(Never), Arc::new(Always), &inner), Value::Null).is_empty());
    assert!(run_value(&layered(Arc::new(Always), Arc::new(Never), &inner), Value::Null).is_empty());

    let nested = layered(Arc::new(Always), Arc::new(Always), &inner);
    assert_eq!(nested.token(), &tokens::REQUIRED);
    assert!(Arc::ptr_eq(nested.innermost(), &inner));
}

#[test]
fn test_target_condition_reads_instance() {
    let adults_only = FieldRuleCondition::for_target(|p: &Person| p.age >= 18);

    let adult = person();
    let ctx = ValidationContext::new(&adult).unwrap();
    assert!(adults_only.matches(&ctx));

    let child = Person { age: 9, ..person() };
    let ctx = ValidationContext::new(&child).unwrap();
    assert!(!adults_only.matches(&ctx));
}

#[test]
fn test_target_condition_is_false_for_other_types() {
    let condition = FieldRuleCondition::for_target(|_: &Person| true);
    let other = json!({ "age": 40 });
    let ctx = ValidationContext::new(&other).unwrap();
    assert!(!condition.matches(&ctx));
}

#[test]
fn test_context_condition_sees_notification() {
    let clean_adult = FieldRuleCondition::for_context(|p: &Person, ctx| {
        p.age >= 18 && ctx.notification().is_valid()
    });

    let target = person();
    let mut ctx = ValidationContext::new(&target).unwrap();
    assert!(clean_adult.matches(&ctx));

    ctx.report(&accessor("email"), &tokens::EMAIL);
    assert!(!clean_adult.matches(&ctx));
}

#[test]
fn test_is_valid_condition() {
    let target = person();
    let mut ctx = ValidationContext::new(&target).unwrap();
    assert!(IsValid.matches(&ctx));

    ctx.report(&accessor("name"), &tokens::REQUIRED);
    assert!(!IsValid.matches(&ctx));
}

// =========================================================================
// Class rules
// =========================================================================

#[test]
fn test_field_equality_reports_on_first_property_by_default() {
    let rule = FieldEqualityRule::new(accessor("password"), accessor("confirm"));

    let matching = person();
    let mut ctx = ValidationContext::new(&matching).unwrap();
    rule.validate(&mut ctx);
    assert!(ctx.notification().is_valid());

    let mismatched = Person {
        confirm: "other".to_string(),
        ..person()
    };
    let mut ctx = ValidationContext::new(&mismatched).unwrap();
    rule.validate(&mut ctx);

    let notification = ctx.into_notification();
    assert_eq!(notification.violations().len(), 1);
    assert_eq!(notification.violations()[0].accessor, accessor("password"));
    assert_eq!(notification.violations()[0].token, tokens::FIELD_EQUALITY);
}

#[test]
fn test_field_equality_settings_are_adjustable() {
    let rule = FieldEqualityRule::new(accessor("password"), accessor("confirm"));
    rule.set_token(MessageToken::new("passwords_must_match"));
    rule.set_report_on(accessor("confirm"));

    let mismatched = Person {
        confirm: "other".to_string(),
        ..person()
    };
    let mut ctx = ValidationContext::new(&mismatched).unwrap();
    rule.validate(&mut ctx);

    let notification = ctx.into_notification();
    assert_eq!(notification.violations()[0].accessor, accessor("confirm"));
    assert_eq!(notification.violations()[0].token.key(), "passwords_must_match");
}

#[test]
fn test_field_equality_treats_missing_as_null() {
    let rule = FieldEqualityRule::new(
        Accessor::new::<Value>("first"),
        Accessor::new::<Value>("second"),
    );

    let run = |target: Value| {
        let mut ctx = ValidationContext::new(&target).unwrap();
        rule.validate(&mut ctx);
        tokens_of(&ctx.into_notification())
    };

    assert!(run(json!({ "first": null })).is_empty());
    assert!(run(json!({})).is_empty());
    assert_eq!(run(json!({ "second": "x" })), vec!["field_equality"]);
}

#[test]
fn test_class_rule_set_sees_rules_pushed_later() {
    let set = ClassRuleSet::<Person>::default();
    assert!(set.is_empty());

    set.push(Arc::new(FieldEqualityRule::new(
        accessor("password"),
        accessor("confirm"),
    )));

    assert_eq!(set.len(), 1);
    assert_eq!(set.rules_for(TypeKey::of::<Person>()).len(), 1);
}

#[test]
fn test_class_rule_set_matches_exact_type_only() {
    let rules: Vec<Arc<dyn ClassRule>> = vec![Arc::new(FieldEqualityRule::new(
        accessor("password"),
        accessor("confirm"),
    ))];
    let set = ClassRuleSet::<Person>::new(rules);

    assert_eq!(set.rules_for(TypeKey::of::<Person>()).len(), 1);
    assert!(set.rules_for(TypeKey::of::<String>()).is_empty());
}
