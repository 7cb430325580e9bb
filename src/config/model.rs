//! Rule set definition.

use super::types::*;
use serde::{Deserialize, Serialize};

/// A declarative rule set for one type.
///
/// This struct represents a YAML document such as:
///
/// ```yaml
/// require: [name]
/// properties:
///   - property: email
///     required: true
///     email: true
///     maximum_length: 50
///   - property: password
///     matches: confirm
///     matches_token: passwords_must_match
/// ```
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Properties that are required, registered as one shared registration.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub require: Vec<String>,

    /// Per-property rules, applied in listed order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyRules>,
}

/// Rules for one property.
///
/// Rules are registered in a fixed order regardless of field order in the
/// YAML: required, email, minimum_length, maximum_length, range_length,
/// min_value, max_value, greater_than_zero, greater_or_equal_to_zero,
/// pattern, matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyRules {
    /// Property path on the target type (dotted for nested properties).
    pub property: String,

    // =========================================================================
    // Presence and format
    // =========================================================================
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub email: bool,

    // =========================================================================
    // Length
    // =========================================================================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_length: Option<LengthRange>,

    // =========================================================================
    // Numeric bounds
    // =========================================================================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    #[serde(skip_serializing_if = "is_false")]
    pub greater_than_zero: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub greater_or_equal_to_zero: bool,

    // =========================================================================
    // Pattern
    // =========================================================================
    /// Regex the value must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Token reported when `pattern` fails (default: `regex`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_token: Option<String>,

    // =========================================================================
    // Equality
    // =========================================================================
    /// Another property whose value this one must equal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<String>,

    /// Token reported when `matches` fails (default: `field_equality`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches_token: Option<String>,

    /// Property flagged when `matches` fails (default: this property).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_errors_on: Option<String>,
}

impl PropertyRules {
    /// An empty rule list for `property`.
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            ..Default::default()
        }
    }
}
