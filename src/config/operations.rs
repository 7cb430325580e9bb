//! Rule set loading, validation, and application.

use super::model::{PropertyRules, RulesConfig};
use crate::builder::ClassValidationRules;
use crate::error::{Result, RulesError};
use regex::Regex;
use std::path::Path;

impl RulesConfig {
    /// Load a rule set from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the rules YAML file
    ///
    /// # Returns
    ///
    /// * `Ok(RulesConfig)` - Successfully loaded and validated rule set
    /// * `Err(RulesError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            RulesError::ConfigError(format!(
                "failed to read rules file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a rule set from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: RulesConfig = serde_yaml::from_str(yaml)
            .map_err(|e| RulesError::ConfigError(format!("failed to parse rules YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize the rule set to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            RulesError::ConfigError(format!("failed to serialize rules to YAML: {}", e))
        })
    }

    /// Validate the rule set and return an error on the first invalid entry.
    ///
    /// Validation rules:
    /// - `require` entries and `property` names must be non-empty
    /// - `range_length.min` must not exceed `range_length.max`
    /// - `min_value` must not exceed `max_value`
    /// - `pattern` must compile
    /// - `pattern_token` needs `pattern`; `matches_token` and `report_errors_on` need `matches`
    pub fn validate(&self) -> Result<()> {
        if self.require.iter().any(|p| p.trim().is_empty()) {
            return Err(RulesError::ConfigError(
                "rules validation failed: require entries must be non-empty".to_string(),
            ));
        }

        for (index, rules) in self.properties.iter().enumerate() {
            validate_property(index, rules)?;
        }

        Ok(())
    }

    /// Register every rule in this set on `rules`.
    ///
    /// The set is validated first; nothing is registered if validation fails.
    ///
    /// # Example
    ///
    /// ```
    /// use classrules::builder::ClassValidationRules;
    /// use classrules::config::RulesConfig;
    ///
    /// struct Person;
    ///
    /// let config = RulesConfig::from_yaml(r#"
    /// properties:
    ///   - property: email
    ///     required: true
    ///     email: true
    /// "#)?;
    ///
    /// let mut rules = ClassValidationRules::<Person>::new();
    /// config.apply(&mut rules)?;
    /// assert_eq!(rules.pending().len(), 2);
    /// # Ok::<(), classrules::error::RulesError>(())
    /// ```
    pub fn apply<T: 'static>(&self, rules: &mut ClassValidationRules<T>) -> Result<()> {
        self.validate()?;

        if !self.require.is_empty() {
            let required: Vec<&str> = self.require.iter().map(String::as_str).collect();
            rules.require(&required);
        }

        for entry in &self.properties {
            apply_property(entry, rules)?;
        }

        tracing::debug!(
            target_type = std::any::type_name::<T>(),
            required = self.require.len(),
            properties = self.properties.len(),
            "applied rule set"
        );
        Ok(())
    }
}

fn validate_property(index: usize, rules: &PropertyRules) -> Result<()> {
    let fail = |message: String| -> Result<()> {
        Err(RulesError::ConfigError(format!(
            "rules validation failed: {}",
            message
        )))
    };

    if rules.property.trim().is_empty() {
        return fail(format!("properties[{}] is missing a property name", index));
    }
    let name = &rules.property;

    if let Some(range) = rules.range_length
        && range.min > range.max
    {
        return fail(format!(
            "'{}' range_length min ({}) is greater than max ({})",
            name, range.min, range.max
        ));
    }

    if let (Some(min), Some(max)) = (rules.min_value, rules.max_value)
        && min > max
    {
        return fail(format!(
            "'{}' min_value ({}) is greater than max_value ({})",
            name, min, max
        ));
    }

    match &rules.pattern {
        Some(pattern) => {
            if let Err(e) = Regex::new(pattern) {
                return fail(format!(
                    "'{}' has an invalid pattern '{}' - {}",
                    name, pattern, e
                ));
            }
        }
        None if rules.pattern_token.is_some() => {
            return fail(format!("'{}' sets pattern_token without a pattern", name));
        }
        None => {}
    }

    if rules.matches.is_none()
        && (rules.matches_token.is_some() || rules.report_errors_on.is_some())
    {
        return fail(format!(
            "'{}' sets matches_token or report_errors_on without matches",
            name
        ));
    }

    Ok(())
}

fn apply_property<T: 'static>(
    entry: &PropertyRules,
    rules: &mut ClassValidationRules<T>,
) -> Result<()> {
    let mut property = rules.property(&entry.property);

    if entry.required {
        property.required();
    }
    if entry.email {
        property.email();
    }
    if let Some(length) = entry.minimum_length {
        property.minimum_length(length);
    }
    if let Some(length) = entry.maximum_length {
        property.maximum_length(length);
    }
    if let Some(range) = entry.range_length {
        property.range_length(range.min, range.max)?;
    }
    if let Some(bound) = entry.min_value {
        property.min_value(bound);
    }
    if let Some(bound) = entry.max_value {
        property.max_value(bound);
    }
    if entry.greater_than_zero {
        property.greater_than_zero();
    }
    if entry.greater_or_equal_to_zero {
        property.greater_or_equal_to_zero();
    }
    if let Some(pattern) = &entry.pattern {
        match &entry.pattern_token {
            Some(token) => property.reg_ex_with_token(pattern, token.as_str())?,
            None => property.reg_ex(pattern)?,
        };
    }
    if let Some(other) = &entry.matches {
        let mut equality = property.matches(other);
        if let Some(token) = &entry.matches_token {
            equality.use_token(token.as_str());
        }
        if let Some(target) = &entry.report_errors_on {
            equality.report_errors_on(target);
        }
    }

    Ok(())
}
