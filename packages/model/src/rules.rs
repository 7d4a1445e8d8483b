//! Per-field validation rules.
//!
//! The regex pattern is compiled when it is assigned, not when it is first
//! evaluated, so a bad pattern fails at edit time instead of at fill time.

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A validation pattern failed to compile.
#[derive(Error, Debug)]
#[error("invalid regex pattern '{pattern}': {source}")]
pub struct RegexCompileError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Validation rules attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRules {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Custom pattern. Set through [`ValidationRules::set_pattern`] so it is
    /// known to compile; deserialization applies the same check.
    #[serde(deserialize_with = "compiled_pattern")]
    pattern: Option<String>,
    pub custom_message: Option<String>,
    pub email: bool,
    pub url: bool,
    pub phone: bool,
    pub credit_card: bool,
}

impl ValidationRules {
    /// Rules that require a value and nothing else.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Assign a custom pattern, compiling it eagerly.
    pub fn set_pattern(&mut self, pattern: impl Into<String>) -> Result<(), RegexCompileError> {
        let pattern = pattern.into();
        if let Err(source) = regex::Regex::new(&pattern) {
            return Err(RegexCompileError { pattern, source });
        }
        self.pattern = Some(pattern);
        Ok(())
    }

    /// Builder form of [`set_pattern`](Self::set_pattern).
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Result<Self, RegexCompileError> {
        self.set_pattern(pattern)?;
        Ok(self)
    }

    pub fn clear_pattern(&mut self) {
        self.pattern = None;
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }
}

/// Every route into `pattern` compiles it first; stored documents with a bad
/// pattern are rejected at load time, not at fill time.
fn compiled_pattern<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let pattern = Option::<String>::deserialize(deserializer)?;
    if let Some(p) = &pattern {
        regex::Regex::new(p)
            .map_err(|e| de::Error::custom(format!("invalid regex pattern '{}': {}", p, e)))?;
    }
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_pattern_is_accepted() {
        let rules = ValidationRules::default()
            .with_pattern(r"^\d{5}$")
            .unwrap();
        assert_eq!(rules.pattern(), Some(r"^\d{5}$"));
    }

    #[test]
    fn test_invalid_pattern_fails_at_assignment() {
        let err = ValidationRules::default()
            .with_pattern("([unclosed")
            .unwrap_err();
        assert_eq!(err.pattern, "([unclosed");
    }

    #[test]
    fn test_clear_pattern() {
        let mut rules = ValidationRules::default().with_pattern("a+").unwrap();
        rules.clear_pattern();
        assert_eq!(rules.pattern(), None);
    }

    #[test]
    fn test_deserialization_rejects_uncompilable_patterns() {
        let err = serde_json::from_str::<ValidationRules>(r#"{"pattern": "([unclosed"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid regex pattern"));

        let rules: ValidationRules =
            serde_json::from_str(r#"{"pattern": "^\\d{5}$"}"#).unwrap();
        assert_eq!(rules.pattern(), Some(r"^\d{5}$"));
    }

    #[test]
    fn test_serde_round_trip() {
        let rules = ValidationRules {
            required: true,
            min_length: Some(2),
            max_length: Some(10),
            ..ValidationRules::default()
        };
        let json = serde_json::to_string(&rules).unwrap();
        let back: ValidationRules = serde_json::from_str(&json).unwrap();
        assert_eq!(rules, back);
    }
}
