//! Per-field validation.
//!
//! Dispatch order, first match wins:
//!   1. required and empty
//!   2. email format (field type or rule flag)
//!   3. phone format, whitespace stripped
//!   4. minimum length
//!   5. maximum length
//!   6. numeric minimum / maximum
//!   7. custom pattern
//!
//! The engine is timing-agnostic: the caller decides whether it runs on
//! change, on blur, or at submission, per the project settings.

use formcraft_model::Field;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[1-9]\d{0,15}$").unwrap())
}

/// A recoverable per-field validation failure. Never aborts the document.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct FieldError {
    pub field_id: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &Field, message: impl Into<String>) -> Self {
        Self {
            field_id: field.id.clone(),
            message: message.into(),
        }
    }
}

/// Validate one field against a candidate value. `None` means acceptable.
pub fn validate_field(field: &Field, value: &Value) -> Option<FieldError> {
    let rules = &field.validation;
    let text = value_text(value);

    if field.is_required() && is_empty(value) {
        let message = rules
            .custom_message
            .clone()
            .unwrap_or_else(|| format!("{} is required", field.label));
        return Some(FieldError::new(field, message));
    }

    if is_empty(value) {
        return None;
    }

    let wants_email = field.field_type == formcraft_model::FieldType::Email || rules.email;
    if wants_email {
        if let Some(text) = &text {
            if !email_regex().is_match(text) {
                return Some(FieldError::new(field, "Please enter a valid email address"));
            }
        }
    }

    let wants_phone = field.field_type == formcraft_model::FieldType::Phone || rules.phone;
    if wants_phone {
        if let Some(text) = &text {
            let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            if !phone_regex().is_match(&stripped) {
                return Some(FieldError::new(field, "Please enter a valid phone number"));
            }
        }
    }

    if let (Some(min), Some(text)) = (rules.min_length, &text) {
        if text.chars().count() < min {
            return Some(FieldError::new(
                field,
                format!("Minimum length is {} characters", min),
            ));
        }
    }

    if let (Some(max), Some(text)) = (rules.max_length, &text) {
        if text.chars().count() > max {
            return Some(FieldError::new(
                field,
                format!("Maximum length is {} characters", max),
            ));
        }
    }

    if let (Some(min), Some(number)) = (rules.min, as_number(value)) {
        if number < min {
            return Some(FieldError::new(field, format!("Minimum value is {}", min)));
        }
    }

    if let (Some(max), Some(number)) = (rules.max, as_number(value)) {
        if number > max {
            return Some(FieldError::new(field, format!("Maximum value is {}", max)));
        }
    }

    if let (Some(pattern), Some(text)) = (rules.pattern(), &text) {
        // Patterns compile at assignment and at deserialization; one that
        // still fails here is skipped and reported by the document audit.
        if let Ok(regex) = Regex::new(pattern) {
            if !regex.is_match(text) {
                let message = rules
                    .custom_message
                    .clone()
                    .unwrap_or_else(|| "Invalid format".to_string());
                return Some(FieldError::new(field, message));
            }
        }
    }

    None
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Bool(b) => !b,
        _ => false,
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
