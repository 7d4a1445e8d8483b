//! Conditional logic attached to fields, sections and pages.
//!
//! A rule set is an ordered list of atomic conditions combined strictly
//! left-to-right by each condition's trailing logical operator. There is no
//! precedence grouping; evaluation semantics live in the evaluator crate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operator of one atomic condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    IsEmpty,
    IsNotEmpty,
}

/// Combines a condition with the *next* condition in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    And,
    Or,
}

/// What happens when the condition chain is satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionalAction {
    Show,
    Hide,
    Require,
    Disable,
    SkipToSection,
}

/// One atomic condition against another field's current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Field whose value is inspected. Must exist in the same document;
    /// a dangling reference is a data-quality warning, not a crash.
    pub field_id: String,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub value: Value,
    /// Operator joining this condition with the next one. Ignored on the
    /// last condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_operator: Option<LogicalOperator>,
}

impl Condition {
    pub fn new(field_id: impl Into<String>, operator: ConditionOperator, value: Value) -> Self {
        Self {
            field_id: field_id.into(),
            operator,
            value,
            logical_operator: None,
        }
    }

    pub fn and(mut self) -> Self {
        self.logical_operator = Some(LogicalOperator::And);
        self
    }

    pub fn or(mut self) -> Self {
        self.logical_operator = Some(LogicalOperator::Or);
        self
    }
}

/// Conditional rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRules {
    pub enabled: bool,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    pub action: ConditionalAction,
    /// Target of a `skip_to_section` action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_section_id: Option<String>,
}

impl ConditionalRules {
    /// Rules for the given action, enabled, with the given condition chain.
    pub fn new(action: ConditionalAction, conditions: Vec<Condition>) -> Self {
        Self {
            enabled: true,
            conditions,
            action,
            target_section_id: None,
        }
    }

    /// Ids of every field referenced by the condition chain.
    pub fn referenced_field_ids(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().map(|c| c.field_id.as_str())
    }
}

impl Default for ConditionalRules {
    fn default() -> Self {
        Self {
            enabled: false,
            conditions: Vec::new(),
            action: ConditionalAction::Show,
            target_section_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_disabled() {
        let rules = ConditionalRules::default();
        assert!(!rules.enabled);
        assert!(rules.conditions.is_empty());
    }

    #[test]
    fn test_operator_wire_names() {
        let json = serde_json::to_string(&ConditionOperator::IsNotEmpty).unwrap();
        assert_eq!(json, "\"is_not_empty\"");
        let json = serde_json::to_string(&LogicalOperator::And).unwrap();
        assert_eq!(json, "\"AND\"");
        let json = serde_json::to_string(&ConditionalAction::SkipToSection).unwrap();
        assert_eq!(json, "\"skip_to_section\"");
    }

    #[test]
    fn test_referenced_field_ids() {
        let rules = ConditionalRules::new(
            ConditionalAction::Show,
            vec![
                Condition::new("a", ConditionOperator::Equals, json!("yes")).and(),
                Condition::new("b", ConditionOperator::IsNotEmpty, Value::Null),
            ],
        );
        let ids: Vec<_> = rules.referenced_field_ids().collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
