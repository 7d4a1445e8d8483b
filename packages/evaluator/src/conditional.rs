//! Conditional rule evaluation.
//!
//! The condition chain is a strict left-fold: the first atom seeds the
//! accumulator, each later atom is joined by the *previous* condition's
//! trailing logical operator. There is no precedence grouping.
//!
//! Missing references fail open, in two distinct ways:
//!
//! * A referenced field with no entry in the values map is *unanswered*: the
//!   atom evaluates against `null`, so `equals` is false and `is_empty` is
//!   true.
//! * A referenced field id that does not exist in the document at all is
//!   *dangling*: [`evaluate_in`] forces that atom to false outright, even
//!   for `is_empty`. The values-only entry points cannot tell the two apart
//!   and treat every missing entry as unanswered.
//!
//! Both cases surface as data-quality warnings, never as errors, so
//! rendering stays resilient to half-built documents.

use formcraft_model::{
    Condition, ConditionOperator, ConditionalAction, ConditionalRules, LogicalOperator, Project,
};
use serde_json::Value;
use std::collections::HashMap;

/// Current respondent input, keyed by field id.
pub type ValueMap = HashMap<String, Value>;

/// The resolved state of a field, section, or page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    pub visible: bool,
    pub required: bool,
    pub disabled: bool,
    /// Set when a `skip_to_section` action fires.
    pub skip_to_section: Option<String>,
}

impl Default for Effect {
    fn default() -> Self {
        Self {
            visible: true,
            required: false,
            disabled: false,
            skip_to_section: None,
        }
    }
}

/// A non-fatal finding made during evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataQualityWarning {
    /// Field id a condition referenced without a matching value.
    pub field_id: String,
}

/// Evaluate a rule set against the current values.
pub fn evaluate(rules: &ConditionalRules, values: &ValueMap) -> Effect {
    evaluate_checked(rules, values).0
}

/// Like [`evaluate`], additionally reporting references with no value entry.
pub fn evaluate_checked(
    rules: &ConditionalRules,
    values: &ValueMap,
) -> (Effect, Vec<DataQualityWarning>) {
    evaluate_core(rules, values, None)
}

/// Evaluate with the owning document at hand. A condition referencing a
/// field id the document does not contain evaluates that atom to false and
/// is reported; an existing field that is merely unanswered still evaluates
/// against `null`.
pub fn evaluate_in(
    project: &Project,
    rules: &ConditionalRules,
    values: &ValueMap,
) -> (Effect, Vec<DataQualityWarning>) {
    evaluate_core(rules, values, Some(project))
}

fn evaluate_core(
    rules: &ConditionalRules,
    values: &ValueMap,
    document: Option<&Project>,
) -> (Effect, Vec<DataQualityWarning>) {
    let mut warnings = Vec::new();
    if !rules.enabled || rules.conditions.is_empty() {
        return (Effect::default(), warnings);
    }

    let mut satisfied = false;
    let mut join: Option<LogicalOperator> = None;
    for (index, condition) in rules.conditions.iter().enumerate() {
        let atom = evaluate_atom(condition, values, document, &mut warnings);
        satisfied = match (index, join) {
            (0, _) => atom,
            (_, Some(LogicalOperator::Or)) => satisfied || atom,
            // A missing trailing operator joins like AND.
            (_, Some(LogicalOperator::And)) | (_, None) => satisfied && atom,
        };
        join = condition.logical_operator;
    }

    let mut effect = Effect::default();
    match rules.action {
        ConditionalAction::Show => effect.visible = satisfied,
        ConditionalAction::Hide => effect.visible = !satisfied,
        ConditionalAction::Require => effect.required = satisfied,
        ConditionalAction::Disable => effect.disabled = satisfied,
        // Fires only on true; on false the implicit next section applies.
        ConditionalAction::SkipToSection => {
            if satisfied {
                effect.skip_to_section = rules.target_section_id.clone();
            }
        }
    }
    (effect, warnings)
}

fn evaluate_atom(
    condition: &Condition,
    values: &ValueMap,
    document: Option<&Project>,
    warnings: &mut Vec<DataQualityWarning>,
) -> bool {
    if let Some(project) = document {
        if project.field(&condition.field_id).is_none() {
            warnings.push(DataQualityWarning {
                field_id: condition.field_id.clone(),
            });
            return false;
        }
    }

    let current = match values.get(&condition.field_id) {
        Some(value) => value,
        None => {
            // Values-only callers cannot tell unanswered from dangling, so
            // every missing entry is worth a warning there.
            if document.is_none() {
                warnings.push(DataQualityWarning {
                    field_id: condition.field_id.clone(),
                });
            }
            &Value::Null
        }
    };

    match condition.operator {
        ConditionOperator::Equals => loosely_equal(current, &condition.value),
        ConditionOperator::NotEquals => !loosely_equal(current, &condition.value),
        ConditionOperator::Contains => contains(current, &condition.value),
        ConditionOperator::GreaterThan => match (as_number(current), as_number(&condition.value)) {
            (Some(left), Some(right)) => left > right,
            _ => false,
        },
        ConditionOperator::LessThan => match (as_number(current), as_number(&condition.value)) {
            (Some(left), Some(right)) => left < right,
            _ => false,
        },
        ConditionOperator::IsEmpty => is_empty(current),
        ConditionOperator::IsNotEmpty => !is_empty(current),
    }
}

/// Strict equality, falling back to string comparison when the types differ.
/// Form inputs arrive as strings even for numeric fields.
fn loosely_equal(left: &Value, right: &Value) -> bool {
    if left == right {
        return true;
    }
    if std::mem::discriminant(left) != std::mem::discriminant(right) {
        return coerce_string(left) == coerce_string(right);
    }
    false
}

/// Substring check for strings, membership check for arrays.
fn contains(haystack: &Value, needle: &Value) -> bool {
    match haystack {
        Value::String(s) => s.contains(&coerce_string(needle)),
        Value::Array(items) => items.iter().any(|item| loosely_equal(item, needle)),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcraft_model::ConditionalAction;
    use serde_json::json;

    fn values(pairs: &[(&str, Value)]) -> ValueMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_disabled_rules_yield_default_effect() {
        let rules = ConditionalRules::default();
        let effect = evaluate(&rules, &ValueMap::new());
        assert_eq!(effect, Effect::default());
    }

    #[test]
    fn test_show_action_and_its_inverse() {
        let rules = ConditionalRules::new(
            ConditionalAction::Show,
            vec![Condition::new("a", ConditionOperator::Equals, json!("yes"))],
        );

        let effect = evaluate(&rules, &values(&[("a", json!("yes"))]));
        assert!(effect.visible);

        let effect = evaluate(&rules, &values(&[("a", json!("no"))]));
        assert!(!effect.visible);

        // Absent value fails open to "not satisfied": hidden.
        let (effect, warnings) = evaluate_checked(&rules, &ValueMap::new());
        assert!(!effect.visible);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field_id, "a");
    }

    #[test]
    fn test_left_fold_has_no_precedence() {
        // a OR b AND c folds as ((a OR b) AND c), strictly left to right.
        let rules = ConditionalRules::new(
            ConditionalAction::Show,
            vec![
                Condition::new("a", ConditionOperator::Equals, json!("x")).or(),
                Condition::new("b", ConditionOperator::Equals, json!("x")).and(),
                Condition::new("c", ConditionOperator::Equals, json!("x")),
            ],
        );

        // a true, c false: (true OR _) AND false = false
        let effect = evaluate(
            &rules,
            &values(&[("a", json!("x")), ("b", json!("x")), ("c", json!("y"))]),
        );
        assert!(!effect.visible);

        // a false, b true, c true: (false OR true) AND true = true
        let effect = evaluate(
            &rules,
            &values(&[("a", json!("y")), ("b", json!("x")), ("c", json!("x"))]),
        );
        assert!(effect.visible);
    }

    #[test]
    fn test_and_chain_with_false_atom_is_false() {
        // is_empty(a) AND equals(b, "yes"): flipping b true cannot rescue
        // the chain while a is non-empty.
        let rules = ConditionalRules::new(
            ConditionalAction::Show,
            vec![
                Condition::new("a", ConditionOperator::IsEmpty, Value::Null).and(),
                Condition::new("b", ConditionOperator::Equals, json!("yes")),
            ],
        );
        let effect = evaluate(
            &rules,
            &values(&[("a", json!("filled")), ("b", json!("yes"))]),
        );
        assert!(!effect.visible);
    }

    #[test]
    fn test_repeated_evaluation_is_deterministic() {
        let rules = ConditionalRules::new(
            ConditionalAction::Hide,
            vec![Condition::new("a", ConditionOperator::GreaterThan, json!(10))],
        );
        let vals = values(&[("a", json!("25"))]);
        let first = evaluate(&rules, &vals);
        for _ in 0..5 {
            assert_eq!(evaluate(&rules, &vals), first);
        }
        assert!(!first.visible);
    }

    #[test]
    fn test_equals_coerces_across_types() {
        let rules = ConditionalRules::new(
            ConditionalAction::Show,
            vec![Condition::new("a", ConditionOperator::Equals, json!(5))],
        );
        // Form inputs arrive as strings.
        let effect = evaluate(&rules, &values(&[("a", json!("5"))]));
        assert!(effect.visible);
    }

    #[test]
    fn test_contains_on_strings_and_arrays() {
        let rules = ConditionalRules::new(
            ConditionalAction::Show,
            vec![Condition::new("a", ConditionOperator::Contains, json!("red"))],
        );
        assert!(evaluate(&rules, &values(&[("a", json!("bright red car"))])).visible);
        assert!(evaluate(&rules, &values(&[("a", json!(["blue", "red"]))])).visible);
        assert!(!evaluate(&rules, &values(&[("a", json!(["blue"]))])).visible);
    }

    #[test]
    fn test_numeric_comparison_rejects_non_numbers() {
        let rules = ConditionalRules::new(
            ConditionalAction::Show,
            vec![Condition::new("a", ConditionOperator::LessThan, json!(3))],
        );
        assert!(!evaluate(&rules, &values(&[("a", json!("soon"))])).visible);
        assert!(evaluate(&rules, &values(&[("a", json!(2))])).visible);
    }

    #[test]
    fn test_skip_fires_only_on_true() {
        let mut rules = ConditionalRules::new(
            ConditionalAction::SkipToSection,
            vec![Condition::new("a", ConditionOperator::Equals, json!("skip"))],
        );
        rules.target_section_id = Some("section-9".to_string());

        let effect = evaluate(&rules, &values(&[("a", json!("skip"))]));
        assert_eq!(effect.skip_to_section.as_deref(), Some("section-9"));
        assert!(effect.visible);

        let effect = evaluate(&rules, &values(&[("a", json!("stay"))]));
        assert_eq!(effect.skip_to_section, None);
        assert!(effect.visible);
    }

    #[test]
    fn test_unanswered_field_counts_as_empty() {
        let rules = ConditionalRules::new(
            ConditionalAction::Show,
            vec![Condition::new("a", ConditionOperator::IsEmpty, Value::Null)],
        );
        assert!(evaluate(&rules, &ValueMap::new()).visible);
        assert!(!evaluate(&rules, &values(&[("a", json!("filled"))])).visible);
    }

    #[test]
    fn test_dangling_document_reference_is_false_even_for_is_empty() {
        use formcraft_model::{Field, FieldType};

        let mut project = formcraft_model::Project::new("Survey");
        let field = Field::new(FieldType::Text, "Known");
        let known_id = field.id.clone();
        project.fields.push(field);

        let rules = ConditionalRules::new(
            ConditionalAction::Show,
            vec![Condition::new(
                "deleted-field",
                ConditionOperator::IsEmpty,
                Value::Null,
            )],
        );

        // The id is not in the document: the atom is false, not "empty".
        let (effect, warnings) = evaluate_in(&project, &rules, &ValueMap::new());
        assert!(!effect.visible);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field_id, "deleted-field");

        // An existing field that is merely unanswered still counts as empty,
        // and is not a data-quality finding.
        let rules = ConditionalRules::new(
            ConditionalAction::Show,
            vec![Condition::new(&known_id, ConditionOperator::IsEmpty, Value::Null)],
        );
        let (effect, warnings) = evaluate_in(&project, &rules, &ValueMap::new());
        assert!(effect.visible);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_require_action() {
        let rules = ConditionalRules::new(
            ConditionalAction::Require,
            vec![Condition::new("a", ConditionOperator::IsNotEmpty, Value::Null)],
        );
        assert!(evaluate(&rules, &values(&[("a", json!("x"))])).required);
        assert!(!evaluate(&rules, &values(&[("a", json!(""))])).required);
    }
}
