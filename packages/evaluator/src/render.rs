//! Render dispatch: which control each field gets and what state it carries.
//!
//! Visual output lives in the compiler crates and the embedding UI; this
//! module only resolves the plan: archetype per field, visibility per
//! conditional rules, error per validation, value per the shared store.

use crate::conditional::{evaluate_in, Effect, ValueMap};
use crate::validation::{validate_field, FieldError};
use formcraft_model::{Field, FieldType, Page, Project, Section};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Control archetypes. Exhaustive over [`FieldType`]; adding a field type
/// without deciding its control is a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlArchetype {
    SingleLineText,
    MultiLineText,
    Numeric,
    Date,
    Time,
    SingleSelect,
    MultiSelect,
    BooleanToggle,
    FileUpload,
    Rating,
    Range,
    Matrix,
    /// Renders content, never collects a value.
    StaticContent,
}

impl ControlArchetype {
    pub fn of(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text
            | FieldType::Email
            | FieldType::Phone
            | FieldType::Location
            | FieldType::Payment => ControlArchetype::SingleLineText,
            FieldType::Textarea => ControlArchetype::MultiLineText,
            FieldType::Number => ControlArchetype::Numeric,
            FieldType::Date => ControlArchetype::Date,
            FieldType::Time => ControlArchetype::Time,
            FieldType::Select | FieldType::Radio => ControlArchetype::SingleSelect,
            FieldType::Checkbox => ControlArchetype::MultiSelect,
            FieldType::Switch => ControlArchetype::BooleanToggle,
            FieldType::File | FieldType::Image => ControlArchetype::FileUpload,
            FieldType::Rating => ControlArchetype::Rating,
            FieldType::Range => ControlArchetype::Range,
            FieldType::Matrix => ControlArchetype::Matrix,
            FieldType::Divider | FieldType::Heading | FieldType::Paragraph | FieldType::Spacer => {
                ControlArchetype::StaticContent
            }
        }
    }

    /// Whether the control collects respondent input.
    pub fn collects_value(&self) -> bool {
        !matches!(self, ControlArchetype::StaticContent)
    }
}

/// One field as it should be rendered right now.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField<'a> {
    pub field: &'a Field,
    pub archetype: ControlArchetype,
    /// Static flag or a firing `require` rule.
    pub required: bool,
    pub disabled: bool,
    pub value: Option<&'a Value>,
    pub error: Option<FieldError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection<'a> {
    pub section: &'a Section,
    /// Fields partitioned by layout column, document order preserved.
    pub columns: Vec<Vec<RenderedField<'a>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage<'a> {
    pub page: &'a Page,
    pub sections: Vec<RenderedSection<'a>>,
}

/// The full render plan: visible pages only, each holding visible sections
/// and fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPlan<'a> {
    pub pages: Vec<RenderedPage<'a>>,
}

fn effect_of(
    project: &Project,
    conditional: Option<&formcraft_model::ConditionalRules>,
    values: &ValueMap,
) -> Effect {
    conditional
        .map(|rules| evaluate_in(project, rules, values).0)
        .unwrap_or_default()
}

/// Resolve the whole document into a render plan. Hidden pages, sections,
/// and fields are skipped entirely, not rendered-then-suppressed.
pub fn resolve_form<'a>(project: &'a Project, values: &'a ValueMap) -> FormPlan<'a> {
    let mut pages = Vec::new();
    for page in project.pages_ordered() {
        if !effect_of(project, page.conditional.as_ref(), values).visible {
            continue;
        }
        let mut sections = Vec::new();
        for section in page.sections_ordered() {
            if !effect_of(project, section.conditional.as_ref(), values).visible {
                continue;
            }
            let columns = section
                .layout
                .columns
                .iter()
                .map(|column| {
                    column
                        .fields
                        .iter()
                        .filter_map(|id| project.field(id))
                        .filter_map(|field| resolve_field(project, field, values))
                        .collect()
                })
                .collect();
            sections.push(RenderedSection { section, columns });
        }
        pages.push(RenderedPage { page, sections });
    }
    FormPlan { pages }
}

fn resolve_field<'a>(
    project: &Project,
    field: &'a Field,
    values: &'a ValueMap,
) -> Option<RenderedField<'a>> {
    let effect = evaluate_in(project, &field.conditional, values).0;
    if !effect.visible {
        return None;
    }
    let archetype = ControlArchetype::of(field.field_type);
    let value = values.get(&field.id);
    let error = if archetype.collects_value() {
        validate_field(field, value.unwrap_or(&Value::Null))
    } else {
        None
    };
    Some(RenderedField {
        field,
        archetype,
        required: field.is_required() || effect.required,
        disabled: effect.disabled,
        value,
        error,
    })
}

/// The values that actually leave the form at submission: entries for
/// visible, value-collecting fields only. A hidden field's stale value never
/// reaches the sink.
pub fn submission_values(project: &Project, values: &ValueMap) -> HashMap<String, Value> {
    let plan = resolve_form(project, values);
    let mut out = HashMap::new();
    for page in &plan.pages {
        for section in &page.sections {
            for field in section.columns.iter().flatten() {
                if !field.archetype.collects_value() {
                    continue;
                }
                if let Some(value) = field.value {
                    out.insert(field.field.id.clone(), value.clone());
                }
            }
        }
    }
    out
}

/// Validate every visible field. Hidden-but-required fields never block
/// submission: they are not in the plan, so they are not validated.
pub fn validate_visible(project: &Project, values: &ValueMap) -> Vec<FieldError> {
    let plan = resolve_form(project, values);
    plan.pages
        .iter()
        .flat_map(|page| page.sections.iter())
        .flat_map(|section| section.columns.iter().flatten())
        .filter_map(|field| field.error.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcraft_model::{Condition, ConditionOperator, ConditionalAction, ConditionalRules};
    use serde_json::json;

    fn build_form(fields: Vec<Field>) -> Project {
        let mut project = Project::new("Survey");
        let mut section = Section::new(0);
        for field in &fields {
            section.push_field(field.id.clone(), 0);
        }
        project.fields = fields;
        project.pages[0].sections.push(section);
        project
    }

    fn show_when_yes(field_id: &str) -> ConditionalRules {
        ConditionalRules::new(
            ConditionalAction::Show,
            vec![Condition::new(field_id, ConditionOperator::Equals, json!("yes"))],
        )
    }

    #[test]
    fn test_every_field_type_has_an_archetype() {
        for ty in FieldType::ALL {
            let archetype = ControlArchetype::of(ty);
            assert_eq!(archetype.collects_value(), !ty.is_static(), "{}", ty.name());
        }
    }

    #[test]
    fn test_hidden_fields_are_skipped_entirely() {
        let trigger = Field::new(FieldType::Text, "Trigger");
        let trigger_id = trigger.id.clone();
        let mut dependent = Field::new(FieldType::Text, "Dependent");
        dependent.conditional = show_when_yes(&trigger_id);
        let project = build_form(vec![trigger, dependent]);

        let values: ValueMap = [(trigger_id.clone(), json!("no"))].into_iter().collect();
        let plan = resolve_form(&project, &values);
        assert_eq!(plan.pages[0].sections[0].columns[0].len(), 1);

        let values: ValueMap = [(trigger_id, json!("yes"))].into_iter().collect();
        let plan = resolve_form(&project, &values);
        assert_eq!(plan.pages[0].sections[0].columns[0].len(), 2);
    }

    #[test]
    fn test_hidden_required_field_does_not_block_submission() {
        let trigger = Field::new(FieldType::Text, "Trigger");
        let trigger_id = trigger.id.clone();
        let mut gated = Field::new(FieldType::Text, "Gated");
        gated.required = true;
        gated.conditional = show_when_yes(&trigger_id);
        let project = build_form(vec![trigger, gated]);

        let values: ValueMap = [(trigger_id, json!("no"))].into_iter().collect();
        assert!(validate_visible(&project, &values).is_empty());
    }

    #[test]
    fn test_submission_values_exclude_hidden_fields() {
        let trigger = Field::new(FieldType::Text, "Trigger");
        let trigger_id = trigger.id.clone();
        let mut gated = Field::new(FieldType::Text, "Gated");
        let gated_id = gated.id.clone();
        gated.conditional = show_when_yes(&trigger_id);
        let project = build_form(vec![trigger, gated]);

        // The respondent filled the gated field, then flipped the trigger
        // back: the stale value must not leave the form.
        let values: ValueMap = [
            (trigger_id.clone(), json!("no")),
            (gated_id.clone(), json!("stale answer")),
        ]
        .into_iter()
        .collect();

        let out = submission_values(&project, &values);
        assert!(out.contains_key(&trigger_id));
        assert!(!out.contains_key(&gated_id));
    }

    #[test]
    fn test_hidden_section_hides_its_fields() {
        let trigger = Field::new(FieldType::Text, "Trigger");
        let trigger_id = trigger.id.clone();
        let inner = Field::new(FieldType::Text, "Inner");
        let inner_id = inner.id.clone();

        let mut project = Project::new("Survey");
        let mut open = Section::new(0);
        open.push_field(trigger.id.clone(), 0);
        let mut gated = Section::new(1);
        gated.conditional = Some(show_when_yes(&trigger_id));
        gated.push_field(inner.id.clone(), 0);
        project.fields = vec![trigger, inner];
        project.pages[0].sections = vec![open, gated];

        let values: ValueMap = [
            (trigger_id, json!("no")),
            (inner_id.clone(), json!("stale")),
        ]
        .into_iter()
        .collect();

        let plan = resolve_form(&project, &values);
        assert_eq!(plan.pages[0].sections.len(), 1);
        assert!(!submission_values(&project, &values).contains_key(&inner_id));
    }

    #[test]
    fn test_plan_borrows_values_for_the_callers_lifetime() {
        // The plan holds references into both the document and the values
        // map; callers keep using it while both are still alive.
        let field = Field::new(FieldType::Text, "Name");
        let field_id = field.id.clone();
        let project = build_form(vec![field]);
        let values: ValueMap = [(field_id.clone(), json!("Ada"))].into_iter().collect();

        let plan = resolve_form(&project, &values);
        let rendered = &plan.pages[0].sections[0].columns[0][0];
        assert_eq!(rendered.value, values.get(&field_id));
        assert_eq!(rendered.value, Some(&json!("Ada")));
        // Unanswered fields render with no value rather than a placeholder.
        assert_eq!(
            resolve_form(&project, &ValueMap::new()).pages[0].sections[0].columns[0][0].value,
            None
        );
    }

    #[test]
    fn test_validation_errors_surface_in_the_plan() {
        let mut email = Field::new(FieldType::Email, "Email");
        email.required = true;
        let email_id = email.id.clone();
        let project = build_form(vec![email]);

        let values: ValueMap = [(email_id, json!("nope"))].into_iter().collect();
        let plan = resolve_form(&project, &values);
        let rendered = &plan.pages[0].sections[0].columns[0][0];
        assert_eq!(
            rendered.error.as_ref().map(|e| e.message.as_str()),
            Some("Please enter a valid email address")
        );
    }
}
