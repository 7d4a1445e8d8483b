use anyhow::Result;
use formcraft_editor::{add_field, add_section, apply, FieldUpdates, Mutation};
use formcraft_evaluator::{evaluate, resolve_form, validate_field, validate_visible, ValueMap};
use formcraft_model::{
    Condition, ConditionOperator, ConditionalAction, ConditionalRules, FieldType, Project,
};
use serde_json::json;

#[test]
fn edited_documents_evaluate_like_hand_built_ones() -> Result<()> {
    let project = Project::new("Signup");
    let page_id = project.pages[0].id.clone();
    let (project, section_id) = add_section(&project, &page_id)?;
    let (project, plan_id) = add_field(&project, &section_id, FieldType::Select)?;
    let (project, company_id) = add_field(&project, &section_id, FieldType::Text)?;

    // Company name only matters on the business plan.
    let applied = apply(
        &project,
        &Mutation::UpdateField {
            field_id: company_id.clone(),
            updates: FieldUpdates {
                required: Some(true),
                conditional: Some(ConditionalRules::new(
                    ConditionalAction::Show,
                    vec![Condition::new(
                        &plan_id,
                        ConditionOperator::Equals,
                        json!("business"),
                    )],
                )),
                ..FieldUpdates::default()
            },
        },
    )?;
    let project = applied.project;

    let values: ValueMap = [(plan_id.clone(), json!("personal"))].into_iter().collect();
    let plan = resolve_form(&project, &values);
    assert_eq!(plan.pages[0].sections[0].columns[0].len(), 1);
    assert!(validate_visible(&project, &values).is_empty());

    let values: ValueMap = [(plan_id, json!("business"))].into_iter().collect();
    let errors = validate_visible(&project, &values);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field_id, company_id);
    assert!(errors[0].message.ends_with("is required"));
    Ok(())
}

#[test]
fn section_visibility_follows_trigger_value() -> Result<()> {
    // Section S shows when A equals "yes"; absent A fails open to hidden.
    let project = Project::new("Survey");
    let page_id = project.pages[0].id.clone();
    let (project, trigger_section) = add_section(&project, &page_id)?;
    let (project, trigger_id) = add_field(&project, &trigger_section, FieldType::Radio)?;
    let (project, gated_section) = add_section(&project, &page_id)?;

    let rules = ConditionalRules::new(
        ConditionalAction::Show,
        vec![Condition::new(&trigger_id, ConditionOperator::Equals, json!("yes"))],
    );

    let visible_with = |value: Option<&str>| -> bool {
        let values: ValueMap = value
            .map(|v| [(trigger_id.clone(), json!(v))].into_iter().collect())
            .unwrap_or_default();
        evaluate(&rules, &values).visible
    };

    assert!(visible_with(Some("yes")));
    assert!(!visible_with(Some("no")));
    assert!(!visible_with(None));

    // And through the full plan: the gated section drops out of the page.
    let applied = apply(
        &project,
        &Mutation::UpdateSection {
            section_id: gated_section,
            updates: formcraft_editor::SectionUpdates {
                conditional: Some(rules),
                ..Default::default()
            },
        },
    )?;
    let values: ValueMap = [(trigger_id, json!("no"))].into_iter().collect();
    let plan = resolve_form(&applied.project, &values);
    assert_eq!(plan.pages[0].sections.len(), 1);
    Ok(())
}

#[test]
fn required_then_filled_clears_the_error() {
    let mut field = formcraft_model::Field::new(FieldType::Text, "Name");
    field.required = true;

    assert!(validate_field(&field, &json!("")).is_some());
    assert_eq!(validate_field(&field, &json!("x")), None);
}
