//! Multi-page navigation with conditional skips.
//!
//! A firing `skip_to_section` jumps forward within the current page; a
//! target that does not exist, or sits behind the cursor, falls through to
//! the implicit next section. Backward skips are rejected so a rule cycle
//! cannot trap the respondent.

use crate::conditional::{evaluate, ValueMap};
use formcraft_model::{Page, Project};

/// Id of the section to advance to after `current_section_id`, or `None`
/// when the page is exhausted.
pub fn next_section_id(page: &Page, current_section_id: &str, values: &ValueMap) -> Option<String> {
    let ordered = page.sections_ordered();
    let position = ordered.iter().position(|s| s.id == current_section_id)?;
    let current = ordered[position];

    if let Some(rules) = &current.conditional {
        let effect = evaluate(rules, values);
        if let Some(target) = effect.skip_to_section {
            // Forward jumps only, and only to sections this page owns.
            let target_position = ordered.iter().position(|s| s.id == target);
            if let Some(target_position) = target_position {
                if target_position > position {
                    return Some(ordered[target_position].id.clone());
                }
            }
        }
    }

    visible_from(&ordered, position + 1, values)
}

/// First visible section of a page, honoring conditional visibility.
pub fn first_section_id(page: &Page, values: &ValueMap) -> Option<String> {
    visible_from(&page.sections_ordered(), 0, values)
}

fn visible_from(
    ordered: &[&formcraft_model::Section],
    start: usize,
    values: &ValueMap,
) -> Option<String> {
    ordered[start.min(ordered.len())..]
        .iter()
        .find(|section| {
            section
                .conditional
                .as_ref()
                .map(|rules| evaluate(rules, values).visible)
                .unwrap_or(true)
        })
        .map(|section| section.id.clone())
}

/// Index (into `pages_ordered`) of the next visible page after `current`,
/// or `None` when the form is finished.
pub fn next_page_index(project: &Project, current: usize, values: &ValueMap) -> Option<usize> {
    let ordered = project.pages_ordered();
    ordered
        .iter()
        .enumerate()
        .skip(current + 1)
        .find(|(_, page)| {
            page.conditional
                .as_ref()
                .map(|rules| evaluate(rules, values).visible)
                .unwrap_or(true)
        })
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcraft_model::{
        Condition, ConditionOperator, ConditionalAction, ConditionalRules, Section,
    };
    use serde_json::json;

    fn skip_when_yes(field_id: &str, target: &str) -> ConditionalRules {
        let mut rules = ConditionalRules::new(
            ConditionalAction::SkipToSection,
            vec![Condition::new(field_id, ConditionOperator::Equals, json!("yes"))],
        );
        rules.target_section_id = Some(target.to_string());
        rules
    }

    fn page_with_sections(count: usize) -> (Page, Vec<String>) {
        let mut page = Page::new("Page 1", 0);
        let mut ids = Vec::new();
        for order in 0..count {
            let section = Section::new(order as u32);
            ids.push(section.id.clone());
            page.sections.push(section);
        }
        (page, ids)
    }

    #[test]
    fn test_skip_jumps_forward() {
        let (mut page, ids) = page_with_sections(3);
        page.sections[0].conditional = Some(skip_when_yes("a", &ids[2]));

        let values: ValueMap = [("a".to_string(), json!("yes"))].into_iter().collect();
        assert_eq!(next_section_id(&page, &ids[0], &values), Some(ids[2].clone()));

        // Not firing: the implicit next section.
        let values: ValueMap = [("a".to_string(), json!("no"))].into_iter().collect();
        assert_eq!(next_section_id(&page, &ids[0], &values), Some(ids[1].clone()));
    }

    #[test]
    fn test_backward_or_unknown_skip_falls_through() {
        let (mut page, ids) = page_with_sections(3);
        page.sections[1].conditional = Some(skip_when_yes("a", &ids[0]));
        page.sections[2].conditional = Some(skip_when_yes("a", "elsewhere"));

        let values: ValueMap = [("a".to_string(), json!("yes"))].into_iter().collect();
        // Backward target: implicit next instead.
        assert_eq!(next_section_id(&page, &ids[1], &values), Some(ids[2].clone()));
        // Unknown target at the last section: page exhausted.
        assert_eq!(next_section_id(&page, &ids[2], &values), None);
    }

    #[test]
    fn test_hidden_sections_are_stepped_over() {
        let (mut page, ids) = page_with_sections(3);
        page.sections[1].conditional = Some(ConditionalRules::new(
            ConditionalAction::Hide,
            vec![Condition::new("a", ConditionOperator::Equals, json!("yes"))],
        ));

        let values: ValueMap = [("a".to_string(), json!("yes"))].into_iter().collect();
        assert_eq!(next_section_id(&page, &ids[0], &values), Some(ids[2].clone()));
        assert_eq!(first_section_id(&page, &values), Some(ids[0].clone()));
    }

    #[test]
    fn test_hidden_pages_are_skipped_in_navigation() {
        let mut project = Project::new("Survey");
        let mut second = Page::new("Page 2", 1);
        second.conditional = Some(ConditionalRules::new(
            ConditionalAction::Hide,
            vec![Condition::new("a", ConditionOperator::Equals, json!("yes"))],
        ));
        project.pages.push(second);
        project.pages.push(Page::new("Page 3", 2));

        let values: ValueMap = [("a".to_string(), json!("yes"))].into_iter().collect();
        assert_eq!(next_page_index(&project, 0, &values), Some(2));

        let values: ValueMap = [("a".to_string(), json!("no"))].into_iter().collect();
        assert_eq!(next_page_index(&project, 0, &values), Some(1));
        assert_eq!(next_page_index(&project, 2, &values), None);
    }
}
