//! Partial-update payloads for the `Update*` mutations.
//!
//! Each struct mirrors the mutable surface of one entity; `Some` fields are
//! merged shallowly, `None` fields are left alone. Clearing an optional
//! attribute is not an update, it is a different mutation.

use chrono::Utc;
use formcraft_model::{
    ConditionalRules, Field, FieldStyling, Layout, NavigationConfig, Page, Project, Section,
    Settings, Theme, ValidationRules,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageUpdates {
    pub title: Option<String>,
    pub description: Option<String>,
    pub navigation: Option<NavigationConfig>,
    pub conditional: Option<ConditionalRules>,
    pub order: Option<u32>,
}

impl PageUpdates {
    pub fn apply_to(&self, page: &mut Page) {
        if let Some(title) = &self.title {
            page.title = title.clone();
        }
        if let Some(description) = &self.description {
            page.description = Some(description.clone());
        }
        if let Some(navigation) = &self.navigation {
            page.navigation = navigation.clone();
        }
        if let Some(conditional) = &self.conditional {
            page.conditional = Some(conditional.clone());
        }
        if let Some(order) = self.order {
            page.order = order;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionUpdates {
    pub title: Option<String>,
    pub description: Option<String>,
    pub layout: Option<Layout>,
    pub conditional: Option<ConditionalRules>,
    pub collapsible: Option<bool>,
    pub collapsed: Option<bool>,
    pub repeatable: Option<bool>,
    pub max_repeats: Option<u32>,
    pub order: Option<u32>,
}

impl SectionUpdates {
    pub fn apply_to(&self, section: &mut Section) {
        if let Some(title) = &self.title {
            section.title = title.clone();
        }
        if let Some(description) = &self.description {
            section.description = Some(description.clone());
        }
        if let Some(layout) = &self.layout {
            section.layout = layout.clone();
        }
        if let Some(conditional) = &self.conditional {
            section.conditional = Some(conditional.clone());
        }
        if let Some(collapsible) = self.collapsible {
            section.collapsible = collapsible;
        }
        if let Some(collapsed) = self.collapsed {
            section.collapsed = collapsed;
        }
        if let Some(repeatable) = self.repeatable {
            section.repeatable = repeatable;
        }
        if let Some(max_repeats) = self.max_repeats {
            section.max_repeats = Some(max_repeats);
        }
        if let Some(order) = self.order {
            section.order = order;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldUpdates {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub rows: Option<u32>,
    pub description: Option<String>,
    pub help_text: Option<String>,
    /// Carries an already-validated pattern: `ValidationRules` only accepts
    /// patterns through its compiling setter.
    pub validation: Option<ValidationRules>,
    pub conditional: Option<ConditionalRules>,
    pub styling: Option<FieldStyling>,
    pub default_value: Option<Value>,
}

impl FieldUpdates {
    pub fn apply_to(&self, field: &mut Field) {
        if let Some(label) = &self.label {
            field.label = label.clone();
        }
        if let Some(placeholder) = &self.placeholder {
            field.placeholder = Some(placeholder.clone());
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(options) = &self.options {
            field.options = Some(options.clone());
        }
        if let Some(rows) = self.rows {
            field.rows = Some(rows);
        }
        if let Some(description) = &self.description {
            field.description = Some(description.clone());
        }
        if let Some(help_text) = &self.help_text {
            field.help_text = Some(help_text.clone());
        }
        if let Some(validation) = &self.validation {
            field.validation = validation.clone();
        }
        if let Some(conditional) = &self.conditional {
            field.conditional = conditional.clone();
        }
        if let Some(styling) = &self.styling {
            field.styling = styling.clone();
        }
        if let Some(default_value) = &self.default_value {
            field.default_value = Some(default_value.clone());
        }
        if let Some(metadata) = &mut field.metadata {
            metadata.updated_at = Utc::now();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectUpdates {
    pub title: Option<String>,
    pub description: Option<String>,
    pub theme: Option<Theme>,
    pub settings: Option<Settings>,
    pub collaborators: Option<Vec<String>>,
}

impl ProjectUpdates {
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(title) = &self.title {
            project.title = title.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(theme) = self.theme {
            project.theme = theme;
        }
        if let Some(settings) = &self.settings {
            project.settings = settings.clone();
        }
        if let Some(collaborators) = &self.collaborators {
            project.collaborators = collaborators.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcraft_model::FieldType;

    #[test]
    fn test_field_updates_merge_shallowly() {
        let mut field = Field::from_palette(FieldType::Text);
        let original_placeholder = field.placeholder.clone();

        let updates = FieldUpdates {
            label: Some("Full Name".to_string()),
            required: Some(true),
            ..FieldUpdates::default()
        };
        updates.apply_to(&mut field);

        assert_eq!(field.label, "Full Name");
        assert!(field.required);
        // Untouched attributes survive
        assert_eq!(field.placeholder, original_placeholder);
    }

    #[test]
    fn test_page_updates_leave_none_fields_alone() {
        let mut page = Page::new("Page 1", 0);
        let updates = PageUpdates {
            title: Some("Intro".to_string()),
            ..PageUpdates::default()
        };
        updates.apply_to(&mut page);
        assert_eq!(page.title, "Intro");
        assert_eq!(page.order, 0);
    }
}
