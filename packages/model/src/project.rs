//! The document root: a project with pages, settings, and the field arena.

use crate::field::Field;
use crate::id::fresh_id;
use crate::page::Page;
use crate::section::Section;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Modern,
    Classic,
    Minimal,
    Dark,
    Colorful,
    Glassmorphism,
    Neumorphism,
}

/// When field validation runs in the embedding UI. The validation engine
/// itself is timing-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationTiming {
    OnSubmit,
    OnBlur,
    OnChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutOrientation {
    Vertical,
    Horizontal,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationPreset {
    None,
    Fade,
    Slide,
    Bounce,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilitySettings {
    pub enabled: bool,
    pub high_contrast: bool,
    pub screen_reader: bool,
    pub keyboard_navigation: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            high_contrast: false,
            screen_reader: true,
            keyboard_navigation: true,
        }
    }
}

/// Project-wide behavior toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub allow_multiple_submissions: bool,
    pub require_authentication: bool,
    pub enable_analytics: bool,
    pub enable_notifications: bool,
    pub multi_page: bool,
    pub show_progress_bar: bool,
    pub save_progress: bool,
    pub auto_save: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    pub submit_button_text: String,
    pub reset_button_text: String,
    pub validation: ValidationTiming,
    pub layout: LayoutOrientation,
    pub animation: AnimationPreset,
    pub responsive: bool,
    pub language: String,
    pub accessibility: AccessibilitySettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            allow_multiple_submissions: true,
            require_authentication: false,
            enable_analytics: true,
            enable_notifications: true,
            multi_page: true,
            show_progress_bar: true,
            save_progress: true,
            auto_save: false,
            time_limit: None,
            submit_button_text: "Submit Form".to_string(),
            reset_button_text: "Reset".to_string(),
            validation: ValidationTiming::OnBlur,
            layout: LayoutOrientation::Vertical,
            animation: AnimationPreset::Fade,
            responsive: true,
            language: "en".to_string(),
            accessibility: AccessibilitySettings::default(),
            redirect_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningLevel {
    Warning,
    Error,
}

/// A data-quality finding from [`Project::audit`]. Never fatal; the caller
/// decides whether to surface it.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentWarning {
    pub level: WarningLevel,
    pub message: String,
    pub entity_id: Option<String>,
}

impl DocumentWarning {
    pub fn warning(message: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            level: WarningLevel::Warning,
            message: message.into(),
            entity_id: Some(entity_id.into()),
        }
    }

    pub fn error(message: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            level: WarningLevel::Error,
            message: message.into(),
            entity_id: Some(entity_id.into()),
        }
    }
}

/// The form document being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub pages: Vec<Page>,
    /// Canonical field collection (the arena). Sections and columns hold
    /// ids into this list, never copies.
    #[serde(default)]
    pub fields: Vec<Field>,
    pub theme: Theme,
    pub settings: Settings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped by exactly 1 on every structural mutation.
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub collaborators: Vec<String>,
}

impl Project {
    /// A new project with one empty page.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        let mut first_page = Page::new("Page 1", 0);
        first_page.description = Some("First page of your form".to_string());
        Self {
            id: fresh_id("project"),
            title: title.into(),
            description: String::new(),
            pages: vec![first_page],
            fields: Vec::new(),
            theme: Theme::Modern,
            settings: Settings::default(),
            created_at: now,
            updated_at: now,
            version: 1,
            created_by: None,
            collaborators: Vec::new(),
        }
    }

    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn field_mut(&mut self, field_id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == field_id)
    }

    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    pub fn page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }

    pub fn find_section(&self, section_id: &str) -> Option<&Section> {
        self.pages.iter().find_map(|p| p.section(section_id))
    }

    pub fn find_section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.pages.iter_mut().find_map(|p| p.section_mut(section_id))
    }

    /// Section currently holding a placement of the given field id.
    pub fn container_of(&self, field_id: &str) -> Option<&Section> {
        self.pages
            .iter()
            .flat_map(|p| p.sections.iter())
            .find(|s| s.contains_field(field_id))
    }

    /// Pages in canonical order: stable sort by `order` index.
    pub fn pages_ordered(&self) -> Vec<&Page> {
        let mut pages: Vec<&Page> = self.pages.iter().collect();
        pages.sort_by_key(|p| p.order);
        pages
    }

    /// Fields in the arena with no placement in any section. Permitted by
    /// the lifecycle rules; this is how they stay reachable for cleanup.
    pub fn orphaned_fields(&self) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|f| self.container_of(&f.id).is_none())
            .collect()
    }

    /// Stamp a mutation: bump the version and refresh `updated_at`.
    pub fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }

    /// Structural audit. Returns data-quality warnings without mutating:
    /// duplicate ids, column placements not owned by their section, fields
    /// placed in more than one column, dangling conditional references, and
    /// stored validation patterns that no longer compile.
    pub fn audit(&self) -> Vec<DocumentWarning> {
        let mut warnings = Vec::new();
        let field_ids: HashSet<&str> = self.fields.iter().map(|f| f.id.as_str()).collect();

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.id.as_str()) {
                warnings.push(DocumentWarning::error(
                    format!("duplicate field id: {}", field.id),
                    &field.id,
                ));
            }
        }

        let mut seen = HashSet::new();
        for page in &self.pages {
            if !seen.insert(page.id.as_str()) {
                warnings.push(DocumentWarning::error(
                    format!("duplicate page id: {}", page.id),
                    &page.id,
                ));
            }
            self.audit_conditional(&page.conditional, &page.id, &field_ids, &mut warnings);

            let mut seen_sections = HashSet::new();
            for section in &page.sections {
                if !seen_sections.insert(section.id.as_str()) {
                    warnings.push(DocumentWarning::error(
                        format!("duplicate section id: {}", section.id),
                        &section.id,
                    ));
                }
                self.audit_section(section, &field_ids, &mut warnings);
            }
        }

        for field in &self.fields {
            self.audit_conditional(
                &Some(field.conditional.clone()),
                &field.id,
                &field_ids,
                &mut warnings,
            );
            if field.options.is_some() != field.field_type.is_choice() {
                warnings.push(DocumentWarning::error(
                    format!(
                        "field {} has options inconsistent with its type '{}'",
                        field.id,
                        field.field_type.name()
                    ),
                    &field.id,
                ));
            }
            if let Some(pattern) = field.validation.pattern() {
                if regex::Regex::new(pattern).is_err() {
                    warnings.push(DocumentWarning::error(
                        format!("field {} has an uncompilable validation pattern", field.id),
                        &field.id,
                    ));
                }
            }
        }

        warnings
    }

    fn audit_section(
        &self,
        section: &Section,
        field_ids: &HashSet<&str>,
        warnings: &mut Vec<DocumentWarning>,
    ) {
        for id in &section.fields {
            if !field_ids.contains(id.as_str()) {
                warnings.push(DocumentWarning::error(
                    format!("section {} places unknown field id {}", section.id, id),
                    &section.id,
                ));
            }
        }
        let mut placed = HashSet::new();
        for column in &section.layout.columns {
            for id in &column.fields {
                if !section.contains_field(id) {
                    warnings.push(DocumentWarning::error(
                        format!(
                            "column in section {} holds field id {} not owned by the section",
                            section.id, id
                        ),
                        &section.id,
                    ));
                }
                if !placed.insert(id.as_str()) {
                    warnings.push(DocumentWarning::error(
                        format!(
                            "field id {} appears in more than one column of section {}",
                            id, section.id
                        ),
                        &section.id,
                    ));
                }
            }
        }
        self.audit_conditional(&section.conditional, &section.id, field_ids, warnings);
    }

    fn audit_conditional(
        &self,
        conditional: &Option<crate::conditional::ConditionalRules>,
        entity_id: &str,
        field_ids: &HashSet<&str>,
        warnings: &mut Vec<DocumentWarning>,
    ) {
        let Some(rules) = conditional else { return };
        if !rules.enabled {
            return;
        }
        for referenced in rules.referenced_field_ids() {
            if !field_ids.contains(referenced) {
                warnings.push(DocumentWarning::warning(
                    format!(
                        "conditional rule on {} references missing field {}",
                        entity_id, referenced
                    ),
                    entity_id,
                ));
            }
        }
    }
}
