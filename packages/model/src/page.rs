//! Pages: top-level steps of a multi-page form.

use crate::conditional::ConditionalRules;
use crate::id::fresh_id;
use crate::section::Section;
use serde::{Deserialize, Serialize};

/// Navigation buttons shown on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationConfig {
    pub show_previous: bool,
    pub show_next: bool,
    pub next_button_text: String,
    pub previous_button_text: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            show_previous: true,
            show_next: true,
            next_button_text: "Next".to_string(),
            previous_button_text: "Previous".to_string(),
        }
    }
}

impl NavigationConfig {
    /// First-page variant: no way back.
    pub fn first_page() -> Self {
        Self {
            show_previous: false,
            ..Self::default()
        }
    }
}

/// One step of the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub navigation: NavigationConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<ConditionalRules>,
    pub order: u32,
}

impl Page {
    pub fn new(title: impl Into<String>, order: u32) -> Self {
        Self {
            id: fresh_id("page"),
            title: title.into(),
            description: None,
            sections: Vec::new(),
            navigation: if order == 0 {
                NavigationConfig::first_page()
            } else {
                NavigationConfig::default()
            },
            conditional: None,
            order,
        }
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    /// Sections in canonical order: stable sort by `order` index, ties
    /// broken by creation (insertion) order.
    pub fn sections_ordered(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }
}
