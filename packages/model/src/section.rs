//! Sections: titled groups of field placements with a column layout.

use crate::conditional::ConditionalRules;
use crate::id::fresh_id;
use crate::layout::Layout;
use serde::{Deserialize, Serialize};

/// A titled group of fields within a page. Holds field *ids*; the fields
/// themselves live in the project's canonical collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered field ids (flat view; the layout's columns partition it).
    #[serde(default)]
    pub fields: Vec<String>,
    pub layout: Layout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<ConditionalRules>,
    #[serde(default)]
    pub collapsible: bool,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub repeatable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_repeats: Option<u32>,
    /// Position among siblings. Gaps are allowed; a stable sort by this
    /// index is the canonical ordering.
    pub order: u32,
}

impl Section {
    /// A fresh empty section with a single-column layout.
    pub fn new(order: u32) -> Self {
        Self {
            id: fresh_id("section"),
            title: "New Section".to_string(),
            description: None,
            fields: Vec::new(),
            layout: Layout::single(),
            conditional: None,
            collapsible: false,
            collapsed: false,
            repeatable: false,
            max_repeats: None,
            order,
        }
    }

    pub fn contains_field(&self, field_id: &str) -> bool {
        self.fields.iter().any(|f| f == field_id)
    }

    /// Append a field id, placing it in the given column (clamped).
    pub fn push_field(&mut self, field_id: String, column: usize) {
        self.fields.push(field_id.clone());
        self.layout.push_field(column, field_id);
    }

    /// Insert a field id immediately after an anchor, both in the flat list
    /// and in the anchor's column.
    pub fn insert_field_after(&mut self, anchor_id: &str, field_id: String) {
        match self.fields.iter().position(|f| f == anchor_id) {
            Some(pos) => self.fields.insert(pos + 1, field_id.clone()),
            None => self.fields.push(field_id.clone()),
        }
        self.layout.insert_after(anchor_id, field_id);
    }

    /// Remove a field placement from the flat list and every column.
    /// The field itself stays in the project's canonical collection.
    pub fn remove_field(&mut self, field_id: &str) {
        self.fields.retain(|f| f != field_id);
        self.layout.remove_field(field_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_section_defaults() {
        let section = Section::new(3);
        assert_eq!(section.title, "New Section");
        assert_eq!(section.order, 3);
        assert!(section.fields.is_empty());
        assert_eq!(section.layout.columns.len(), 1);
        assert!(!section.collapsible);
        assert!(!section.repeatable);
    }

    #[test]
    fn test_push_and_remove_field_keeps_lists_in_sync() {
        let mut section = Section::new(0);
        section.push_field("f1".to_string(), 0);
        section.push_field("f2".to_string(), 0);
        assert!(section.contains_field("f1"));
        assert_eq!(section.layout.columns[0].fields, vec!["f1", "f2"]);

        section.remove_field("f1");
        assert!(!section.contains_field("f1"));
        assert_eq!(section.layout.columns[0].fields, vec!["f2"]);
    }

    #[test]
    fn test_insert_field_after() {
        let mut section = Section::new(0);
        section.push_field("f1".to_string(), 0);
        section.push_field("f3".to_string(), 0);
        section.insert_field_after("f1", "f2".to_string());
        assert_eq!(section.fields, vec!["f1", "f2", "f3"]);
        assert_eq!(section.layout.columns[0].fields, vec!["f1", "f2", "f3"]);
    }
}
