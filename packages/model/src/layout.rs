//! Column layouts within a section.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    Single,
    TwoColumn,
    ThreeColumn,
    FourColumn,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutAlignment {
    Top,
    Center,
    Bottom,
    Stretch,
}

/// One column: a width hint and the ordered field ids it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub width: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Column {
    pub fn new(width: impl Into<String>) -> Self {
        Self {
            width: width.into(),
            fields: Vec::new(),
        }
    }
}

/// Column layout of a section. Every field id placed in a column must also
/// be in the owning section's field list, and in at most one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    pub columns: Vec<Column>,
    pub gap: String,
    pub alignment: LayoutAlignment,
}

impl Layout {
    fn with_columns(layout_type: LayoutType, widths: &[&str]) -> Self {
        Self {
            layout_type,
            columns: widths.iter().map(|w| Column::new(*w)).collect(),
            gap: "1rem".to_string(),
            alignment: LayoutAlignment::Top,
        }
    }

    pub fn single() -> Self {
        Self::with_columns(LayoutType::Single, &["100%"])
    }

    pub fn two_column() -> Self {
        Self::with_columns(LayoutType::TwoColumn, &["50%", "50%"])
    }

    pub fn three_column() -> Self {
        Self::with_columns(LayoutType::ThreeColumn, &["33.33%", "33.33%", "33.33%"])
    }

    pub fn four_column() -> Self {
        Self::with_columns(LayoutType::FourColumn, &["25%", "25%", "25%", "25%"])
    }

    /// Column index holding the given field id, if any.
    pub fn column_of(&self, field_id: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.fields.iter().any(|f| f == field_id))
    }

    /// Append a field id to a column. Out-of-range columns clamp to the
    /// last one so a stale drop index cannot lose the field.
    pub fn push_field(&mut self, column: usize, field_id: String) {
        if self.columns.is_empty() {
            self.columns.push(Column::new("100%"));
        }
        let index = column.min(self.columns.len() - 1);
        self.columns[index].fields.push(field_id);
    }

    /// Insert a field id right after an anchor id, in the anchor's column.
    /// Falls back to appending to the first column when the anchor is not
    /// placed anywhere.
    pub fn insert_after(&mut self, anchor_id: &str, field_id: String) {
        match self.column_of(anchor_id) {
            Some(col) => {
                let fields = &mut self.columns[col].fields;
                // position() is Some here since column_of found the anchor
                let pos = fields.iter().position(|f| f == anchor_id).unwrap_or(0);
                fields.insert(pos + 1, field_id);
            }
            None => self.push_field(0, field_id),
        }
    }

    /// Remove a field id from whichever column holds it.
    pub fn remove_field(&mut self, field_id: &str) {
        for column in &mut self.columns {
            column.fields.retain(|f| f != field_id);
        }
    }

    /// Reorder each column's ids to follow a new canonical ordering,
    /// keeping column membership unchanged.
    pub fn reorder(&mut self, ordered_ids: &[String]) {
        for column in &mut self.columns {
            let mut next: Vec<String> = ordered_ids
                .iter()
                .filter(|id| column.fields.iter().any(|f| f == *id))
                .cloned()
                .collect();
            // Ids missing from the new ordering keep their relative position
            // at the end rather than vanishing.
            for id in &column.fields {
                if !next.contains(id) {
                    next.push(id.clone());
                }
            }
            column.fields = next;
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_layout_defaults() {
        let layout = Layout::single();
        assert_eq!(layout.layout_type, LayoutType::Single);
        assert_eq!(layout.columns.len(), 1);
        assert_eq!(layout.columns[0].width, "100%");
        assert_eq!(layout.gap, "1rem");
    }

    #[test]
    fn test_push_field_clamps_column_index() {
        let mut layout = Layout::two_column();
        layout.push_field(9, "f1".to_string());
        assert_eq!(layout.columns[1].fields, vec!["f1"]);
    }

    #[test]
    fn test_insert_after_places_in_anchor_column() {
        let mut layout = Layout::two_column();
        layout.push_field(1, "a".to_string());
        layout.push_field(1, "c".to_string());
        layout.insert_after("a", "b".to_string());
        assert_eq!(layout.columns[1].fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_field() {
        let mut layout = Layout::single();
        layout.push_field(0, "f1".to_string());
        layout.push_field(0, "f2".to_string());
        layout.remove_field("f1");
        assert_eq!(layout.columns[0].fields, vec!["f2"]);
        assert_eq!(layout.column_of("f1"), None);
    }

    #[test]
    fn test_reorder_respects_new_ordering() {
        let mut layout = Layout::single();
        for id in ["f1", "f2", "f3"] {
            layout.push_field(0, id.to_string());
        }
        layout.reorder(&["f2".to_string(), "f1".to_string(), "f3".to_string()]);
        assert_eq!(layout.columns[0].fields, vec!["f2", "f1", "f3"]);
    }

    #[test]
    fn test_layout_type_wire_names() {
        let json = serde_json::to_string(&LayoutType::TwoColumn).unwrap();
        assert_eq!(json, "\"two-column\"");
    }
}
