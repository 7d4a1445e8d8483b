//! Field definitions: the closed set of input types and their configuration.

use crate::conditional::ConditionalRules;
use crate::id::fresh_id;
use crate::layout::Layout;
use crate::rules::ValidationRules;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of field types. Adding a variant is a compile-time exercise:
/// the render dispatcher and validation engine match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Phone,
    Number,
    Date,
    Time,
    Select,
    Radio,
    Checkbox,
    File,
    Switch,
    Rating,
    Location,
    Payment,
    Image,
    Range,
    Matrix,
    Divider,
    Heading,
    Paragraph,
    Spacer,
}

impl FieldType {
    pub const ALL: [FieldType; 22] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Number,
        FieldType::Date,
        FieldType::Time,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::File,
        FieldType::Switch,
        FieldType::Rating,
        FieldType::Location,
        FieldType::Payment,
        FieldType::Image,
        FieldType::Range,
        FieldType::Matrix,
        FieldType::Divider,
        FieldType::Heading,
        FieldType::Paragraph,
        FieldType::Spacer,
    ];

    /// Choice types carry an option list; nothing else does.
    pub fn is_choice(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio | FieldType::Checkbox)
    }

    /// Decorative types render content but never collect a value.
    pub fn is_static(&self) -> bool {
        matches!(
            self,
            FieldType::Divider | FieldType::Heading | FieldType::Paragraph | FieldType::Spacer
        )
    }

    /// Lowercase wire name, e.g. `"textarea"`.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::File => "file",
            FieldType::Switch => "switch",
            FieldType::Rating => "rating",
            FieldType::Location => "location",
            FieldType::Payment => "payment",
            FieldType::Image => "image",
            FieldType::Range => "range",
            FieldType::Matrix => "matrix",
            FieldType::Divider => "divider",
            FieldType::Heading => "heading",
            FieldType::Paragraph => "paragraph",
            FieldType::Spacer => "spacer",
        }
    }

    /// Title-cased name for palette labels, e.g. `"Textarea"`.
    pub fn title_case(&self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// Relative width of a field within its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldWidth {
    Full,
    Half,
    Third,
    Quarter,
    TwoThirds,
    ThreeQuarters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Presentation hints. The styling layer itself is out of scope; these are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStyling {
    pub width: FieldWidth,
    pub alignment: Alignment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
}

impl Default for FieldStyling {
    fn default() -> Self {
        Self {
            width: FieldWidth::Full,
            alignment: Alignment::Left,
            custom_css: None,
            background_color: None,
            text_color: None,
            font_size: None,
        }
    }
}

/// Free-form bookkeeping for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Id of the owning section, if placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl FieldMetadata {
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            created_by: None,
            section: None,
        }
    }
}

/// One input definition. Lives in the project's canonical field collection;
/// sections and columns reference it by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub required: bool,
    /// Ordered option list. Present iff `field_type.is_choice()`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default)]
    pub validation: ValidationRules,
    #[serde(default)]
    pub conditional: ConditionalRules,
    #[serde(default)]
    pub styling: FieldStyling,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FieldMetadata>,
}

impl Field {
    /// A bare field with a fresh id and empty configuration.
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: fresh_id("field"),
            field_type,
            label: label.into(),
            placeholder: None,
            required: false,
            options: field_type.is_choice().then(Vec::new),
            rows: None,
            description: None,
            help_text: None,
            validation: ValidationRules::default(),
            conditional: ConditionalRules::default(),
            styling: FieldStyling::default(),
            layout: None,
            default_value: None,
            metadata: Some(FieldMetadata::now()),
        }
    }

    /// Synthesize the field a palette drop produces: title-cased label,
    /// `Enter {type}...` placeholder, full-width left-aligned styling, and
    /// three starter options for choice types.
    pub fn from_palette(field_type: FieldType) -> Self {
        let mut field = Self::new(field_type, format!("{} Field", field_type.title_case()));
        field.placeholder = Some(format!("Enter {}...", field_type.name()));
        if field_type.is_choice() {
            field.options = Some(vec![
                "Option 1".to_string(),
                "Option 2".to_string(),
                "Option 3".to_string(),
            ]);
        }
        field
    }

    /// Required either by the flag or by the validation rules.
    pub fn is_required(&self) -> bool {
        self.required || self.validation.required
    }

    /// Clone with a fresh id and a " (Copy)" label suffix.
    pub fn duplicate(&self) -> Self {
        self.duplicate_as(fresh_id("field"))
    }

    /// Clone under a caller-chosen id (used when the id must be known up
    /// front, e.g. for collaboration events).
    pub fn duplicate_as(&self, new_id: String) -> Self {
        let mut copy = self.clone();
        copy.id = new_id;
        copy.label = format!("{} (Copy)", self.label);
        copy.metadata = Some(FieldMetadata {
            created_by: self.metadata.as_ref().and_then(|m| m.created_by.clone()),
            section: self.metadata.as_ref().and_then(|m| m.section.clone()),
            ..FieldMetadata::now()
        });
        copy
    }
}
