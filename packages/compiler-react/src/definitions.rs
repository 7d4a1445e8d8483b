//! TypeScript value-shape definitions for a form document.

use formcraft_model::{FieldType, Project};

/// Emit a `FormValues` interface with one optional property per
/// value-collecting placed field, keyed by field id (quoted: ids carry
/// hyphens). Document order, stable output.
pub fn compile_value_definitions(project: &Project) -> String {
    let mut out = String::from("interface FormValues {\n");
    for page in project.pages_ordered() {
        for section in page.sections_ordered() {
            for field_id in &section.fields {
                let Some(field) = project.field(field_id) else {
                    continue;
                };
                if field.field_type.is_static() {
                    continue;
                }
                out.push_str(&format!(
                    "  \"{}\"?: {}\n",
                    field.id,
                    ts_type(field.field_type)
                ));
            }
        }
    }
    out.push_str("}\n");
    out
}

fn ts_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Number | FieldType::Rating | FieldType::Range => "number",
        FieldType::Switch => "boolean",
        FieldType::Checkbox => "string[]",
        FieldType::File | FieldType::Image => "File | null",
        FieldType::Matrix => "Record<string, string>",
        _ => "string",
    }
}
