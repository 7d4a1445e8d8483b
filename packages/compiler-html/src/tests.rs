use crate::{compile_to_html, CompileOptions};
use formcraft_editor::{add_field, add_section, apply, FieldUpdates, Mutation};
use formcraft_model::{FieldType, Project};

fn survey() -> Project {
    let mut project = Project::new("Feedback Survey");
    project.description = "Tell us how we did".to_string();
    let page_id = project.pages[0].id.clone();
    let (project, section_id) = add_section(&project, &page_id).unwrap();
    let (project, email_id) = add_field(&project, &section_id, FieldType::Email).unwrap();
    let (project, _) = add_field(&project, &section_id, FieldType::Radio).unwrap();
    let (project, _) = add_field(&project, &section_id, FieldType::Textarea).unwrap();

    apply(
        &project,
        &Mutation::UpdateField {
            field_id: email_id,
            updates: FieldUpdates {
                required: Some(true),
                ..FieldUpdates::default()
            },
        },
    )
    .unwrap()
    .project
}

#[test]
fn test_document_shape() {
    let project = survey();
    let result = compile_to_html(&project, CompileOptions::default());

    assert!(result.starts_with("<!DOCTYPE html>"));
    assert!(result.contains("<title>Feedback Survey</title>"));
    assert!(result.contains("<h1>Feedback Survey</h1>"));
    assert!(result.contains("<fieldset>"));
    assert!(result.contains("<legend>New Section</legend>"));
    assert!(result.contains("type=\"email\""));
    assert!(result.contains(" required"));
    assert!(result.contains("type=\"radio\""));
    assert!(result.contains("<textarea"));
    assert!(result.contains("<button type=\"submit\">Submit Form</button>"));
    assert!(result.ends_with("</html>\n"));
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let project = survey();
    let first = compile_to_html(&project, CompileOptions::default());
    for _ in 0..3 {
        assert_eq!(compile_to_html(&project, CompileOptions::default()), first);
    }
}

#[test]
fn test_compact_output_has_no_newlines() {
    let project = survey();
    let result = compile_to_html(
        &project,
        CompileOptions {
            pretty: false,
            indent: String::new(),
            fieldsets: true,
        },
    );
    assert!(!result.contains('\n'));
    assert!(result.contains("<form method=\"post\">"));
}

#[test]
fn test_no_fieldsets_option() {
    let project = survey();
    let result = compile_to_html(
        &project,
        CompileOptions {
            fieldsets: false,
            ..CompileOptions::default()
        },
    );
    assert!(!result.contains("<fieldset>"));
    assert!(result.contains("type=\"email\""));
}

#[test]
fn test_markup_is_escaped() {
    let mut project = Project::new("Tom & \"Jerry\" <Forms>");
    project.description = String::new();
    let result = compile_to_html(&project, CompileOptions::default());
    assert!(result.contains("<h1>Tom &amp; &quot;Jerry&quot; &lt;Forms&gt;</h1>"));
}
