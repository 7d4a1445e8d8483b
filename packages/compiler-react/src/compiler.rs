use crate::context::{CompileOptions, CompilerContext};
use formcraft_model::{Field, FieldType, Project};

/// Compile a form document to a React function component.
///
/// Placed fields are emitted in document order (pages, then sections, then
/// the section's field order); orphaned fields are skipped. Output is
/// byte-identical for identical documents.
pub fn compile_to_react(project: &Project, options: CompileOptions) -> String {
    let ctx = CompilerContext::new(options);

    compile_imports(&ctx);
    if ctx.options.use_typescript {
        ctx.add(&crate::definitions::compile_value_definitions(project));
        ctx.add("\n");
    }
    compile_component(project, &ctx);

    ctx.get_output()
}

fn compile_imports(ctx: &CompilerContext) {
    ctx.add_line("import React, { useState } from 'react'");
    ctx.add_line("import { Button } from '@/components/ui/button'");
    ctx.add_line("import { Input } from '@/components/ui/input'");
    ctx.add_line("import { Textarea } from '@/components/ui/textarea'");
    ctx.add_line(
        "import { Select, SelectContent, SelectItem, SelectTrigger, SelectValue } from '@/components/ui/select'",
    );
    ctx.add_line("import { Checkbox } from '@/components/ui/checkbox'");
    ctx.add_line("import { RadioGroup, RadioGroupItem } from '@/components/ui/radio-group'");
    ctx.add_line("import { Label } from '@/components/ui/label'");
    ctx.add("\n");
}

fn compile_component(project: &Project, ctx: &CompilerContext) {
    let name = ctx
        .options
        .component_name
        .clone()
        .unwrap_or_else(|| component_name(&project.title));

    ctx.add_line(&format!("export default function {}() {{", name));
    ctx.indent();
    if ctx.options.use_typescript {
        ctx.add_line("const [formData, setFormData] = useState<FormValues>({})");
    } else {
        ctx.add_line("const [formData, setFormData] = useState({})");
    }
    ctx.add_line("const [isSubmitting, setIsSubmitting] = useState(false)");
    ctx.add("\n");

    compile_submit_handler(ctx);
    ctx.add("\n");

    ctx.add_line("return (");
    ctx.indent();
    ctx.add_line("<div className=\"max-w-2xl mx-auto p-6\">");
    ctx.indent();
    ctx.add_line("<div className=\"mb-6\">");
    ctx.indent();
    ctx.add_line(&format!(
        "<h1 className=\"text-2xl font-bold\">{}</h1>",
        escape_text(&project.title)
    ));
    if !project.description.is_empty() {
        ctx.add_line(&format!(
            "<p className=\"text-gray-600 mt-2\">{}</p>",
            escape_text(&project.description)
        ));
    }
    ctx.dedent();
    ctx.add_line("</div>");
    ctx.add("\n");

    ctx.add_line("<form onSubmit={handleSubmit} className=\"space-y-6\">");
    ctx.indent();
    for page in project.pages_ordered() {
        for section in page.sections_ordered() {
            for field_id in &section.fields {
                if let Some(field) = project.field(field_id) {
                    compile_field(field, ctx);
                }
            }
        }
    }
    ctx.add("\n");
    ctx.add_line("<Button type=\"submit\" disabled={isSubmitting} className=\"w-full\">");
    ctx.indent();
    ctx.add_line(&format!(
        "{{isSubmitting ? 'Submitting...' : '{}'}}",
        escape_js(&project.settings.submit_button_text)
    ));
    ctx.dedent();
    ctx.add_line("</Button>");
    ctx.dedent();
    ctx.add_line("</form>");
    ctx.dedent();
    ctx.add_line("</div>");
    ctx.dedent();
    ctx.add_line(")");
    ctx.dedent();
    ctx.add_line("}");
}

fn compile_submit_handler(ctx: &CompilerContext) {
    let event_type = if ctx.options.use_typescript {
        "e: React.FormEvent"
    } else {
        "e"
    };
    ctx.add_line(&format!("const handleSubmit = async ({}) => {{", event_type));
    ctx.indent();
    ctx.add_line("e.preventDefault()");
    ctx.add_line("setIsSubmitting(true)");
    ctx.add_line("try {");
    ctx.indent();
    ctx.add_line("console.log('Form submitted:', formData)");
    ctx.dedent();
    ctx.add_line("} finally {");
    ctx.indent();
    ctx.add_line("setIsSubmitting(false)");
    ctx.dedent();
    ctx.add_line("}");
    ctx.dedent();
    ctx.add_line("}");
}

fn compile_field(field: &Field, ctx: &CompilerContext) {
    match field.field_type {
        FieldType::Text
        | FieldType::Email
        | FieldType::Phone
        | FieldType::Number
        | FieldType::Date
        | FieldType::Time
        | FieldType::File
        | FieldType::Range => compile_input(field, ctx),
        FieldType::Textarea => compile_textarea(field, ctx),
        FieldType::Select => compile_select(field, ctx),
        FieldType::Radio => compile_radio(field, ctx),
        FieldType::Checkbox => compile_checkboxes(field, ctx),
        FieldType::Switch => compile_switch(field, ctx),
        FieldType::Heading => {
            ctx.add_line(&format!(
                "<h2 className=\"text-xl font-semibold\">{}</h2>",
                escape_text(&field.label)
            ));
        }
        FieldType::Paragraph => {
            ctx.add_line(&format!(
                "<p className=\"text-gray-600\">{}</p>",
                escape_text(field.description.as_deref().unwrap_or(&field.label))
            ));
        }
        FieldType::Divider => ctx.add_line("<hr className=\"my-4\" />"),
        FieldType::Spacer => ctx.add_line("<div className=\"h-8\" />"),
        // No portable control exists for these; the embedding app wires its
        // own widget against the same value key.
        FieldType::Rating
        | FieldType::Location
        | FieldType::Payment
        | FieldType::Image
        | FieldType::Matrix => {
            ctx.add_line(&format!(
                "{{/* {} field: {} */}}",
                field.field_type.name(),
                escape_text(&field.label)
            ));
        }
    }
}

fn compile_label(field: &Field, ctx: &CompilerContext) {
    ctx.add_line(&format!(
        "<Label htmlFor=\"{}\">{}{}</Label>",
        field.id,
        escape_text(&field.label),
        if field.is_required() { " *" } else { "" }
    ));
}

fn open_wrapper(ctx: &CompilerContext) {
    ctx.add_line("<div className=\"space-y-2\">");
    ctx.indent();
}

fn close_wrapper(ctx: &CompilerContext) {
    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_input(field: &Field, ctx: &CompilerContext) {
    open_wrapper(ctx);
    compile_label(field, ctx);
    ctx.add_line("<Input");
    ctx.indent();
    ctx.add_line(&format!("id=\"{}\"", field.id));
    ctx.add_line(&format!("type=\"{}\"", input_type(field.field_type)));
    if let Some(placeholder) = &field.placeholder {
        ctx.add_line(&format!("placeholder=\"{}\"", escape_attr(placeholder)));
    }
    if field.is_required() {
        ctx.add_line("required");
    }
    ctx.add_line(&format!("value={{{} || ''}}", value_expr(field)));
    ctx.add_line(&format!("onChange={{(e) => {}}}", set_expr(field, "e.target.value")));
    ctx.dedent();
    ctx.add_line("/>");
    close_wrapper(ctx);
}

fn compile_textarea(field: &Field, ctx: &CompilerContext) {
    open_wrapper(ctx);
    compile_label(field, ctx);
    ctx.add_line("<Textarea");
    ctx.indent();
    ctx.add_line(&format!("id=\"{}\"", field.id));
    if let Some(placeholder) = &field.placeholder {
        ctx.add_line(&format!("placeholder=\"{}\"", escape_attr(placeholder)));
    }
    ctx.add_line(&format!("rows={{{}}}", field.rows.unwrap_or(3)));
    if field.is_required() {
        ctx.add_line("required");
    }
    ctx.add_line(&format!("value={{{} || ''}}", value_expr(field)));
    ctx.add_line(&format!("onChange={{(e) => {}}}", set_expr(field, "e.target.value")));
    ctx.dedent();
    ctx.add_line("/>");
    close_wrapper(ctx);
}

fn compile_select(field: &Field, ctx: &CompilerContext) {
    open_wrapper(ctx);
    compile_label(field, ctx);
    ctx.add_line(&format!(
        "<Select onValueChange={{(value) => {}}}>",
        set_expr(field, "value")
    ));
    ctx.indent();
    ctx.add_line("<SelectTrigger>");
    ctx.indent();
    ctx.add_line(&format!(
        "<SelectValue placeholder=\"{}\" />",
        escape_attr(field.placeholder.as_deref().unwrap_or("Select an option"))
    ));
    ctx.dedent();
    ctx.add_line("</SelectTrigger>");
    ctx.add_line("<SelectContent>");
    ctx.indent();
    for option in field.options.as_deref().unwrap_or_default() {
        ctx.add_line(&format!(
            "<SelectItem value=\"{}\">{}</SelectItem>",
            escape_attr(option),
            escape_text(option)
        ));
    }
    ctx.dedent();
    ctx.add_line("</SelectContent>");
    ctx.dedent();
    ctx.add_line("</Select>");
    close_wrapper(ctx);
}

fn compile_radio(field: &Field, ctx: &CompilerContext) {
    open_wrapper(ctx);
    compile_label(field, ctx);
    ctx.add_line(&format!(
        "<RadioGroup onValueChange={{(value) => {}}}>",
        set_expr(field, "value")
    ));
    ctx.indent();
    for (index, option) in field.options.as_deref().unwrap_or_default().iter().enumerate() {
        ctx.add_line("<div className=\"flex items-center space-x-2\">");
        ctx.indent();
        ctx.add_line(&format!(
            "<RadioGroupItem value=\"{}\" id=\"{}-{}\" />",
            escape_attr(option),
            field.id,
            index
        ));
        ctx.add_line(&format!(
            "<Label htmlFor=\"{}-{}\">{}</Label>",
            field.id,
            index,
            escape_text(option)
        ));
        ctx.dedent();
        ctx.add_line("</div>");
    }
    ctx.dedent();
    ctx.add_line("</RadioGroup>");
    close_wrapper(ctx);
}

fn compile_checkboxes(field: &Field, ctx: &CompilerContext) {
    open_wrapper(ctx);
    compile_label(field, ctx);
    for (index, option) in field.options.as_deref().unwrap_or_default().iter().enumerate() {
        ctx.add_line("<div className=\"flex items-center space-x-2\">");
        ctx.indent();
        ctx.add_line(&format!("<Checkbox id=\"{}-{}\" />", field.id, index));
        ctx.add_line(&format!(
            "<Label htmlFor=\"{}-{}\">{}</Label>",
            field.id,
            index,
            escape_text(option)
        ));
        ctx.dedent();
        ctx.add_line("</div>");
    }
    close_wrapper(ctx);
}

fn compile_switch(field: &Field, ctx: &CompilerContext) {
    open_wrapper(ctx);
    ctx.add_line("<div className=\"flex items-center space-x-2\">");
    ctx.indent();
    ctx.add_line(&format!(
        "<Checkbox id=\"{}\" onCheckedChange={{(checked) => {}}} />",
        field.id,
        set_expr(field, "checked")
    ));
    ctx.add_line(&format!(
        "<Label htmlFor=\"{}\">{}{}</Label>",
        field.id,
        escape_text(&field.label),
        if field.is_required() { " *" } else { "" }
    ));
    ctx.dedent();
    ctx.add_line("</div>");
    close_wrapper(ctx);
}

fn input_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Email => "email",
        FieldType::Phone => "tel",
        FieldType::Number => "number",
        FieldType::Date => "date",
        FieldType::Time => "time",
        FieldType::File => "file",
        FieldType::Range => "range",
        _ => "text",
    }
}

/// Field ids carry hyphens, so the value store is indexed with brackets.
fn value_expr(field: &Field) -> String {
    format!("formData[\"{}\"]", field.id)
}

fn set_expr(field: &Field, source: &str) -> String {
    format!(
        "setFormData(prev => ({{ ...prev, \"{}\": {} }}))",
        field.id, source
    )
}

/// Derive a component name from the project title: alphanumerics only.
fn component_name(title: &str) -> String {
    let cleaned: String = title.chars().filter(|c| c.is_alphanumeric()).collect();
    if cleaned.is_empty() || cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Generated{}Form", cleaned)
    } else {
        format!("{}Form", cleaned)
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

fn escape_js(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}
