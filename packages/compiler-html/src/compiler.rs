use formcraft_model::{Field, FieldType, Project, Section};
use serde::{Deserialize, Serialize};

/// Options for HTML compilation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Wrap each section in a fieldset with a legend
    pub fieldsets: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            fieldsets: true,
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a form document to a standalone HTML page. Fields are emitted in
/// document order; the same document always yields byte-identical output.
pub fn compile_to_html(project: &Project, options: CompileOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(project, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line(&format!("<h1>{}</h1>", escape(&project.title)));
    if !project.description.is_empty() {
        ctx.add_line(&format!("<p>{}</p>", escape(&project.description)));
    }

    ctx.add_line("<form method=\"post\">");
    ctx.indent();
    for page in project.pages_ordered() {
        for section in page.sections_ordered() {
            compile_section(project, section, &mut ctx);
        }
    }
    ctx.add_line(&format!(
        "<button type=\"submit\">{}</button>",
        escape(&project.settings.submit_button_text)
    ));
    ctx.dedent();
    ctx.add_line("</form>");

    ctx.dedent();
    ctx.add_line("</body>");
    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn compile_head(project: &Project, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"utf-8\">");
    ctx.add_line(&format!("<title>{}</title>", escape(&project.title)));
    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_section(project: &Project, section: &Section, ctx: &mut Context) {
    let fieldsets = ctx.options.fieldsets;
    if fieldsets {
        ctx.add_line("<fieldset>");
        ctx.indent();
        ctx.add_line(&format!("<legend>{}</legend>", escape(&section.title)));
    }
    for field_id in &section.fields {
        if let Some(field) = project.field(field_id) {
            compile_field(field, ctx);
        }
    }
    if fieldsets {
        ctx.dedent();
        ctx.add_line("</fieldset>");
    }
}

fn compile_field(field: &Field, ctx: &mut Context) {
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
        FieldType::Radio => compile_choices(field, "radio", ctx),
        FieldType::Checkbox => compile_choices(field, "checkbox", ctx),
        FieldType::Switch => compile_switch(field, ctx),
        FieldType::Heading => ctx.add_line(&format!("<h2>{}</h2>", escape(&field.label))),
        FieldType::Paragraph => ctx.add_line(&format!(
            "<p>{}</p>",
            escape(field.description.as_deref().unwrap_or(&field.label))
        )),
        FieldType::Divider => ctx.add_line("<hr>"),
        FieldType::Spacer => ctx.add_line("<br>"),
        FieldType::Rating | FieldType::Location | FieldType::Payment | FieldType::Image
        | FieldType::Matrix => {
            ctx.add_line(&format!(
                "<!-- {} field: {} -->",
                field.field_type.name(),
                escape(&field.label)
            ));
        }
    }
}

fn compile_label(field: &Field, ctx: &mut Context) {
    ctx.add_line(&format!(
        "<label for=\"{}\">{}{}</label>",
        field.id,
        escape(&field.label),
        if field.is_required() { " *" } else { "" }
    ));
}

fn compile_input(field: &Field, ctx: &mut Context) {
    ctx.add_line("<div>");
    ctx.indent();
    compile_label(field, ctx);
    let mut attrs = format!(
        "type=\"{}\" id=\"{}\" name=\"{}\"",
        input_type(field.field_type),
        field.id,
        field.id
    );
    if let Some(placeholder) = &field.placeholder {
        attrs.push_str(&format!(" placeholder=\"{}\"", escape(placeholder)));
    }
    if let Some(min) = field.validation.min {
        attrs.push_str(&format!(" min=\"{}\"", min));
    }
    if let Some(max) = field.validation.max {
        attrs.push_str(&format!(" max=\"{}\"", max));
    }
    if field.is_required() {
        attrs.push_str(" required");
    }
    ctx.add_line(&format!("<input {}>", attrs));
    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_textarea(field: &Field, ctx: &mut Context) {
    ctx.add_line("<div>");
    ctx.indent();
    compile_label(field, ctx);
    ctx.add_line(&format!(
        "<textarea id=\"{}\" name=\"{}\" rows=\"{}\"{}{}></textarea>",
        field.id,
        field.id,
        field.rows.unwrap_or(3),
        field
            .placeholder
            .as_deref()
            .map(|p| format!(" placeholder=\"{}\"", escape(p)))
            .unwrap_or_default(),
        if field.is_required() { " required" } else { "" }
    ));
    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_select(field: &Field, ctx: &mut Context) {
    ctx.add_line("<div>");
    ctx.indent();
    compile_label(field, ctx);
    ctx.add_line(&format!(
        "<select id=\"{}\" name=\"{}\"{}>",
        field.id,
        field.id,
        if field.is_required() { " required" } else { "" }
    ));
    ctx.indent();
    ctx.add_line(&format!(
        "<option value=\"\">{}</option>",
        escape(field.placeholder.as_deref().unwrap_or("Select an option"))
    ));
    for option in field.options.as_deref().unwrap_or_default() {
        ctx.add_line(&format!(
            "<option value=\"{}\">{}</option>",
            escape(option),
            escape(option)
        ));
    }
    ctx.dedent();
    ctx.add_line("</select>");
    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_choices(field: &Field, kind: &str, ctx: &mut Context) {
    ctx.add_line("<div>");
    ctx.indent();
    ctx.add_line(&format!(
        "<p>{}{}</p>",
        escape(&field.label),
        if field.is_required() { " *" } else { "" }
    ));
    for option in field.options.as_deref().unwrap_or_default() {
        ctx.add_line(&format!(
            "<label><input type=\"{}\" name=\"{}\" value=\"{}\"> {}</label>",
            kind,
            field.id,
            escape(option),
            escape(option)
        ));
    }
    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_switch(field: &Field, ctx: &mut Context) {
    ctx.add_line("<div>");
    ctx.indent();
    ctx.add_line(&format!(
        "<label><input type=\"checkbox\" id=\"{}\" name=\"{}\"{}> {}</label>",
        field.id,
        field.id,
        if field.is_required() { " required" } else { "" },
        escape(&field.label)
    ));
    ctx.dedent();
    ctx.add_line("</div>");
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

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
