//! HTML page generator.

use dynform::render::ERROR_MESSAGE_CLASS;
use dynform::{
    Border, ButtonKind, Control, FieldContainer, FieldValues, FormContainer, Phase,
};

/// Options for HTML generation.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Title for the HTML document.
    pub title: Option<String>,
    /// Whether to include default CSS styling.
    pub include_styles: bool,
    /// Whether to generate a complete HTML document (with html/head/body tags).
    pub full_document: bool,
    /// Id of the element the page is mounted into.
    pub mount_id: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self {
            title: None,
            include_styles: true,
            full_document: true,
            mount_id: "app".to_string(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable default CSS styling.
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    /// Generate a complete HTML document or just the mount fragment.
    pub fn full_document(mut self, full: bool) -> Self {
        self.full_document = full;
        self
    }

    /// Set the mount element id.
    pub fn with_mount_id(mut self, mount_id: impl Into<String>) -> Self {
        self.mount_id = mount_id.into();
        self
    }
}

/// Generate the page for `phase`.
///
/// Loading and error phases show their message inside the mount element;
/// a ready phase shows the form with its current values and errors.
pub fn to_html<S, K>(phase: &Phase<S, K>, options: &HtmlOptions) -> String {
    let body = match phase {
        Phase::Ready(form) => generate_form(form.view(), form.values(), 2),
        Phase::Loading => format!(
            "    <p class=\"loading-message\">{}</p>\n",
            escape_html(phase.status_message().unwrap_or_default())
        ),
        Phase::Error { message } => format!(
            "    <p class=\"{ERROR_MESSAGE_CLASS}\">{}</p>\n",
            escape_html(message)
        ),
    };
    wrap_page(&body, options)
}

/// Generate the page for a rendered form and its values.
pub fn form_to_html(view: &FormContainer, values: &FieldValues, options: &HtmlOptions) -> String {
    wrap_page(&generate_form(view, values, 2), options)
}

fn wrap_page(body: &str, options: &HtmlOptions) -> String {
    let mut html = String::new();

    if options.full_document {
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );

        if let Some(title) = &options.title {
            html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
        }

        if options.include_styles {
            html.push_str(STYLES);
        }

        html.push_str("</head>\n<body>\n");
    }

    html.push_str(&format!(
        "<div id=\"{}\">\n",
        escape_html(&options.mount_id)
    ));
    if let Some(title) = &options.title {
        html.push_str(&format!("  <h1>{}</h1>\n", escape_html(title)));
    }
    html.push_str(body);
    html.push_str("</div>\n");

    if options.full_document {
        html.push_str("</body>\n</html>\n");
    }

    html
}

fn generate_form(view: &FormContainer, values: &FieldValues, indent: usize) -> String {
    let ind = "  ".repeat(indent);
    let id = escape_html(view.id());
    let mut html = format!("{ind}<form class=\"{id}\" id=\"{id}\">\n");

    for field in view.fields() {
        html.push_str(&generate_field(field, values, indent + 1));
    }

    for notice in view.notices() {
        html.push_str(&format!(
            "{ind}  <div class=\"{}\">{}</div>\n",
            escape_html(&notice.class),
            escape_html(&notice.text)
        ));
    }

    if !view.buttons().is_empty() {
        html.push_str(&format!("{ind}  <div class=\"form-buttons\">\n"));
        for button in view.buttons() {
            let kind = match button.kind {
                ButtonKind::Submit => "submit",
                ButtonKind::Reset => "reset",
            };
            html.push_str(&format!(
                "{ind}    <button type=\"{kind}\">{}</button>\n",
                escape_html(&button.text)
            ));
        }
        html.push_str(&format!("{ind}  </div>\n"));
    }

    html.push_str(&format!("{ind}</form>\n"));
    html
}

/// Generate HTML for one field container.
fn generate_field(field: &FieldContainer, values: &FieldValues, indent: usize) -> String {
    let ind = "  ".repeat(indent);
    let id = escape_html(&field.id);
    let style = match field.border() {
        Border::Error => " style=\"border-color: red\"",
        Border::Default => "",
    };
    let mut html = String::new();

    if let Control::Group { legend, fields } = &field.control {
        html.push_str(&format!("{ind}<fieldset id=\"{id}\"{style}>\n"));
        html.push_str(&format!("{ind}  <legend>{}</legend>\n", escape_html(legend)));
        for nested in fields {
            html.push_str(&generate_field(nested, values, indent + 1));
        }
        html.push_str(&format!("{ind}</fieldset>\n"));
        return html;
    }

    html.push_str(&format!("{ind}<div class=\"form-field\">\n"));
    html.push_str(&format!(
        "{ind}  <label for=\"{}\">{}</label>\n",
        escape_html(&field.label.html_for),
        escape_html(&field.label.text)
    ));

    match &field.control {
        Control::TextEntry {
            input_type,
            required,
            placeholder,
            pattern,
            min,
            max,
            ..
        } => {
            let mut attrs = format!(
                " type=\"{}\" id=\"{id}\" name=\"{id}\" placeholder=\"{}\"",
                input_type.as_str(),
                escape_html(placeholder)
            );
            let value = values.text(&field.id);
            if !value.is_empty() {
                attrs.push_str(&format!(" value=\"{}\"", escape_html(value)));
            }
            if *required {
                attrs.push_str(" required");
            }
            if let Some(pattern) = pattern {
                attrs.push_str(&format!(" pattern=\"{}\"", escape_html(pattern.as_str())));
            }
            if let Some(min) = min {
                attrs.push_str(&format!(" min=\"{min}\""));
            }
            if let Some(max) = max {
                attrs.push_str(&format!(" max=\"{max}\""));
            }
            html.push_str(&format!("{ind}  <input{attrs}{style}>\n"));
        }

        Control::Choice { required, options } => {
            let required = if *required { " required" } else { "" };
            let current = values.text(&field.id);
            html.push_str(&format!(
                "{ind}  <select id=\"{id}\" name=\"{id}\"{required}{style}>\n"
            ));
            for option in options {
                let selected = if option == current { " selected" } else { "" };
                let option = escape_html(option);
                html.push_str(&format!(
                    "{ind}    <option value=\"{option}\"{selected}>{option}</option>\n"
                ));
            }
            html.push_str(&format!("{ind}  </select>\n"));
        }

        Control::Toggle { required, .. } => {
            let required = if *required { " required" } else { "" };
            let checked = if values.flag(&field.id) { " checked" } else { "" };
            html.push_str(&format!(
                "{ind}  <input type=\"checkbox\" id=\"{id}\" name=\"{id}\"{required}{checked}{style}>\n"
            ));
        }

        Control::Group { .. } => {}
    }

    if let Some(message) = field.error_message() {
        html.push_str(&format!(
            "{ind}  <div class=\"{ERROR_MESSAGE_CLASS}\">{}</div>\n",
            escape_html(message)
        ));
    }

    html.push_str(&format!("{ind}</div>\n"));
    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const STYLES: &str = r#"  <style>
    .form-container {
      max-width: 600px;
      margin: 2rem auto;
      padding: 1rem;
      font-family: sans-serif;
    }
    .form-field {
      margin: 0.5rem 0;
    }
    .form-field label {
      display: block;
      margin-bottom: 0.25rem;
    }
    .form-field input, .form-field select {
      width: 100%;
      padding: 0.5rem;
      box-sizing: border-box;
    }
    .form-field input[type="checkbox"] {
      width: auto;
    }
    fieldset {
      margin: 1rem 0;
      padding: 1rem;
    }
    .error-message, .input-type-error-message {
      color: red;
      font-size: 0.875rem;
      margin-top: 0.25rem;
    }
    .form-buttons {
      margin-top: 1rem;
      display: flex;
      gap: 0.5rem;
    }
    .form-buttons button {
      padding: 0.5rem 1rem;
    }
  </style>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn fragment_has_no_document_shell() {
        let options = HtmlOptions::new().full_document(false).with_mount_id("root");
        let html = form_to_html(&FormContainer::new(), &FieldValues::new(), &options);

        assert!(!html.contains("<!DOCTYPE html>"));
        assert!(html.starts_with("<div id=\"root\">"));
        assert!(html.contains("<form class=\"form-container\" id=\"form-container\">"));
    }
}
