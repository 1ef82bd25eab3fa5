// $id Templates
//
// A template is plain text with `{{ .Name }}` and `{{ .Format }}`
// placeholders; whitespace inside the braces is optional.

use thiserror::Error;

use super::format::OutputFormat;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unknown template field '{field}' in {template:?}")]
    UnknownField { field: String, template: String },
    #[error("Unterminated placeholder at offset {offset} in {template:?}")]
    Unterminated { offset: usize, template: String },
}

/// Expand the placeholders of an `$id` template
pub fn format_id_template(template: &str, name: &str, format: OutputFormat) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);

        let body = &rest[start + 2..];
        let end = body.find("}}").ok_or_else(|| TemplateError::Unterminated {
            offset: template.len() - rest.len() + start,
            template: template.to_string(),
        })?;

        match body[..end].trim() {
            ".Name" => output.push_str(name),
            ".Format" => output.push_str(format.as_str()),
            field => {
                return Err(TemplateError::UnknownField {
                    field: field.to_string(),
                    template: template.to_string(),
                });
            }
        }

        rest = &body[end + 2..];
    }

    output.push_str(rest);
    Ok(output)
}
