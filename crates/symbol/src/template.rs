use thiserror::Error;
use crate::Row;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unknown placeholder. name: '{0}'")]
    UnknownPlaceholder(String),

    #[error("Unterminated placeholder. text: '{0}'")]
    Unterminated(String),
}

/// Replaces every `${column}` in `text` with the value of that column in `row`.
pub fn substitute(text: &str, row: &Row) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(text.len());
    let mut remainder = text;

    while let Some(start) = remainder.find("${") {
        result.push_str(&remainder[..start]);
        let after = &remainder[start + 2..];
        let end = after.find('}')
            .ok_or_else(|| TemplateError::Unterminated(text.to_string()))?;

        let column = &after[..end];
        let value = row.get(column)
            .ok_or_else(|| TemplateError::UnknownPlaceholder(column.to_string()))?;
        result.push_str(value);

        remainder = &after[end + 1..];
    }
    result.push_str(remainder);

    Ok(result)
}
