use super::DomainError;

/// Accepts any present value. Absent and JSON `null` both arrive as `None`.
pub fn required<T>(field: &'static str, value: Option<T>) -> Result<T, DomainError> {
    value.ok_or(DomainError::MissingField(field))
}

/// Like [`required`], but a blank string counts as missing too.
pub fn required_text(field: &'static str, value: Option<String>) -> Result<String, DomainError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(DomainError::MissingField(field)),
    }
}
