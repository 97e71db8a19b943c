//! Field checks for incoming chat and message payloads.
//!
//! Both checks trim surrounding whitespace first; emptiness and the length
//! bound apply to the trimmed value, and the trimmed value is what callers
//! persist. Length is counted in UTF-8 bytes.

use thiserror::Error;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_TEXT_LEN: usize = 5000;

/// A single field of a request failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

pub fn validate_chat_title(title: &str) -> Result<String, ValidationError> {
    normalize("title", title, MAX_TITLE_LEN)
}

pub fn validate_message_text(text: &str) -> Result<String, ValidationError> {
    normalize("text", text, MAX_TEXT_LEN)
}

fn normalize(field: &'static str, raw: &str, max_len: usize) -> Result<String, ValidationError> {
    let value = raw.trim().to_owned();

    if value.is_empty() {
        return Err(ValidationError::new(field, format!("{field} cannot be empty")));
    }

    if value.len() > max_len {
        return Err(ValidationError::new(
            field,
            format!("{field} must be less than {max_len} characters"),
        ));
    }

    Ok(value)
}
