//! # URL Processing Form
//!
//! Local state of the "process a URL" modal plus the precondition check that
//! runs before anything is sent.

use std::fmt;

use crate::gateway::ProcessMode;

/// Input that fails a local precondition. The request is never issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyUrl,
    InvalidUrl(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyUrl => write!(f, "Please enter a news URL"),
            ValidationError::InvalidUrl(_) => write!(f, "Please enter a valid URL"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trims and parses a user-entered URL.
pub fn validate_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    url::Url::parse(trimmed)
        .map(|_| trimmed.to_string())
        .map_err(|e| ValidationError::InvalidUrl(e.to_string()))
}

#[derive(Debug, Default)]
pub struct ProcessForm {
    pub url: String,
    pub mode: ProcessMode,
    pub submitting: bool,
}

impl ProcessForm {
    pub fn clear(&mut self) {
        self.url.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_is_rejected() {
        assert_eq!(validate_url("   "), Err(ValidationError::EmptyUrl));
    }

    #[test]
    fn test_relative_url_is_rejected() {
        assert!(matches!(
            validate_url("example.com/article"),
            Err(ValidationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_valid_url_is_trimmed() {
        assert_eq!(
            validate_url("  https://news.example.com/a/1 "),
            Ok("https://news.example.com/a/1".to_string())
        );
    }

    #[test]
    fn test_clear_keeps_mode() {
        let mut form = ProcessForm {
            url: "https://x.io".to_string(),
            mode: ProcessMode::Parse,
            submitting: false,
        };
        form.clear();
        assert!(form.url.is_empty());
        assert_eq!(form.mode, ProcessMode::Parse);
    }
}
