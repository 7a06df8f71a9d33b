//! Template types and error definitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Template-specific error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid template name: {0}")]
    InvalidName(String),

    /// `{{#if}}` blocks cannot contain other `{{#if}}` blocks.
    #[error("Nested conditional block '{inner}' inside '{outer}' is not supported")]
    NestedConditional { outer: String, inner: String },

    #[error("Conditional block '{0}' is missing its closing {{{{/if}}}}")]
    UnclosedConditional(String),

    #[error("Unexpected {{{{/if}}}} at byte offset {0}")]
    UnexpectedEndIf(usize),

    #[error("Malformed conditional marker at byte offset {0}")]
    MalformedConditional(usize),
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Placeholder values for a single render call.
///
/// Keys are matched exactly and case-sensitively. Values are expected to be
/// scalars; arrays and objects render as compact JSON.
pub type TemplateData = serde_json::Map<String, serde_json::Value>;

/// A named email template with subject, plain-text and HTML bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    /// Unique template name (e.g. `welcome`, `companyApproval`)
    pub name: String,

    /// Subject line with `{{placeholders}}`
    pub subject: String,

    /// Plain-text body
    pub text: String,

    /// HTML body, may contain `{{#if key}}...{{/if}}` blocks
    pub html: String,
}

impl TemplateRecord {
    pub fn new(
        name: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            text: text.into(),
            html: html.into(),
        }
    }

    /// Validate the template name
    pub fn validate(&self) -> TemplateResult<()> {
        if self.name.is_empty() || self.name.len() > 64 {
            return Err(TemplateError::InvalidName(
                "Name must be 1-64 characters".to_string(),
            ));
        }

        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(TemplateError::InvalidName(
                "Name must contain only alphanumeric, dash, or underscore".to_string(),
            ));
        }

        Ok(())
    }
}

/// Fully rendered email content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTemplate {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Response for listing templates
#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    /// Template names, sorted
    pub templates: Vec<String>,

    /// Total count
    pub total: usize,
}
