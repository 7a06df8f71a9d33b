//! Campaign request/result types and error definitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recipients::RecipientSourceError;
use crate::template::TemplateError;

/// Campaign-specific error type
#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("No recipients selected")]
    NoRecipients,

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid template data: {0}")]
    InvalidTemplateData(String),

    #[error("Template error: {0}")]
    Template(TemplateError),

    #[error("Recipient source error: {0}")]
    Source(#[from] RecipientSourceError),
}

impl From<TemplateError> for CampaignError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound(name) => CampaignError::TemplateNotFound(name),
            other => CampaignError::Template(other),
        }
    }
}

/// A free-form recipient not present in either company source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEmail {
    pub name: String,
    pub email: String,
}

impl CustomEmail {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Request body of a company email campaign
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRequest {
    /// Selected company ids, internal or `external_<id>`
    #[serde(default)]
    pub company_ids: Vec<String>,

    /// Additional addresses outside both directories
    #[serde(default)]
    pub custom_emails: Vec<CustomEmail>,

    /// Base data for every message (must be an object)
    #[serde(default)]
    pub template_data: Option<serde_json::Value>,

    /// Template to use (defaults to `companyCampaign`)
    #[serde(default)]
    pub template: Option<String>,
}

/// Summary of a dispatched campaign
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResult {
    /// Resolved company recipients processed
    pub total_companies: usize,

    /// Custom addresses processed
    pub total_custom_emails: usize,

    pub sent: usize,
    pub failed: usize,

    /// One entry per failed recipient, in dispatch order
    pub errors: Vec<String>,
}

impl CampaignResult {
    pub fn new(total_companies: usize, total_custom_emails: usize) -> Self {
        Self {
            total_companies,
            total_custom_emails,
            ..Default::default()
        }
    }

    pub(crate) fn record_sent(&mut self) {
        self.sent += 1;
    }

    pub(crate) fn record_failure(&mut self, error: String) {
        self.failed += 1;
        self.errors.push(error);
    }

    /// Total number of send attempts
    pub fn attempted(&self) -> usize {
        self.sent + self.failed
    }
}
