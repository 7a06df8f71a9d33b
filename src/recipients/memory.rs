//! In-memory company directories.
//!
//! Used when no database or external API is configured, and as fixtures in
//! tests.

use async_trait::async_trait;

use super::source::{ExternalRecipientSource, InternalRecipientSource};
use super::types::{ExternalCompany, InternalCompany, RecipientSourceError};

/// Fixed list of approved internal companies
#[derive(Debug, Clone, Default)]
pub struct InMemoryCompanyDirectory {
    companies: Vec<InternalCompany>,
}

impl InMemoryCompanyDirectory {
    pub fn new(companies: Vec<InternalCompany>) -> Self {
        Self { companies }
    }
}

#[async_trait]
impl InternalRecipientSource for InMemoryCompanyDirectory {
    async fn approved_companies(
        &self,
        ids: Option<&[String]>,
    ) -> Result<Vec<InternalCompany>, RecipientSourceError> {
        let companies = match ids {
            None => self.companies.clone(),
            Some(ids) => self
                .companies
                .iter()
                .filter(|company| ids.contains(&company.id))
                .cloned()
                .collect(),
        };

        Ok(companies)
    }
}

/// Fixed external collection
#[derive(Debug, Clone, Default)]
pub struct InMemoryExternalDirectory {
    companies: Vec<ExternalCompany>,
}

impl InMemoryExternalDirectory {
    pub fn new(companies: Vec<ExternalCompany>) -> Self {
        Self { companies }
    }
}

#[async_trait]
impl ExternalRecipientSource for InMemoryExternalDirectory {
    async fn fetch_all(&self) -> Result<Vec<ExternalCompany>, RecipientSourceError> {
        Ok(self.companies.clone())
    }
}
