//! Source traits for campaign recipients.
//!
//! The resolver only sees these traits, so tests and development setups can
//! swap in in-memory directories without touching a database or the network.

use async_trait::async_trait;

use super::types::{ExternalCompany, InternalCompany, RecipientSourceError};

/// Companies stored in the platform's own database.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one instance is shared by all
/// concurrent campaign requests.
#[async_trait]
pub trait InternalRecipientSource: Send + Sync {
    /// Fetch approved companies.
    ///
    /// `None` returns every approved company, `Some(ids)` only those whose
    /// id is listed. Unknown ids are ignored.
    async fn approved_companies(
        &self,
        ids: Option<&[String]>,
    ) -> Result<Vec<InternalCompany>, RecipientSourceError>;
}

/// Companies published by the third-party directory API.
#[async_trait]
pub trait ExternalRecipientSource: Send + Sync {
    /// Fetch the whole external collection. No server-side filtering.
    async fn fetch_all(&self) -> Result<Vec<ExternalCompany>, RecipientSourceError>;
}
