//! Campaign recipients from the internal database and the external directory.
//!
//! # Id namespaces
//!
//! Internal companies keep their database id. External companies are exposed
//! as `external_<id_empresa>`. The prefix is the only routing rule: an id
//! with the prefix is looked up in the external directory, every other id in
//! the database.
//!
//! Use `create_internal_source()` and `create_external_source()` to build the
//! sources from configuration.

mod external;
pub mod memory;
mod postgres;
mod resolver;
mod source;
mod types;

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ExternalApiConfig;

pub use external::HttpCompanyDirectory;
pub use memory::{InMemoryCompanyDirectory, InMemoryExternalDirectory};
pub use postgres::PgCompanyDirectory;
pub use resolver::{partition_ids, PartitionedIds, RecipientResolver};
pub use source::{ExternalRecipientSource, InternalRecipientSource};
pub use types::{
    external_id, ExternalCompany, InternalCompany, Recipient, RecipientDirectory, RecipientRecord,
    RecipientSourceError, EXTERNAL_ID_PREFIX,
};

/// Create the internal recipient source.
///
/// Returns a `PgCompanyDirectory` when a pool is available, otherwise an empty
/// in-memory directory.
pub fn create_internal_source(pool: Option<PgPool>) -> Arc<dyn InternalRecipientSource> {
    match pool {
        Some(pool) => {
            tracing::info!(backend = "postgres", "Creating internal company directory");
            Arc::new(PgCompanyDirectory::new(pool))
        }
        None => {
            tracing::warn!("No database configured, internal company directory is empty");
            Arc::new(InMemoryCompanyDirectory::default())
        }
    }
}

/// Create the external recipient source.
///
/// A disabled directory, or one whose HTTP client cannot be built, yields an
/// empty in-memory collection.
pub fn create_external_source(config: &ExternalApiConfig) -> Arc<dyn ExternalRecipientSource> {
    if !config.enabled {
        tracing::info!("External company directory disabled");
        return Arc::new(InMemoryExternalDirectory::default());
    }

    match HttpCompanyDirectory::new(config) {
        Ok(directory) => {
            tracing::info!(url = %config.url, "Creating external company directory");
            Arc::new(directory)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Failed to build external directory client, falling back to empty directory"
            );
            Arc::new(InMemoryExternalDirectory::default())
        }
    }
}
