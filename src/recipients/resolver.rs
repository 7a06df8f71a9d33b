//! Merges internal and external companies into one recipient list.

use std::collections::HashSet;
use std::sync::Arc;

use crate::metrics::RecipientMetrics;

use super::source::{ExternalRecipientSource, InternalRecipientSource};
use super::types::{
    ExternalCompany, Recipient, RecipientDirectory, RecipientRecord, RecipientSourceError,
    EXTERNAL_ID_PREFIX,
};

/// Selected ids split by namespace
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PartitionedIds {
    /// Ids routed to the internal source, as given
    pub internal: Vec<String>,
    /// Native external ids, prefix stripped
    pub external: Vec<i64>,
    /// `external_` ids whose suffix is not a number
    pub invalid: Vec<String>,
}

/// Route every id to exactly one source.
///
/// Ids starting with `external_` go to the external source, all others to the
/// internal source.
pub fn partition_ids(ids: &[String]) -> PartitionedIds {
    let mut partitioned = PartitionedIds::default();

    for id in ids {
        match id.strip_prefix(EXTERNAL_ID_PREFIX) {
            Some(native) => match native.parse::<i64>() {
                Ok(native_id) => partitioned.external.push(native_id),
                Err(_) => partitioned.invalid.push(id.clone()),
            },
            None => partitioned.internal.push(id.clone()),
        }
    }

    partitioned
}

/// Resolves campaign candidates from both company sources.
///
/// Holds no cache: every call re-reads both sources.
pub struct RecipientResolver {
    internal: Arc<dyn InternalRecipientSource>,
    external: Arc<dyn ExternalRecipientSource>,
}

impl RecipientResolver {
    pub fn new(
        internal: Arc<dyn InternalRecipientSource>,
        external: Arc<dyn ExternalRecipientSource>,
    ) -> Self {
        Self { internal, external }
    }

    /// Resolve the selected ids into recipients, sorted by name.
    ///
    /// Unknown ids are dropped. Internal source failures propagate; external
    /// failures degrade to no external recipients.
    #[tracing::instrument(
        name = "resolver.resolve_candidates",
        skip(self, selected_ids),
        fields(selected = selected_ids.len())
    )]
    pub async fn resolve_candidates(
        &self,
        selected_ids: &[String],
    ) -> Result<Vec<RecipientRecord>, RecipientSourceError> {
        let ids = partition_ids(selected_ids);

        if !ids.invalid.is_empty() {
            tracing::warn!(
                ids = ?ids.invalid,
                "Ignoring external ids without a numeric identifier"
            );
        }

        let internal = if ids.internal.is_empty() {
            Vec::new()
        } else {
            self.internal
                .approved_companies(Some(ids.internal.as_slice()))
                .await?
        };

        let external = if ids.external.is_empty() {
            Vec::new()
        } else {
            let wanted: HashSet<i64> = ids.external.iter().copied().collect();
            self.fetch_external()
                .await
                .into_iter()
                .filter(|company| wanted.contains(&company.id_empresa))
                .collect()
        };

        let recipients = merge(
            internal.into_iter().map(Recipient::from),
            external.into_iter().map(Recipient::from),
        );

        tracing::debug!(
            requested = selected_ids.len(),
            resolved = recipients.len(),
            "Resolved campaign candidates"
        );

        Ok(recipients)
    }

    /// Every approved internal company plus the full external collection.
    #[tracing::instrument(name = "resolver.resolve_all", skip(self))]
    pub async fn resolve_all(&self) -> Result<RecipientDirectory, RecipientSourceError> {
        let internal = self.internal.approved_companies(None).await?;
        let external = self.fetch_external().await;

        let recipients = merge(
            internal.into_iter().map(Recipient::from),
            external.into_iter().map(Recipient::from),
        );

        Ok(RecipientDirectory::new(recipients))
    }

    /// Fetch the external collection, degrading to empty on any failure.
    async fn fetch_external(&self) -> Vec<ExternalCompany> {
        match self.external.fetch_all().await {
            Ok(companies) => companies,
            Err(e) => {
                RecipientMetrics::record_external_fetch_failure();
                tracing::warn!(
                    error = %e,
                    "External company directory unavailable, continuing with internal companies only"
                );
                Vec::new()
            }
        }
    }
}

/// Concatenate, drop repeated ids, and sort by name.
fn merge(
    internal: impl Iterator<Item = Recipient>,
    external: impl Iterator<Item = Recipient>,
) -> Vec<RecipientRecord> {
    let mut seen = HashSet::new();
    let mut recipients: Vec<RecipientRecord> = internal
        .chain(external)
        .map(Recipient::into_record)
        .filter(|record| seen.insert(record.id.clone()))
        .collect();

    recipients.sort_by(|a, b| a.name.cmp(&b.name));

    let external_count = recipients.iter().filter(|r| r.is_external).count();
    RecipientMetrics::record_resolved("internal", (recipients.len() - external_count) as u64);
    RecipientMetrics::record_resolved("external", external_count as u64);

    recipients
}
