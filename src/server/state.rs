use std::sync::Arc;
use std::time::Instant;

use crate::campaign::{BulkDispatcher, CampaignService};
use crate::config::Settings;
use crate::error::AppError;
use crate::mail::create_mail_sender;
use crate::postgres::PostgresPool;
use crate::recipients::{create_external_source, create_internal_source, RecipientResolver};
use crate::template::{create_template_store, TemplateStore};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub template_store: Arc<TemplateStore>,
    pub campaign_service: Arc<CampaignService>,
    pub postgres_pool: Option<PostgresPool>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        settings: Settings,
        template_store: Arc<TemplateStore>,
        campaign_service: Arc<CampaignService>,
        postgres_pool: Option<PostgresPool>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            template_store,
            campaign_service,
            postgres_pool,
            start_time: Instant::now(),
        }
    }

    /// Wire every collaborator from configuration.
    pub fn from_settings(settings: Settings) -> Result<Self, AppError> {
        let template_store =
            create_template_store().map_err(|e| AppError::Internal(e.to_string()))?;

        let postgres_pool = match settings.database.url {
            Some(_) => Some(
                PostgresPool::new(&settings.database)
                    .map_err(|e| AppError::Internal(e.to_string()))?,
            ),
            None => None,
        };

        let internal = create_internal_source(postgres_pool.as_ref().map(|p| p.pool().clone()));
        let external = create_external_source(&settings.external_api);
        let resolver = Arc::new(RecipientResolver::new(internal, external));

        let sender =
            create_mail_sender(&settings.mail).map_err(|e| AppError::Internal(e.to_string()))?;
        let dispatcher = Arc::new(BulkDispatcher::new(template_store.clone(), sender));

        let campaign_service = Arc::new(CampaignService::new(resolver, dispatcher));

        tracing::info!(
            templates = template_store.count(),
            postgres = postgres_pool.is_some(),
            external_api = settings.external_api.enabled,
            mail_provider = %settings.mail.provider,
            "Application state initialized"
        );

        Ok(Self::new(
            settings,
            template_store,
            campaign_service,
            postgres_pool,
        ))
    }
}
