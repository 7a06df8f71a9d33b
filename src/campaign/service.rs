use std::sync::Arc;

use serde_json::Value;

use crate::recipients::{RecipientDirectory, RecipientResolver};
use crate::template::{TemplateData, COMPANY_CAMPAIGN};

use super::dispatcher::BulkDispatcher;
use super::types::{CampaignError, CampaignRequest, CampaignResult};

/// Runs company email campaigns end to end: resolve, then dispatch.
pub struct CampaignService {
    resolver: Arc<RecipientResolver>,
    dispatcher: Arc<BulkDispatcher>,
}

impl CampaignService {
    pub fn new(resolver: Arc<RecipientResolver>, dispatcher: Arc<BulkDispatcher>) -> Self {
        Self {
            resolver,
            dispatcher,
        }
    }

    /// Run a campaign request.
    ///
    /// This awaits every send before returning; there is no progress report
    /// and no way to stop a campaign once dispatch has started.
    #[tracing::instrument(
        name = "campaign.run",
        skip(self, request),
        fields(
            campaign_id = %uuid::Uuid::new_v4(),
            company_ids = request.company_ids.len(),
            custom_emails = request.custom_emails.len()
        )
    )]
    pub async fn run(&self, request: CampaignRequest) -> Result<CampaignResult, CampaignError> {
        let base_data = template_data(request.template_data)?;
        let template = request
            .template
            .unwrap_or_else(|| COMPANY_CAMPAIGN.to_string());

        let recipients = if request.company_ids.is_empty() {
            Vec::new()
        } else {
            self.resolver.resolve_candidates(&request.company_ids).await?
        };

        self.dispatcher
            .dispatch(&recipients, &request.custom_emails, &template, &base_data)
            .await
    }

    /// Every company a campaign can target
    pub async fn directory(&self) -> Result<RecipientDirectory, CampaignError> {
        Ok(self.resolver.resolve_all().await?)
    }
}

/// Validate the request's template data
fn template_data(value: Option<Value>) -> Result<TemplateData, CampaignError> {
    match value {
        None | Some(Value::Null) => Ok(TemplateData::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(CampaignError::InvalidTemplateData(
            "templateData must be an object".to_string(),
        )),
    }
}
