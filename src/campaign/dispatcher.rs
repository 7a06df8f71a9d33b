use std::sync::Arc;

use serde_json::Value;

use crate::mail::{MailSender, OutgoingMail};
use crate::metrics::CampaignMetrics;
use crate::recipients::RecipientRecord;
use crate::template::{CompiledTemplate, TemplateData, TemplateStore};

use super::types::{CampaignError, CampaignResult, CustomEmail};

/// Greeting used when a recipient has neither contact name nor name
pub const CONTACT_FALLBACK: &str = "Estimado/a";

/// Reason recorded when the transport fails without saying why
const UNKNOWN_ERROR: &str = "Unknown error";

/// Renders and sends one message per recipient.
///
/// Sends are strictly sequential: each message is awaited before the next one
/// starts, so `errors` follows recipient order. A failed recipient never stops
/// the batch.
pub struct BulkDispatcher {
    templates: Arc<TemplateStore>,
    sender: Arc<dyn MailSender>,
}

impl BulkDispatcher {
    pub fn new(templates: Arc<TemplateStore>, sender: Arc<dyn MailSender>) -> Self {
        Self { templates, sender }
    }

    /// Send `template_name` to every resolved recipient, then to every custom
    /// address.
    ///
    /// Fails before sending anything when there are no recipients at all or
    /// the template is unknown.
    #[tracing::instrument(
        name = "dispatcher.dispatch",
        skip(self, recipients, explicit, base_data),
        fields(
            template = %template_name,
            companies = recipients.len(),
            custom_emails = explicit.len()
        )
    )]
    pub async fn dispatch(
        &self,
        recipients: &[RecipientRecord],
        explicit: &[CustomEmail],
        template_name: &str,
        base_data: &TemplateData,
    ) -> Result<CampaignResult, CampaignError> {
        if recipients.is_empty() && explicit.is_empty() {
            CampaignMetrics::record_rejected();
            return Err(CampaignError::NoRecipients);
        }

        let template = match self.templates.compile(template_name) {
            Ok(template) => template,
            Err(err) => {
                CampaignMetrics::record_rejected();
                return Err(err.into());
            }
        };
        CampaignMetrics::record_started();

        let mut result = CampaignResult::new(recipients.len(), explicit.len());

        for recipient in recipients {
            let data = personalize(
                base_data,
                &recipient.name,
                &recipient.email,
                recipient.contact_name.as_deref(),
            );

            match self.deliver(&template, &recipient.email, &data).await {
                Ok(()) => result.record_sent(),
                Err(reason) => {
                    tracing::warn!(
                        recipient_id = %recipient.id,
                        email = %recipient.email,
                        reason = %reason,
                        "Campaign email failed"
                    );
                    result.record_failure(format!("{}: {}", recipient.name, reason));
                }
            }
        }

        for pair in explicit {
            let data = personalize(base_data, &pair.name, &pair.email, None);

            match self.deliver(&template, &pair.email, &data).await {
                Ok(()) => result.record_sent(),
                Err(reason) => {
                    tracing::warn!(
                        email = %pair.email,
                        reason = %reason,
                        "Campaign email to custom address failed"
                    );
                    result.record_failure(format!("{} ({}): {}", pair.name, pair.email, reason));
                }
            }
        }

        CampaignMetrics::record_completed(result.sent as u64, result.failed as u64);

        tracing::info!(
            template = %template_name,
            sent = result.sent,
            failed = result.failed,
            "Campaign dispatched"
        );

        Ok(result)
    }

    /// Render and send one message, returning the failure reason if any.
    async fn deliver(
        &self,
        template: &CompiledTemplate,
        to: &str,
        data: &TemplateData,
    ) -> Result<(), String> {
        let rendered = template.render(data);
        let message = OutgoingMail {
            to: to.to_string(),
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        };

        match self.sender.send(message).await {
            Ok(outcome) if outcome.success => {
                tracing::debug!(to = %to, "Campaign email sent");
                Ok(())
            }
            Ok(outcome) => Err(outcome.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string())),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Overlay recipient values on the campaign's base data.
///
/// `contactName` falls back to the recipient name, then to `"Estimado/a"`.
pub fn personalize(
    base: &TemplateData,
    name: &str,
    email: &str,
    contact_name: Option<&str>,
) -> TemplateData {
    let contact = contact_name
        .filter(|contact| !contact.is_empty())
        .or(Some(name).filter(|name| !name.is_empty()))
        .unwrap_or(CONTACT_FALLBACK);

    let mut data = base.clone();
    data.insert("companyName".to_string(), Value::String(name.to_string()));
    data.insert("email".to_string(), Value::String(email.to_string()));
    data.insert("contactName".to_string(), Value::String(contact.to_string()));
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::mail::{MailError, SendOutcome};
    use crate::template::TemplateRecord;

    /// Captures messages and fails for configured addresses
    #[derive(Default)]
    struct ScriptedSender {
        sent: Mutex<Vec<OutgoingMail>>,
        reject: Vec<String>,
        error: Vec<String>,
        silent_reject: Vec<String>,
    }

    #[async_trait]
    impl MailSender for ScriptedSender {
        async fn send(&self, message: OutgoingMail) -> Result<SendOutcome, MailError> {
            self.sent.lock().unwrap().push(message.clone());

            if self.reject.contains(&message.to) {
                return Ok(SendOutcome::rejected("mailbox unavailable"));
            }
            if self.silent_reject.contains(&message.to) {
                return Ok(SendOutcome {
                    success: false,
                    error: None,
                });
            }
            if self.error.contains(&message.to) {
                return Err(MailError::Configuration("connection reset".to_string()));
            }
            Ok(SendOutcome::delivered())
        }
    }

    impl ScriptedSender {
        fn recipients(&self) -> Vec<String> {
            self.sent.lock().unwrap().iter().map(|m| m.to.clone()).collect()
        }
    }

    fn store() -> Arc<TemplateStore> {
        Arc::new(
            TemplateStore::with_templates(vec![TemplateRecord::new(
                "campaign",
                "{{subject}}",
                "Hola {{contactName}}: {{message}}",
                "<p>{{companyName}} ({{email}})</p>{{#if footer}}<small>{{footer}}</small>{{/if}}",
            )])
            .unwrap(),
        )
    }

    fn recipient(id: &str, name: &str, contact: Option<&str>) -> RecipientRecord {
        RecipientRecord {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            contact_name: contact.map(str::to_string),
            is_external: id.starts_with("external_"),
        }
    }

    fn base_data() -> TemplateData {
        json!({"subject": "Feria de empleo", "message": "Los esperamos"})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_personalize_fallback_chain() {
        let base = TemplateData::new();

        let data = personalize(&base, "Acme", "a@acme.com", Some("Laura"));
        assert_eq!(data["contactName"], "Laura");

        let data = personalize(&base, "Acme", "a@acme.com", None);
        assert_eq!(data["contactName"], "Acme");

        let data = personalize(&base, "Acme", "a@acme.com", Some(""));
        assert_eq!(data["contactName"], "Acme");

        let data = personalize(&base, "", "a@acme.com", None);
        assert_eq!(data["contactName"], "Estimado/a");
    }

    #[test]
    fn test_personalize_overrides_base() {
        let mut base = base_data();
        base.insert("companyName".to_string(), json!("should be replaced"));

        let data = personalize(&base, "Acme", "a@acme.com", None);
        assert_eq!(data["companyName"], "Acme");
        assert_eq!(data["subject"], "Feria de empleo");
    }

    #[tokio::test]
    async fn test_empty_campaign_rejected_without_sending() {
        let sender = Arc::new(ScriptedSender::default());
        let dispatcher = BulkDispatcher::new(store(), sender.clone());

        let result = dispatcher.dispatch(&[], &[], "campaign", &base_data()).await;

        assert!(matches!(result, Err(CampaignError::NoRecipients)));
        assert!(sender.recipients().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_template_rejected_without_sending() {
        let sender = Arc::new(ScriptedSender::default());
        let dispatcher = BulkDispatcher::new(store(), sender.clone());

        let result = dispatcher
            .dispatch(&[recipient("c1", "Acme", None)], &[], "missing", &base_data())
            .await;

        assert!(matches!(result, Err(CampaignError::TemplateNotFound(name)) if name == "missing"));
        assert!(sender.recipients().is_empty());
    }

    #[tokio::test]
    async fn test_second_of_three_fails() {
        let sender = Arc::new(ScriptedSender {
            reject: vec!["c2@example.com".to_string()],
            ..Default::default()
        });
        let dispatcher = BulkDispatcher::new(store(), sender.clone());

        let recipients = vec![
            recipient("c1", "Acme", None),
            recipient("c2", "Globex", None),
            recipient("c3", "Initech", None),
        ];
        let result = dispatcher
            .dispatch(&recipients, &[], "campaign", &base_data())
            .await
            .unwrap();

        assert_eq!(result.sent, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.errors, vec!["Globex: mailbox unavailable".to_string()]);
        assert_eq!(result.total_companies, 3);
        assert_eq!(
            sender.recipients(),
            vec!["c1@example.com", "c2@example.com", "c3@example.com"]
        );
    }

    #[tokio::test]
    async fn test_transport_errors_are_isolated() {
        let sender = Arc::new(ScriptedSender {
            error: vec!["c1@example.com".to_string()],
            silent_reject: vec!["c2@example.com".to_string()],
            ..Default::default()
        });
        let dispatcher = BulkDispatcher::new(store(), sender.clone());

        let recipients = vec![
            recipient("c1", "Acme", None),
            recipient("c2", "Globex", None),
            recipient("c3", "Initech", None),
            recipient("c4", "Umbrella", None),
        ];
        let result = dispatcher
            .dispatch(&recipients, &[], "campaign", &base_data())
            .await
            .unwrap();

        assert_eq!(result.attempted(), recipients.len());
        assert_eq!(result.sent, 2);
        assert_eq!(
            result.errors,
            vec![
                "Acme: Mail configuration error: connection reset".to_string(),
                "Globex: Unknown error".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_custom_emails_after_companies() {
        let sender = Arc::new(ScriptedSender {
            reject: vec!["luis@example.com".to_string()],
            ..Default::default()
        });
        let dispatcher = BulkDispatcher::new(store(), sender.clone());

        let custom = vec![
            CustomEmail::new("Ana", "ana@example.com"),
            CustomEmail::new("Luis", "luis@example.com"),
        ];
        let result = dispatcher
            .dispatch(&[recipient("c1", "Acme", None)], &custom, "campaign", &base_data())
            .await
            .unwrap();

        assert_eq!(result.total_companies, 1);
        assert_eq!(result.total_custom_emails, 2);
        assert_eq!(result.sent, 2);
        assert_eq!(
            result.errors,
            vec!["Luis (luis@example.com): mailbox unavailable".to_string()]
        );
        assert_eq!(
            sender.recipients(),
            vec!["c1@example.com", "ana@example.com", "luis@example.com"]
        );
    }

    #[tokio::test]
    async fn test_messages_are_personalized() {
        let sender = Arc::new(ScriptedSender::default());
        let dispatcher = BulkDispatcher::new(store(), sender.clone());

        let recipients = vec![
            recipient("c1", "Acme", Some("Laura")),
            recipient("external_9", "Globex", None),
        ];
        let custom = vec![CustomEmail::new("Ana", "ana@example.com")];

        dispatcher
            .dispatch(&recipients, &custom, "campaign", &base_data())
            .await
            .unwrap();

        let sent = sender.sent.lock().unwrap().clone();
        assert_eq!(sent[0].subject, "Feria de empleo");
        assert_eq!(sent[0].text, "Hola Laura: Los esperamos");
        assert_eq!(sent[0].html, "<p>Acme (c1@example.com)</p>");
        assert_eq!(sent[1].text, "Hola Globex: Los esperamos");
        assert_eq!(sent[2].text, "Hola Ana: Los esperamos");
        assert_eq!(sent[2].html, "<p>Ana (ana@example.com)</p>");
    }
}
