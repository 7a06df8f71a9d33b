//! Campaign outcome counters
//!
//! Kept in its own test binary so the process-wide Prometheus registry only
//! sees the campaigns run here.

use std::sync::Arc;

use serde_json::json;

use placement_notifications::campaign::{BulkDispatcher, CampaignError, CustomEmail};
use placement_notifications::mail::LogMailSender;
use placement_notifications::metrics::CAMPAIGNS_TOTAL;
use placement_notifications::template::{TemplateData, TemplateStore, COMPANY_CAMPAIGN};

fn outcome(label: &str) -> u64 {
    CAMPAIGNS_TOTAL.with_label_values(&[label]).get()
}

#[tokio::test]
async fn test_only_dispatched_campaigns_count_as_started() {
    let dispatcher = BulkDispatcher::new(
        Arc::new(TemplateStore::builtin().unwrap()),
        Arc::new(LogMailSender::new("test@example.com")),
    );
    let data: TemplateData = match json!({"subject": "Aviso", "message": "Hola"}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    let custom = vec![CustomEmail::new("Ana", "ana@example.com")];

    let started = outcome("started");
    let rejected = outcome("rejected");

    let err = dispatcher
        .dispatch(&[], &[], COMPANY_CAMPAIGN, &data)
        .await
        .unwrap_err();
    assert!(matches!(err, CampaignError::NoRecipients));

    let err = dispatcher
        .dispatch(&[], &custom, "no-such-template", &data)
        .await
        .unwrap_err();
    assert!(matches!(err, CampaignError::TemplateNotFound(_)));

    assert_eq!(outcome("started"), started);
    assert_eq!(outcome("rejected"), rejected + 2);

    let result = dispatcher
        .dispatch(&[], &custom, COMPANY_CAMPAIGN, &data)
        .await
        .unwrap();
    assert_eq!(result.sent, 1);

    assert_eq!(outcome("started"), started + 1);
    assert_eq!(outcome("rejected"), rejected + 2);
}
