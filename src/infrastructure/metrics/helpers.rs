//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, TextEncoder};

use super::{
    CAMPAIGNS_TOTAL, CAMPAIGN_SIZE, EMAILS_FAILED_TOTAL, EMAILS_SENT_TOTAL,
    EXTERNAL_FETCH_FAILURES_TOTAL, RECIPIENTS_RESOLVED_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording campaign metrics
pub struct CampaignMetrics;

impl CampaignMetrics {
    /// Record a campaign that passed validation
    pub fn record_started() {
        CAMPAIGNS_TOTAL.with_label_values(&["started"]).inc();
    }

    /// Record a campaign rejected before any send
    pub fn record_rejected() {
        CAMPAIGNS_TOTAL.with_label_values(&["rejected"]).inc();
    }

    /// Record the per-recipient totals of a finished campaign
    pub fn record_completed(sent: u64, failed: u64) {
        EMAILS_SENT_TOTAL.inc_by(sent);
        EMAILS_FAILED_TOTAL.inc_by(failed);
        CAMPAIGN_SIZE.observe((sent + failed) as f64);
    }
}

/// Helper struct for recording recipient resolution metrics
pub struct RecipientMetrics;

impl RecipientMetrics {
    pub fn record_resolved(source: &str, count: u64) {
        RECIPIENTS_RESOLVED_TOTAL
            .with_label_values(&[source])
            .inc_by(count);
    }

    pub fn record_external_fetch_failure() {
        EXTERNAL_FETCH_FAILURES_TOTAL.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_metrics_recorded() {
        let before = EMAILS_SENT_TOTAL.get();
        CampaignMetrics::record_started();
        CampaignMetrics::record_completed(2, 1);

        assert!(EMAILS_SENT_TOTAL.get() >= before + 2);
        assert!(CAMPAIGNS_TOTAL.with_label_values(&["started"]).get() >= 1);
    }

    #[test]
    fn test_encode_metrics_contains_prefix() {
        RecipientMetrics::record_resolved("external", 3);
        RecipientMetrics::record_external_fetch_failure();

        let output = encode_metrics().unwrap();
        assert!(output.contains("placement_recipients_resolved_total"));
        assert!(output.contains("placement_external_fetch_failures_total"));
    }
}
