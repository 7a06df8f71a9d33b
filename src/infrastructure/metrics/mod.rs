//! Prometheus metrics for campaign delivery.
//!
//! - Campaign metrics (started, rejected)
//! - Email metrics (sent, failed)
//! - Recipient resolution metrics (per source, external fetch failures)

mod helpers;

pub use helpers::{encode_metrics, CampaignMetrics, RecipientMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "placement";

lazy_static! {
    // ============================================================================
    // Campaign Metrics
    // ============================================================================

    /// Campaigns by outcome (`started`, `rejected`)
    pub static ref CAMPAIGNS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_campaigns_total", METRIC_PREFIX),
        "Total campaigns by outcome",
        &["outcome"]
    ).unwrap();

    /// Recipients attempted per campaign
    pub static ref CAMPAIGN_SIZE: Histogram = register_histogram!(
        format!("{}_campaign_size", METRIC_PREFIX),
        "Distribution of recipients attempted per campaign",
        vec![1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0]
    ).unwrap();

    // ============================================================================
    // Email Metrics
    // ============================================================================

    pub static ref EMAILS_SENT_TOTAL: IntCounter = register_int_counter!(
        format!("{}_emails_sent_total", METRIC_PREFIX),
        "Total campaign emails accepted by the mail provider"
    ).unwrap();

    pub static ref EMAILS_FAILED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_emails_failed_total", METRIC_PREFIX),
        "Total campaign emails that could not be sent"
    ).unwrap();

    // ============================================================================
    // Recipient Metrics
    // ============================================================================

    /// Recipients resolved by source (`internal`, `external`)
    pub static ref RECIPIENTS_RESOLVED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_recipients_resolved_total", METRIC_PREFIX),
        "Total recipients resolved by source",
        &["source"]
    ).unwrap();

    pub static ref EXTERNAL_FETCH_FAILURES_TOTAL: IntCounter = register_int_counter!(
        format!("{}_external_fetch_failures_total", METRIC_PREFIX),
        "Total failed fetches from the external company directory"
    ).unwrap();
}
