//! Mail delivery abstraction.
//!
//! The campaign engine knows nothing about SMTP or provider APIs. It hands a
//! rendered `OutgoingMail` to a `MailSender` and gets back a `SendOutcome`.
//!
//! - `HttpMailSender`: JSON mail API (Resend-compatible) over HTTPS
//! - `LogMailSender`: writes messages to the log instead of sending (default)

mod http;
mod log;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::MailConfig;

pub use self::http::HttpMailSender;
pub use self::log::LogMailSender;

/// Errors raised while handing a message to the transport.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail configuration error: {0}")]
    Configuration(String),
}

/// A rendered message for a single recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Result reported by the transport for one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendOutcome {
    pub fn delivered() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(reason.into()),
        }
    }
}

/// Injected mail-send capability.
///
/// `Ok` with `success == false` and `Err` are both per-message failures for
/// the caller; neither should abort a batch.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, message: OutgoingMail) -> Result<SendOutcome, MailError>;
}

/// Create the mail sender configured in `mail.provider`.
///
/// - `"http"`: `HttpMailSender`, requires `mail.api_key`
/// - anything else: `LogMailSender`
pub fn create_mail_sender(config: &MailConfig) -> Result<Arc<dyn MailSender>, MailError> {
    match config.provider.as_str() {
        "http" => {
            tracing::info!(provider = "http", api_url = %config.api_url, "Creating mail sender");
            Ok(Arc::new(HttpMailSender::new(config)?))
        }
        other => {
            if other != "log" {
                tracing::warn!(provider = %other, "Unknown mail provider, falling back to log sender");
            }
            tracing::info!(provider = "log", "Creating mail sender");
            Ok(Arc::new(LogMailSender::new(config.from.clone())))
        }
    }
}
