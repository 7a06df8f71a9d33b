use async_trait::async_trait;

use super::{MailError, MailSender, OutgoingMail, SendOutcome};

/// Logs messages instead of sending them (development and staging).
pub struct LogMailSender {
    from: String,
}

impl LogMailSender {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, message: OutgoingMail) -> Result<SendOutcome, MailError> {
        tracing::info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            text_len = message.text.len(),
            html_len = message.html.len(),
            "Would send email"
        );
        Ok(SendOutcome::delivered())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sender_always_delivers() {
        let sender = LogMailSender::new("noreply@bolsa.edu");
        let outcome = sender
            .send(OutgoingMail {
                to: "rrhh@acme.com".to_string(),
                subject: "Hola".to_string(),
                html: "<p>Hola</p>".to_string(),
                text: "Hola".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(outcome, SendOutcome::delivered());
    }
}
