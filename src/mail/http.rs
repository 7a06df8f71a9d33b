use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::MailConfig;

use super::{MailError, MailSender, OutgoingMail, SendOutcome};

/// Sends mail through a Resend-compatible JSON API.
#[derive(Clone)]
pub struct HttpMailSender {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct Payload<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

impl HttpMailSender {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| MailError::Configuration("mail.api_key is required".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl MailSender for HttpMailSender {
    async fn send(&self, message: OutgoingMail) -> Result<SendOutcome, MailError> {
        let payload = Payload {
            from: &self.from,
            to: vec![&message.to],
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        let res = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Ok(SendOutcome::rejected(format!(
                "Mail API returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        Ok(SendOutcome::delivered())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn serve_mail_api(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/emails", addr)
    }

    fn sender_for(api_url: String) -> HttpMailSender {
        HttpMailSender::new(&MailConfig {
            provider: "http".to_string(),
            api_url,
            api_key: Some("re_test".to_string()),
            from: "Vinculacion <vinculacion@example.com>".to_string(),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    fn message() -> OutgoingMail {
        OutgoingMail {
            to: "contacto@acme.com".to_string(),
            subject: "Hola".to_string(),
            html: "<p>Hola</p>".to_string(),
            text: "Hola".to_string(),
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = MailConfig {
            provider: "http".to_string(),
            api_key: Some(String::new()),
            ..MailConfig::default()
        };
        assert!(matches!(
            HttpMailSender::new(&config),
            Err(MailError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_send_posts_authorized_payload() {
        let app = Router::new().route(
            "/emails",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let authorized = headers
                    .get("authorization")
                    .and_then(|value| value.to_str().ok())
                    == Some("Bearer re_test");
                let expected = json!({
                    "from": "Vinculacion <vinculacion@example.com>",
                    "to": ["contacto@acme.com"],
                    "subject": "Hola",
                    "html": "<p>Hola</p>",
                    "text": "Hola",
                });
                if authorized && body == expected {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_REQUEST
                }
            }),
        );
        let url = serve_mail_api(app).await;

        let outcome = sender_for(url).send(message()).await.unwrap();
        assert_eq!(outcome, SendOutcome::delivered());
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected_outcome() {
        let app = Router::new().route(
            "/emails",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
        );
        let url = serve_mail_api(app).await;

        let outcome = sender_for(url).send(message()).await.unwrap();
        assert!(!outcome.success);
        assert_eq!(
            outcome.error.as_deref(),
            Some("Mail API returned 500: upstream down")
        );
    }

    #[tokio::test]
    async fn test_unreachable_api_is_transport_error() {
        let sender = sender_for("http://127.0.0.1:9/emails".to_string());
        assert!(matches!(
            sender.send(message()).await,
            Err(MailError::Transport(_))
        ));
    }
}
