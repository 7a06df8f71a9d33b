//! HTTP client for the external company directory

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ExternalApiConfig;

use super::source::ExternalRecipientSource;
use super::types::{ExternalCompany, RecipientSourceError};

/// External recipient source backed by a JSON HTTP endpoint.
///
/// The endpoint returns the whole collection as a JSON array; there is no
/// pagination or authentication.
#[derive(Clone)]
pub struct HttpCompanyDirectory {
    client: Client,
    url: String,
}

impl HttpCompanyDirectory {
    pub fn new(config: &ExternalApiConfig) -> Result<Self, RecipientSourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ExternalRecipientSource for HttpCompanyDirectory {
    async fn fetch_all(&self) -> Result<Vec<ExternalCompany>, RecipientSourceError> {
        let res = self.client.get(&self.url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(RecipientSourceError::Status(status.as_u16()));
        }

        let companies: Vec<ExternalCompany> = res.json().await?;

        tracing::trace!(
            url = %self.url,
            count = companies.len(),
            "Fetched external company directory"
        );

        Ok(companies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use tokio::net::TcpListener;

    /// Serve a directory stub on an ephemeral local port, returning its base URL
    async fn serve_directory(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn directory_at(url: String) -> HttpCompanyDirectory {
        HttpCompanyDirectory::new(&ExternalApiConfig {
            enabled: true,
            url,
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_new_keeps_url() {
        let config = ExternalApiConfig {
            enabled: true,
            url: "http://localhost:9000/api/empresas".to_string(),
            timeout_seconds: 5,
        };

        let directory = HttpCompanyDirectory::new(&config).unwrap();
        assert_eq!(directory.url(), "http://localhost:9000/api/empresas");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let config = ExternalApiConfig {
            enabled: true,
            // Port 9 (discard) on localhost is not expected to serve HTTP
            url: "http://127.0.0.1:9/empresas".to_string(),
            timeout_seconds: 1,
        };

        let directory = HttpCompanyDirectory::new(&config).unwrap();
        assert!(directory.fetch_all().await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_all_decodes_array() {
        let app = Router::new().route(
            "/empresas",
            get(|| async {
                r#"[
                    {"id_empresa": 7, "empresa_nombre": "Initech", "empresa_email": "hola@initech.mx"},
                    {"id_empresa": 8, "empresa_nombre": "Globex", "empresa_email": "info@globex.com", "activo": true}
                ]"#
            }),
        );
        let base = serve_directory(app).await;

        let companies = directory_at(format!("{}/empresas", base))
            .fetch_all()
            .await
            .unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].id_empresa, 7);
        assert_eq!(companies[1].empresa_email, "info@globex.com");
        assert_eq!(companies[1].empresa_tamano, None);
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let app = Router::new().route(
            "/empresas",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = serve_directory(app).await;

        let err = directory_at(format!("{}/empresas", base))
            .fetch_all()
            .await
            .unwrap_err();
        assert!(matches!(err, RecipientSourceError::Status(500)));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_an_http_error() {
        let app = Router::new().route("/empresas", get(|| async { "not json" }));
        let base = serve_directory(app).await;

        let err = directory_at(format!("{}/empresas", base))
            .fetch_all()
            .await
            .unwrap_err();
        assert!(matches!(err, RecipientSourceError::Http(_)));
    }
}
