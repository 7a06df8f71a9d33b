//! Recipient types and error definitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix that routes an id to the external company directory.
///
/// Internal ids never start with this prefix.
pub const EXTERNAL_ID_PREFIX: &str = "external_";

/// Errors raised by recipient sources.
#[derive(Debug, Error)]
pub enum RecipientSourceError {
    /// PostgreSQL operation failed
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// HTTP request to the external directory failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// External directory answered with a non-success status
    #[error("External directory returned status {0}")]
    Status(u16),

    /// Source is not reachable
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// An approved company stored in the platform database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalCompany {
    pub id: String,
    pub name: String,
    pub email: String,
    pub contact_name: Option<String>,
}

/// A company as published by the external directory API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalCompany {
    pub id_empresa: i64,
    pub empresa_nombre: String,
    pub empresa_email: String,
    #[serde(default)]
    pub empresa_tamano: Option<String>,
}

/// A campaign candidate from either source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Internal(InternalCompany),
    External(ExternalCompany),
}

impl Recipient {
    /// Namespaced id of the recipient
    pub fn id(&self) -> String {
        match self {
            Recipient::Internal(company) => company.id.clone(),
            Recipient::External(company) => external_id(company.id_empresa),
        }
    }

    /// Project into the uniform record shape
    pub fn into_record(self) -> RecipientRecord {
        match self {
            Recipient::Internal(company) => RecipientRecord {
                id: company.id,
                name: company.name,
                email: company.email,
                contact_name: company.contact_name,
                is_external: false,
            },
            Recipient::External(company) => RecipientRecord {
                id: external_id(company.id_empresa),
                name: company.empresa_nombre,
                email: company.empresa_email,
                contact_name: None,
                is_external: true,
            },
        }
    }
}

impl From<InternalCompany> for Recipient {
    fn from(company: InternalCompany) -> Self {
        Recipient::Internal(company)
    }
}

impl From<ExternalCompany> for Recipient {
    fn from(company: ExternalCompany) -> Self {
        Recipient::External(company)
    }
}

/// Build the namespaced id of an external company
pub fn external_id(native_id: i64) -> String {
    format!("{}{}", EXTERNAL_ID_PREFIX, native_id)
}

/// Uniform recipient shape used by the dispatcher and the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientRecord {
    /// Namespaced id (`external_<id>` for external companies)
    pub id: String,
    pub name: String,
    pub email: String,
    pub contact_name: Option<String>,
    pub is_external: bool,
}

/// Every campaign candidate, with per-source counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientDirectory {
    pub recipients: Vec<RecipientRecord>,
    pub total_count: usize,
    pub internal_count: usize,
    pub external_count: usize,
}

impl RecipientDirectory {
    pub fn new(recipients: Vec<RecipientRecord>) -> Self {
        let external_count = recipients.iter().filter(|r| r.is_external).count();
        let total_count = recipients.len();

        Self {
            recipients,
            total_count,
            internal_count: total_count - external_count,
            external_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_projection() {
        let record = Recipient::Internal(InternalCompany {
            id: "c1".to_string(),
            name: "Acme".to_string(),
            email: "rrhh@acme.com".to_string(),
            contact_name: Some("Laura".to_string()),
        })
        .into_record();

        assert_eq!(record.id, "c1");
        assert_eq!(record.contact_name.as_deref(), Some("Laura"));
        assert!(!record.is_external);
    }

    #[test]
    fn test_external_projection() {
        let recipient = Recipient::External(ExternalCompany {
            id_empresa: 42,
            empresa_nombre: "Globex".to_string(),
            empresa_email: "info@globex.com".to_string(),
            empresa_tamano: Some("grande".to_string()),
        });
        assert_eq!(recipient.id(), "external_42");

        let record = recipient.into_record();
        assert_eq!(record.id, "external_42");
        assert_eq!(record.name, "Globex");
        assert_eq!(record.contact_name, None);
        assert!(record.is_external);
    }

    #[test]
    fn test_external_company_ignores_unknown_fields() {
        let json = r#"[{
            "id_empresa": 7,
            "empresa_nombre": "Initech",
            "empresa_email": "hola@initech.mx",
            "empresa_tamano": "mediana",
            "empresa_rfc": "INI010101AAA",
            "activo": true
        }]"#;

        let companies: Vec<ExternalCompany> = serde_json::from_str(json).unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].id_empresa, 7);
        assert_eq!(companies[0].empresa_tamano.as_deref(), Some("mediana"));
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = RecipientRecord {
            id: "c1".to_string(),
            name: "Acme".to_string(),
            email: "rrhh@acme.com".to_string(),
            contact_name: None,
            is_external: false,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["contactName"], serde_json::Value::Null);
        assert_eq!(json["isExternal"], false);
    }

    #[test]
    fn test_directory_counts() {
        let make = |id: &str, is_external: bool| RecipientRecord {
            id: id.to_string(),
            name: id.to_string(),
            email: format!("{}@example.com", id),
            contact_name: None,
            is_external,
        };

        let directory =
            RecipientDirectory::new(vec![make("a", false), make("external_1", true), make("b", false)]);
        assert_eq!(directory.total_count, 3);
        assert_eq!(directory.internal_count, 2);
        assert_eq!(directory.external_count, 1);
    }
}
