//! PostgreSQL-backed company directory.
//!
//! Reads approved companies from the platform's `companies` table:
//!
//! | column         | type   |
//! |----------------|--------|
//! | `id`           | any, compared as text |
//! | `name`         | text   |
//! | `email`        | text   |
//! | `contact_name` | text, nullable |
//! | `status`       | text, `'approved'` when active |

use async_trait::async_trait;
use sqlx::PgPool;

use super::source::InternalRecipientSource;
use super::types::{InternalCompany, RecipientSourceError};

const SELECT_APPROVED: &str = r#"
    SELECT id::text, name, email, contact_name
    FROM companies
    WHERE status = 'approved'
"#;

const SELECT_APPROVED_BY_ID: &str = r#"
    SELECT id::text, name, email, contact_name
    FROM companies
    WHERE status = 'approved' AND id::text = ANY($1)
"#;

type CompanyRow = (String, String, String, Option<String>);

/// Internal recipient source reading from PostgreSQL.
pub struct PgCompanyDirectory {
    pool: PgPool,
}

impl PgCompanyDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InternalRecipientSource for PgCompanyDirectory {
    async fn approved_companies(
        &self,
        ids: Option<&[String]>,
    ) -> Result<Vec<InternalCompany>, RecipientSourceError> {
        let rows: Vec<CompanyRow> = match ids {
            None => sqlx::query_as(SELECT_APPROVED).fetch_all(&self.pool).await?,
            Some(ids) => {
                sqlx::query_as(SELECT_APPROVED_BY_ID)
                    .bind(ids.to_vec())
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        tracing::trace!(count = rows.len(), "Loaded approved companies from PostgreSQL");

        Ok(rows
            .into_iter()
            .map(|(id, name, email, contact_name)| InternalCompany {
                id,
                name,
                email,
                contact_name,
            })
            .collect())
    }
}
