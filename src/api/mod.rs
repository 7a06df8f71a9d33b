//! API layer - HTTP endpoint handlers organized by domain.

mod campaign;
mod health;
mod metrics;
mod response;
mod routes;
mod template;

pub use campaign::{list_campaign_recipients, send_company_campaign};
pub use health::{health, HealthResponse};
pub use metrics::prometheus_metrics;
pub use response::ApiResponse;
pub use routes::api_routes;
pub use template::{get_template, list_templates, preview_template};
