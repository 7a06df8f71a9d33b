mod settings;

pub use settings::{
    ApiConfig, DatabaseConfig, ExternalApiConfig, MailConfig, OtelConfig, ServerConfig, Settings,
};
