//! PostgreSQL persistence module.

pub mod pool;

pub use pool::{mask_database_url, PostgresPool, PostgresPoolError};
