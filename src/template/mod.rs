//! Email template system.
//!
//! This module provides:
//! - Template records with `{{variable}}` placeholders and `{{#if key}}` blocks
//! - A read-only registry holding the built-in catalogue
//! - The rendering engine that resolves a record and data into final content
//!
//! # Example
//!
//! ```ignore
//! let store = TemplateStore::builtin()?;
//!
//! let mut data = TemplateData::new();
//! data.insert("userName".into(), json!("Ana"));
//!
//! let rendered = store.render("welcome", &data)?;
//! assert!(rendered.text.starts_with("Bienvenido Ana"));
//! ```

mod catalog;
mod render;
mod store;
mod types;

pub use catalog::{builtin_templates, COMPANY_CAMPAIGN};
pub use render::{is_truthy, render, render_str, CompiledTemplate, CompiledText};
pub use store::{create_template_store, TemplateStore};
pub use types::{
    RenderedTemplate, TemplateData, TemplateError, TemplateListResponse, TemplateRecord,
    TemplateResult,
};
