//! Read-only template registry

use std::collections::HashMap;
use std::sync::Arc;

use super::catalog::builtin_templates;
use super::render::CompiledTemplate;
use super::types::{RenderedTemplate, TemplateData, TemplateError, TemplateRecord, TemplateResult};

/// Immutable mapping from template name to template record.
///
/// Built once at startup and shared across requests behind an `Arc`.
/// Every stored template is known to compile.
#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: HashMap<String, TemplateRecord>,
}

impl TemplateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the built-in catalogue
    pub fn builtin() -> TemplateResult<Self> {
        Self::with_templates(builtin_templates())
    }

    /// Create a store from a set of templates.
    ///
    /// Fails on invalid names, duplicate names, or templates that do not parse.
    pub fn with_templates<I>(templates: I) -> TemplateResult<Self>
    where
        I: IntoIterator<Item = TemplateRecord>,
    {
        let mut map = HashMap::new();

        for template in templates {
            template.validate()?;
            CompiledTemplate::compile(&template)?;

            if map.contains_key(&template.name) {
                return Err(TemplateError::AlreadyExists(template.name));
            }
            map.insert(template.name.clone(), template);
        }

        Ok(Self { templates: map })
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> TemplateResult<&TemplateRecord> {
        self.templates
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }

    /// Get a template by name, parsed and ready to render
    pub fn compile(&self, name: &str) -> TemplateResult<CompiledTemplate> {
        CompiledTemplate::compile(self.get(name)?)
    }

    /// Template names in sorted order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.templates.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a template exists
    pub fn exists(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Get the number of templates
    pub fn count(&self) -> usize {
        self.templates.len()
    }

    /// Render a template with data
    pub fn render(&self, name: &str, data: &TemplateData) -> TemplateResult<RenderedTemplate> {
        Ok(self.compile(name)?.render(data))
    }
}

/// Create an Arc-wrapped store with the built-in catalogue
pub fn create_template_store() -> TemplateResult<Arc<TemplateStore>> {
    TemplateStore::builtin().map(Arc::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn data(value: Value) -> TemplateData {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_builtin_catalogue_loads() {
        let store = TemplateStore::builtin().unwrap();
        assert!(store.count() >= 10);
        for name in [
            "welcome",
            "companyApproval",
            "companyRejection",
            "passwordReset",
            "companyCampaign",
        ] {
            assert!(store.exists(name), "missing template {}", name);
        }
    }

    #[test]
    fn test_get_missing_template() {
        let store = TemplateStore::builtin().unwrap();
        assert_eq!(
            store.get("doesNotExist").unwrap_err(),
            TemplateError::NotFound("doesNotExist".to_string())
        );
    }

    #[test]
    fn test_names_sorted() {
        let store = TemplateStore::with_templates(vec![
            TemplateRecord::new("b", "", "", ""),
            TemplateRecord::new("a", "", "", ""),
        ])
        .unwrap();
        assert_eq!(store.names(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = TemplateStore::with_templates(vec![
            TemplateRecord::new("dup", "", "", ""),
            TemplateRecord::new("dup", "", "", ""),
        ]);
        assert_eq!(
            result.unwrap_err(),
            TemplateError::AlreadyExists("dup".to_string())
        );
    }

    #[test]
    fn test_invalid_name_rejected() {
        let result = TemplateStore::with_templates(vec![TemplateRecord::new("bad name", "", "", "")]);
        assert!(matches!(result, Err(TemplateError::InvalidName(_))));
    }

    #[test]
    fn test_nested_template_rejected_at_load() {
        let result = TemplateStore::with_templates(vec![TemplateRecord::new(
            "nested",
            "",
            "",
            "{{#if a}}{{#if b}}x{{/if}}{{/if}}",
        )]);
        assert!(matches!(result, Err(TemplateError::NestedConditional { .. })));
    }

    #[test]
    fn test_render_welcome() {
        let store = TemplateStore::builtin().unwrap();
        let rendered = store
            .render("welcome", &data(json!({"userName": "Ana"})))
            .unwrap();

        assert!(rendered.text.starts_with("Bienvenido Ana\n"));
        assert_eq!(rendered.subject, "Bienvenido a la Bolsa de Trabajo, Ana");
        assert!(!rendered.html.contains("{{"));
    }

    #[test]
    fn test_company_approval_comments_block() {
        let store = TemplateStore::builtin().unwrap();

        let without = store
            .render("companyApproval", &data(json!({"companyName": "Acme"})))
            .unwrap();
        assert!(!without.html.contains("Comentarios del coordinador"));
        assert!(!without.html.contains("class=\"comments\""));

        let with = store
            .render(
                "companyApproval",
                &data(json!({"companyName": "Acme", "comments": "Revisar documentos"})),
            )
            .unwrap();
        assert!(with.html.contains("Comentarios del coordinador"));
        assert!(with.html.contains("<p>Revisar documentos</p>"));
    }

    #[test]
    fn test_create_template_store() {
        let store = create_template_store().unwrap();
        assert!(store.exists("companyCampaign"));
    }
}
