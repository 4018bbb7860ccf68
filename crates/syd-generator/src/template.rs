//! HTML template system for the page shell.
//!
//! `{{ name }}` inserts a variable, `{{ name? }}` inserts it or nothing. Values
//! are inserted verbatim; callers escape user text with [`escape_html`] before
//! putting it in a context.

use std::{collections::HashMap, fs, path::Path};

use thiserror::Error;
use tracing::debug;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable '{variable}' in template '{template}'")]
    MissingVariable { template: String, variable: String },

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax in '{template}': {message}")]
    InvalidSyntax { template: String, message: String },

    /// Failed to read a template override.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Variables available to a template.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Check if a variable exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }
}

/// A named template with `{{ variable }}` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    ///
    /// Inserted values are never rescanned for placeholders.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut output = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            let end = after_open
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax {
                    template: self.name.clone(),
                    message: "unclosed {{ delimiter".to_string(),
                })?;

            let placeholder = after_open[..end].trim();
            let (variable, optional) = match placeholder.strip_suffix('?') {
                Some(stripped) => (stripped.trim(), true),
                None => (placeholder, false),
            };

            if variable.is_empty() {
                return Err(TemplateError::InvalidSyntax {
                    template: self.name.clone(),
                    message: "empty placeholder".to_string(),
                });
            }

            match context.get(variable) {
                Some(value) => output.push_str(value),
                None if optional => {}
                None => {
                    return Err(TemplateError::MissingVariable {
                        template: self.name.clone(),
                        variable: variable.to_string(),
                    });
                }
            }

            rest = &after_open[end + 2..];
        }

        output.push_str(rest);
        Ok(output)
    }
}

/// Registry of named templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register(Template::new("base", DEFAULT_BASE_TEMPLATE));
        registry.register(Template::new("page", DEFAULT_PAGE_TEMPLATE));
        registry
    }

    /// Register a template, replacing any template with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Register every `<name>.html` file in `dir` as template `<name>`.
    ///
    /// Returns the number of templates loaded. A missing directory loads none.
    pub fn load_overrides(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            return Ok(0);
        }

        let mut count = 0;
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "html") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let content = fs::read_to_string(&path)?;
            debug!(name, path = %path.display(), "loaded template override");
            self.register(Template::new(name, content));
            count += 1;
        }

        Ok(count)
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Default page shell.
pub const DEFAULT_BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    {{ description_meta? }}
    {{ author_meta? }}
    {{ keywords_meta? }}
    <link rel="canonical" href="{{ canonical_url }}">
    {{ icon_link? }}
</head>
<body>
    <div class="layout">
        {{ header? }}
        <main>
            {{ content }}
        </main>
        {{ footer }}
    </div>
</body>
</html>
"#;

/// Default wrapper around a page body.
pub const DEFAULT_PAGE_TEMPLATE: &str = r#"<article class="page">
{{ body }}
</article>"#;
