//! Message templates and the template lookup boundary

use std::collections::HashMap;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

#[cfg(test)]
use mockall::mock;

use crate::domain::mail::errors::TemplateError;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
}

/// A named message template with `${NAME}` placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    name: String,
    body: String,
}

impl Template {
    /// Create a template from its raw body.
    pub fn new(name: &str, body: &str) -> Self {
        Self {
            name: name.to_string(),
            body: body.to_string(),
        }
    }

    /// The template's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces every `${NAME}` placeholder with the variable whose
    /// lower-cased name matches.
    ///
    /// Substitution is strict: a placeholder with no matching variable is a
    /// [`TemplateError::MissingVariable`], never silently left blank.
    pub fn substitute(
        &self,
        variables: &HashMap<String, String>,
    ) -> Result<String, TemplateError> {
        let mut rendered = String::with_capacity(self.body.len());
        let mut tail = 0;

        // Walk the placeholders over the original body so substituted
        // values are never themselves rescanned for placeholders.
        for captures in PLACEHOLDER_REGEX.captures_iter(&self.body) {
            let placeholder = captures.get(0).unwrap();
            let name = captures[1].to_lowercase();

            let value = variables
                .get(&name)
                .ok_or(TemplateError::MissingVariable(name))?;

            rendered.push_str(&self.body[tail..placeholder.start()]);
            rendered.push_str(value);
            tail = placeholder.end();
        }

        rendered.push_str(&self.body[tail..]);

        Ok(rendered)
    }
}

/// Template lookup boundary.
///
/// Implementations normalize every failure to open or read a template to
/// [`TemplateError::NotFound`]; nothing else escapes this boundary.
#[async_trait]
pub trait TemplateStore: Send + Sync + 'static {
    /// Look up a template by filename.
    async fn load(&self, name: &str) -> Result<Template, TemplateError>;
}

#[cfg(test)]
mock! {
    pub TemplateStore {}

    #[async_trait]
    impl TemplateStore for TemplateStore {
        async fn load(&self, name: &str) -> Result<Template, TemplateError>;
    }
}
