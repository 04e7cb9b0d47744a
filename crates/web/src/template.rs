//! Templated responses, delegated to the minijinja engine.

use crate::error::WebError;
use minijinja::Environment;
use serde::Serialize;
use std::path::Path;

/// A template engine over a directory of templates.
///
/// Template names are paths relative to the directory; contexts are any
/// serde-serializable value.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Creates an engine that loads templates from the given directory.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(dir.as_ref()));
        Self { env }
    }

    /// Wraps a prepared environment, e.g. with templates registered from
    /// strings.
    pub fn with_env(env: Environment<'static>) -> Self {
        Self { env }
    }

    /// Renders the named template with the given context.
    pub fn render(&self, name: &str, ctx: impl Serialize) -> Result<String, WebError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}
