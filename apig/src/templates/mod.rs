//! Template renderer
//!
//! Wraps a minijinja environment holding every generator template. Sources
//! are compiled into the binary; an override directory may replace any of
//! them by file name.
//!
//! Resolution order:
//! 1. `{override_dir}/{name}` (customizations)
//! 2. built-in source

use crate::error::{GenerateError, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::path::Path;

/// Per-model controller
pub const CONTROLLER: &str = "controller.go.tmpl";
/// Per-model router fragment
pub const ROUTE: &str = "route.go.tmpl";
/// Per-model API Blueprint page
pub const APIB_MODEL: &str = "model.apib.tmpl";
/// Router index
pub const ROUTER: &str = "router.go.tmpl";
/// Root endpoint listing
pub const ROOT: &str = "root.go.tmpl";
/// Database wiring with auto-migration
pub const DB: &str = "db.go.tmpl";
/// API Blueprint index
pub const APIB_INDEX: &str = "index.apib.tmpl";
/// Endpoint README
pub const README: &str = "README.md.tmpl";

/// Built-in template sources, keyed by name
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (CONTROLLER, include_str!("../../templates/controller.go.tmpl")),
    (ROUTE, include_str!("../../templates/route.go.tmpl")),
    (APIB_MODEL, include_str!("../../templates/model.apib.tmpl")),
    (ROUTER, include_str!("../../templates/router.go.tmpl")),
    (ROOT, include_str!("../../templates/root.go.tmpl")),
    (DB, include_str!("../../templates/db.go.tmpl")),
    (APIB_INDEX, include_str!("../../templates/index.apib.tmpl")),
    (README, include_str!("../../templates/README.md.tmpl")),
    (
        "skeleton/README.md.tmpl",
        include_str!("../../templates/skeleton/README.md.tmpl"),
    ),
    (
        "skeleton/main.go.tmpl",
        include_str!("../../templates/skeleton/main.go.tmpl"),
    ),
    (
        "skeleton/db/db.go.tmpl",
        include_str!("../../templates/skeleton/db/db.go.tmpl"),
    ),
    (
        "skeleton/server/server.go.tmpl",
        include_str!("../../templates/skeleton/server/server.go.tmpl"),
    ),
    (
        "skeleton/version/version.go.tmpl",
        include_str!("../../templates/skeleton/version/version.go.tmpl"),
    ),
    (
        "skeleton/version/version_test.go.tmpl",
        include_str!("../../templates/skeleton/version/version_test.go.tmpl"),
    ),
];

/// Renders named templates against serializable contexts
#[derive(Debug)]
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Create a renderer with the built-in templates
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidTemplate`] if a built-in source does
    /// not parse.
    pub fn new() -> Result<Self> {
        let mut env = Self::create_environment();

        for &(name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source)
                .map_err(|source| GenerateError::InvalidTemplate {
                    template: name.to_string(),
                    source,
                })?;
        }

        Ok(Self { env })
    }

    /// Create a renderer where files in `dir` replace built-ins of the same name
    ///
    /// Only names of built-in templates are looked up; other files in `dir`
    /// are ignored.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::Io`] if an override exists but cannot be read
    /// - [`GenerateError::InvalidTemplate`] if any source does not parse
    pub fn with_overrides(dir: &Path) -> Result<Self> {
        let mut env = Self::create_environment();

        for &(name, builtin) in BUILTIN_TEMPLATES {
            let path = dir.join(name);
            let result = if path.is_file() {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| GenerateError::io(&path, e))?;
                tracing::debug!(template = name, path = %path.display(), "using template override");
                env.add_template_owned(name, content)
            } else {
                env.add_template(name, builtin)
            };

            result.map_err(|source| GenerateError::InvalidTemplate {
                template: name.to_string(),
                source,
            })?;
        }

        Ok(Self { env })
    }

    fn create_environment() -> Environment<'static> {
        let mut env = Environment::new();

        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        // Generated Go and Markdown, never HTML
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env
    }

    /// Render `template` with `ctx`
    ///
    /// `model` only labels the error (`all models` for aggregates).
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Template`] if the template is unknown or
    /// references a value missing from `ctx`.
    pub fn render<S: Serialize>(&self, template: &str, model: &str, ctx: &S) -> Result<String> {
        self.env
            .get_template(template)
            .and_then(|tmpl| tmpl.render(ctx))
            .map_err(|source| GenerateError::Template {
                template: template.to_string(),
                model: model.to_string(),
                source,
            })
    }

    /// Names of all built-in templates
    pub fn template_names() -> impl Iterator<Item = &'static str> {
        BUILTIN_TEMPLATES.iter().map(|(name, _)| *name)
    }
}
