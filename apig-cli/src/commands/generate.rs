//! Project generation command

use anyhow::{Context, Result};
use apig::{ScaffoldGenerator, TemplateRenderer};
use console::style;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::ProjectConfig;

/// Generate controllers, routes, database wiring and docs from a project file
pub struct GenCommand {
    config: PathBuf,
    output_dir: Option<PathBuf>,
    templates: Option<PathBuf>,
}

impl GenCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `config` - Path to the project file
    /// * `output_dir` - Output directory; defaults to the project file's directory
    /// * `templates` - Directory of template overrides
    #[must_use]
    pub const fn new(config: PathBuf, output_dir: Option<PathBuf>, templates: Option<PathBuf>) -> Self {
        Self {
            config,
            output_dir,
            templates,
        }
    }

    /// Directory files are written to
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            self.config
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        })
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the project file is missing or invalid, a
    /// template override cannot be loaded, or generation fails.
    pub fn execute(&self) -> Result<Vec<PathBuf>> {
        let detail = ProjectConfig::load_from(&self.config)?
            .into_detail()
            .with_context(|| format!("Invalid project file: {}", self.config.display()))?;

        let renderer = match &self.templates {
            Some(dir) => TemplateRenderer::with_overrides(dir)
                .with_context(|| format!("Failed to load templates from {}", dir.display()))?,
            None => TemplateRenderer::new()?,
        };
        let generator = ScaffoldGenerator::with_renderer(renderer);
        let out_dir = self.output_dir();

        println!(
            "{} {} {}",
            style("Generating").green().bold(),
            style("API server:").bold(),
            style(&detail.import_dir).cyan().bold()
        );
        println!();

        let spinner = super::spinner()?;
        spinner.set_message(format!("Generating {} model(s)...", detail.models.len()));

        let written = generator
            .generate_project(&detail, &out_dir)
            .with_context(|| format!("Failed to generate project in {}", out_dir.display()))?;

        spinner.finish_and_clear();
        info!(files = written.len(), out_dir = %out_dir.display(), "generation finished");

        for path in &written {
            println!("  {} {}", style("create").green(), path.display());
        }
        println!();
        println!("{}", style("✓ Generation complete!").green().bold());

        Ok(written)
    }
}
