//! Project skeleton command

use anyhow::{Context, Result};
use apig::{Detail, ScaffoldGenerator};
use console::style;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::config::{ProjectConfig, DEFAULT_CONFIG_FILE};

/// Create a new API server project
pub struct NewCommand {
    name: String,
    user: String,
    vcs: String,
    output_dir: PathBuf,
}

impl NewCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `name` - Project name (lowercase, used as the last import path segment)
    /// * `user` - Owner on the VCS host
    /// * `vcs` - VCS host (e.g., `github.com`)
    /// * `parent` - Directory the project directory is created in
    ///
    /// # Errors
    ///
    /// Returns an error if the name or user is invalid or the project
    /// directory already exists.
    pub fn new(name: String, user: String, vcs: String, parent: Option<PathBuf>) -> Result<Self> {
        if !is_valid_project_name(&name) {
            anyhow::bail!(
                "Invalid project name: {name}. Use lowercase letters, digits, hyphens and underscores, starting with a letter."
            );
        }

        if user.trim().is_empty() {
            anyhow::bail!("A user is required (--user <name>)");
        }

        let output_dir = parent.unwrap_or_default().join(&name);

        if output_dir.exists() {
            anyhow::bail!(
                "Directory '{}' already exists. Please choose a different name or remove the existing directory.",
                output_dir.display()
            );
        }

        Ok(Self {
            name,
            user,
            vcs,
            output_dir,
        })
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the skeleton or project file cannot be written.
    pub fn execute(&self) -> Result<()> {
        println!(
            "{} {} {}",
            style("Creating").green().bold(),
            style("API server project:").bold(),
            style(&self.name).cyan().bold()
        );
        println!();

        let spinner = super::spinner()?;

        spinner.set_message("Writing project skeleton...");
        let detail = Detail::new(&self.vcs, &self.user, &self.name, Vec::new());
        let written = ScaffoldGenerator::new()?
            .assemble_skeleton(&detail, &self.output_dir)
            .with_context(|| format!("Failed to create project in {}", self.output_dir.display()))?;

        spinner.set_message("Writing project file...");
        self.write_project_file()?;

        spinner.finish_and_clear();
        info!(project = %self.name, files = written.len() + 1, "project created");

        self.print_success();

        Ok(())
    }

    fn write_project_file(&self) -> Result<()> {
        let path = self.output_dir.join(DEFAULT_CONFIG_FILE);
        let content = ProjectConfig::starter(&self.vcs, &self.user, &self.name).to_toml()?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write project file: {}", path.display()))
    }

    /// Print success message with next steps
    fn print_success(&self) {
        println!("{}", style("✓ Project created successfully!").green().bold());
        println!();
        println!("{}", style("Next steps:").bold());
        println!();
        println!("  {} Navigate to project:", style("1.").cyan());
        println!(
            "     {} {}",
            style("$").dim(),
            style(format!("cd {}", self.output_dir.display())).cyan()
        );
        println!();
        println!("  {} Describe your models in {}", style("2.").cyan(), style(DEFAULT_CONFIG_FILE).bold());
        println!();
        println!("  {} Generate controllers, routes and docs:", style("3.").cyan());
        println!("     {} {}", style("$").dim(), style("apig gen").cyan());
        println!();
        println!("  {} Run the server:", style("4.").cyan());
        println!("     {} {}", style("$").dim(), style("AUTOMIGRATE=1 go run main.go").cyan());
        println!();
    }
}

/// Validate that a string is usable as a project directory and import path segment
fn is_valid_project_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
