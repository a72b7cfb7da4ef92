//! CLI command implementations

pub mod generate;
pub mod new;

pub use generate::GenCommand;
pub use new::NewCommand;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shared by long-running commands
fn spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Failed to set progress style")?,
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(spinner)
}
