//! apig: generates a CRUD API server in Go (gin + gorm) from model descriptions.
//!
//! Given a [`Detail`] (project identity plus ordered [`Model`]s), the
//! generator writes a static skeleton, per-model controllers, routes and
//! API Blueprint pages, then aggregate files listing every model.
//!
//! # Example
//!
//! ```rust,no_run
//! use apig::{Detail, Field, FieldType, Model};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let user = Model::new(
//!     "User",
//!     vec![
//!         Field::new("ID", "id", "uint".parse::<FieldType>()?),
//!         Field::new("Name", "name", "string".parse::<FieldType>()?),
//!     ],
//! );
//! let detail = Detail::new("github.com", "wantedly", "api-server", vec![user]);
//!
//! let written = apig::generate_project(&detail, "api-server".as_ref())?;
//! println!("wrote {} files", written.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod scaffold;
pub mod templates;

use std::path::{Path, PathBuf};

pub use error::{ErrorKind, GenerateError, InputError, Result};
pub use model::{Association, Detail, Field, FieldType, Model, ValueKind};
pub use scaffold::{GeneratedFile, ScaffoldGenerator, TemplateHelpers};
pub use templates::TemplateRenderer;

/// Generate a complete project into `out_dir` with the built-in templates
///
/// # Errors
///
/// Returns the first input, template or I/O error; see
/// [`ScaffoldGenerator::generate_project`].
pub fn generate_project(detail: &Detail, out_dir: &Path) -> Result<Vec<PathBuf>> {
    ScaffoldGenerator::new()?.generate_project(detail, out_dir)
}
