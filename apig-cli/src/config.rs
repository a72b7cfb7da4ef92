//! Project file configuration
//!
//! The project file (`apig.toml`) describes the project identity and its
//! models. Values are layered with figment, later sources winning:
//! 1. Defaults (`vcs = "github.com"`)
//! 2. The project file
//! 3. Environment variables (`APIG_*`, e.g. `APIG_USER`)
//!
//! ```toml
//! vcs = "github.com"
//! user = "wantedly"
//! project = "api-server"
//!
//! [[models]]
//! name = "Post"
//!
//! [[models.fields]]
//! name = "ID"
//! type = "uint"
//!
//! [[models.fields]]
//! name = "User"
//! type = "*User"
//! association = { belongs_to = "User" }
//! ```

use anyhow::{Context, Result};
use apig::{Association, Detail, Field, FieldType, InputError, Model, ValueKind};
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use inflector::Inflector;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default project file name
pub const DEFAULT_CONFIG_FILE: &str = "apig.toml";

/// Contents of a project file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// VCS host
    pub vcs: String,
    /// Owner on the VCS host
    #[serde(default)]
    pub user: String,
    /// Project name
    #[serde(default)]
    pub project: String,
    /// Go import path; derived from vcs/user/project when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_dir: Option<String>,
    /// Models in output order
    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

/// One model entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Exported model name
    pub name: String,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// One field entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Exported Go field name
    pub name: String,
    /// JSON key; defaults to the snake-case field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_name: Option<String>,
    /// Go type notation (`uint`, `*time.Time`, `[]Comment`)
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Raw struct tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Association with another model
    #[serde(default, skip_serializing_if = "Association::is_none")]
    pub association: Association,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            vcs: "github.com".to_string(),
            user: String::new(),
            project: String::new(),
            import_dir: None,
            models: Vec::new(),
        }
    }
}

impl ProjectConfig {
    /// Load the project file at `path`, layered over defaults and under
    /// `APIG_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `path` does not exist
    /// - The file contains invalid TOML or an unparsable field type
    /// - Required keys are missing from the merged configuration
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!(
                "Project file '{}' not found. Run `apig new <project>` or pass --config.",
                path.display()
            );
        }

        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path))
            .merge(Env::prefixed("APIG_").split("__").lowercase(true))
            .extract()
            .with_context(|| format!("Failed to load project file: {}", path.display()))?;

        Ok(config)
    }

    /// Starter configuration written by `apig new`
    #[must_use]
    pub fn starter(vcs: &str, user: &str, project: &str) -> Self {
        let field = |name: &str, field_type: FieldType| FieldConfig {
            name: name.to_string(),
            json_name: None,
            field_type,
            tag: None,
            association: Association::None,
        };
        let timestamp = FieldType::new(ValueKind::Time).with_nullable(true);

        Self {
            vcs: vcs.to_string(),
            user: user.to_string(),
            project: project.to_string(),
            import_dir: None,
            models: vec![ModelConfig {
                name: "User".to_string(),
                fields: vec![
                    field("ID", FieldType::new(ValueKind::Uint)),
                    field("Name", FieldType::new(ValueKind::String)),
                    field("CreatedAt", timestamp.clone()),
                    field("UpdatedAt", timestamp),
                ],
            }],
        }
    }

    /// Serialize as a project file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize project file")
    }

    /// Build the generator input
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the description is invalid.
    pub fn into_detail(self) -> Result<Detail, InputError> {
        let models = self.models.into_iter().map(ModelConfig::into_model).collect();
        let mut detail = Detail::new(self.vcs, self.user, self.project, models);
        if let Some(import_dir) = self.import_dir {
            detail = detail.with_import_dir(import_dir);
        }
        detail.validate()?;
        Ok(detail)
    }
}

impl ModelConfig {
    fn into_model(self) -> Model {
        Model::new(self.name, self.fields.into_iter().map(FieldConfig::into_field).collect())
    }
}

impl FieldConfig {
    fn into_field(self) -> Field {
        let json_name = self.json_name.unwrap_or_else(|| self.name.to_snake_case());
        let mut field = Field::new(self.name, json_name, self.field_type).with_association(self.association);
        field.tag = self.tag;
        field
    }
}
