//! Error types for project generation

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the generator
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

/// Label used in template errors raised by aggregate generators
pub const ALL_MODELS: &str = "all models";

/// Label used in template errors raised while assembling the skeleton
pub const SKELETON: &str = "skeleton";

/// Problems with the `Detail` handed to the generator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// No models were described
    #[error("at least one model is required")]
    NoModels,

    /// The Go import path is empty
    #[error("import path must not be empty")]
    EmptyImportPath,

    /// Model name is not an exported `PascalCase` identifier
    #[error("invalid model name '{0}': expected a PascalCase identifier")]
    InvalidModelName(String),

    /// Two models share a name
    #[error("model '{0}' is declared more than once")]
    DuplicateModel(String),

    /// Model declares no fields
    #[error("model '{0}' has no fields")]
    NoFields(String),

    /// Model lacks the `ID` field
    #[error("model '{0}' has no ID field")]
    MissingIdentifier(String),

    /// A field has an empty Go or JSON name
    #[error("model '{model}' has a field with an empty name")]
    EmptyFieldName {
        /// Owning model
        model: String,
    },

    /// A Go or JSON field name is used twice in one model
    #[error("model '{model}' declares '{field}' more than once")]
    DuplicateField {
        /// Owning model
        model: String,
        /// Repeated name
        field: String,
    },

    /// An association points at a model that is not part of the set
    #[error("field '{model}.{field}' refers to unknown model '{target}'")]
    UnknownAssociation {
        /// Owning model
        model: String,
        /// Field carrying the association
        field: String,
        /// Missing target model
        target: String,
    },

    /// The model's plural equals its singular, so list and item handlers clash
    #[error("model '{0}' has no distinct plural form")]
    UncountableName(String),

    /// Two models derive the same generated name (file, route or identifier)
    #[error("models '{model}' and '{other}' both generate '{name}'")]
    NameCollision {
        /// Model being checked
        model: String,
        /// Earlier model that already owns the name
        other: String,
        /// Colliding generated name
        name: String,
    },

    /// The current model is not a member of `models`
    #[error("current model '{0}' is not part of the model set")]
    ModelNotInSet(String),

    /// A per-model generator ran without a current model
    #[error("no current model selected")]
    NoCurrentModel,

    /// A field type string could not be parsed as Go type notation
    #[error("invalid field type '{0}'")]
    InvalidFieldType(String),
}

/// Coarse classification of a [`GenerateError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Template registration or rendering failed
    Template,
    /// Filesystem failure
    Io,
    /// Invalid input description
    Input,
}

/// Errors raised while generating a project
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Rendering a template failed
    #[error("failed to render template '{template}' for {model}")]
    Template {
        /// Template name
        template: String,
        /// Model the template was rendered for
        model: String,
        /// Underlying engine error
        source: minijinja::Error,
    },

    /// A template source could not be parsed
    #[error("invalid template '{template}'")]
    InvalidTemplate {
        /// Template name
        template: String,
        /// Underlying engine error
        source: minijinja::Error,
    },

    /// Reading or writing a file failed
    #[error("I/O error at '{}'", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The input description is invalid
    #[error(transparent)]
    Input(#[from] InputError),
}

impl GenerateError {
    /// Classify the error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Template { .. } | Self::InvalidTemplate { .. } => ErrorKind::Template,
            Self::Io { .. } => ErrorKind::Io,
            Self::Input(_) => ErrorKind::Input,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
