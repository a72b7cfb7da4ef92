//! Field definitions and Go type notation
//!
//! Fields carry the Go type they are declared with in the generated model
//! struct. Types are written in Go notation and parsed into [`FieldType`].
//!
//! # Supported Types
//!
//! ## Primitive Kinds
//! - `bool`
//! - `int`, `int64`, `uint`, `uint64`
//! - `float32`, `float64`
//! - `string`
//! - `time.Time`
//!
//! Any other identifier (optionally package-qualified, e.g. `sql.NullString`)
//! is kept as a named type.
//!
//! ## Modifiers
//! - `*T` - nullable
//! - `[]T` - repeated (slice)
//!
//! # Examples
//!
//! ```text
//! uint          → ID column
//! *time.Time    → nullable timestamp
//! []Comment     → has-many collection
//! []*Comment    → has-many collection of pointers
//! ```

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base kind of a Go field type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `int64`
    Int64,
    /// `uint`
    Uint,
    /// `uint64`
    Uint64,
    /// `float32`
    Float32,
    /// `float64`
    Float64,
    /// `string`
    String,
    /// `time.Time`
    Time,
    /// Any other named type, usually another model
    Named(String),
}

impl ValueKind {
    /// Whether the kind serializes as a JSON number
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int | Self::Int64 | Self::Uint | Self::Uint64 | Self::Float32 | Self::Float64
        )
    }

    /// Whether the kind is a floating point number
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    fn parse(input: &str) -> Result<Self, InputError> {
        let kind = match input {
            "bool" => Self::Bool,
            "int" => Self::Int,
            "int64" => Self::Int64,
            "uint" => Self::Uint,
            "uint64" => Self::Uint64,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "string" => Self::String,
            "time.Time" => Self::Time,
            other if is_type_name(other) => Self::Named(other.to_string()),
            _ => return Err(InputError::InvalidFieldType(input.to_string())),
        };
        Ok(kind)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Int64 => write!(f, "int64"),
            Self::Uint => write!(f, "uint"),
            Self::Uint64 => write!(f, "uint64"),
            Self::Float32 => write!(f, "float32"),
            Self::Float64 => write!(f, "float64"),
            Self::String => write!(f, "string"),
            Self::Time => write!(f, "time.Time"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// A Go field type: base kind plus nullability and repetition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldType {
    kind: ValueKind,
    nullable: bool,
    repeated: bool,
}

impl FieldType {
    /// A plain, non-nullable, non-repeated type
    #[must_use]
    pub const fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: false,
            repeated: false,
        }
    }

    /// Mark the element type as a pointer
    #[must_use]
    pub const fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Mark the type as a slice
    #[must_use]
    pub const fn with_repeated(mut self, repeated: bool) -> Self {
        self.repeated = repeated;
        self
    }

    /// Base kind
    #[must_use]
    pub const fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// Whether the element is a pointer
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether the type is a slice
    #[must_use]
    pub const fn is_repeated(&self) -> bool {
        self.repeated
    }
}

impl FromStr for FieldType {
    type Err = InputError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (repeated, rest) = trimmed
            .strip_prefix("[]")
            .map_or((false, trimmed), |rest| (true, rest));
        let (nullable, rest) = rest
            .strip_prefix('*')
            .map_or((false, rest), |rest| (true, rest));

        let kind = ValueKind::parse(rest).map_err(|_| InputError::InvalidFieldType(input.to_string()))?;

        Ok(Self {
            kind,
            nullable,
            repeated,
        })
    }
}

impl TryFrom<String> for FieldType {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeated {
            write!(f, "[]")?;
        }
        if self.nullable {
            write!(f, "*")?;
        }
        write!(f, "{}", self.kind)
    }
}

/// Relationship between a field and another model
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Association {
    /// Plain column
    #[default]
    None,
    /// The field holds one instance of the target model
    BelongsTo(String),
    /// The field holds a collection of the target model
    HasMany(String),
}

impl Association {
    /// Target model name, if any
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::BelongsTo(target) | Self::HasMany(target) => Some(target),
        }
    }

    /// Whether this is a plain column
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A single model field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Exported Go identifier (e.g., `CreatedAt`)
    pub name: String,
    /// Wire-format key (e.g., `created_at`)
    pub json_name: String,
    /// Declared Go type
    pub field_type: FieldType,
    /// Raw struct tag, passed through verbatim
    pub tag: Option<String>,
    /// Association with another model
    pub association: Association,
}

impl Field {
    /// Create a plain field without tag or association
    pub fn new(name: impl Into<String>, json_name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            json_name: json_name.into(),
            field_type,
            tag: None,
            association: Association::None,
        }
    }

    /// Attach a raw struct tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Attach an association
    #[must_use]
    pub fn with_association(mut self, association: Association) -> Self {
        self.association = association;
        self
    }

    /// Whether the field appears in JSON output
    ///
    /// A `json:"-"` tag hides the field; `json:"-,"` names it `-` instead.
    #[must_use]
    pub fn is_serialized(&self) -> bool {
        self.tag
            .as_deref()
            .and_then(json_tag_value)
            .is_none_or(|value| value != "-")
    }
}

/// Value of the `json:"..."` entry in a Go struct tag
fn json_tag_value(tag: &str) -> Option<&str> {
    let start = tag.find("json:\"")? + "json:\"".len();
    let rest = &tag[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

fn is_type_name(input: &str) -> bool {
    !input.is_empty()
        && input.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
