//! Data model describing what to generate
//!
//! A [`Detail`] carries the project identity and an ordered list of
//! [`Model`]s, each made of ordered [`Field`]s.

mod detail;
mod field;

pub use detail::{Detail, Model, IDENTIFIER_FIELD};
pub use field::{Association, Field, FieldType, ValueKind};
