//! Shared fixtures for integration tests

#![allow(dead_code)]

use apig::{Detail, Field, FieldType, Model};
use similar::TextDiff;

pub fn field(name: &str, json: &str, ty: &str) -> Field {
    Field::new(name, json, ty.parse::<FieldType>().unwrap())
}

pub fn user() -> Model {
    Model::new(
        "User",
        vec![
            field("ID", "id", "uint"),
            field("Name", "name", "string"),
            field("CreatedAt", "created_at", "*time.Time"),
            field("UpdatedAt", "updated_at", "*time.Time"),
        ],
    )
}

pub fn detail(models: Vec<Model>) -> Detail {
    Detail::new("github.com", "wantedly", "api-server", models)
}

/// Assert byte equality, printing a unified diff on mismatch
pub fn assert_same(name: &str, expected: &str, actual: &str) {
    if expected != actual {
        let diff = TextDiff::from_lines(expected, actual)
            .unified_diff()
            .header("expected", "actual")
            .to_string();
        panic!("{name} differs from fixture:\n{diff}");
    }
}
