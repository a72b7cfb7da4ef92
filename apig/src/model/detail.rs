//! Models and the project description handed to the generator

use super::field::Field;
use crate::error::InputError;
use crate::scaffold::TemplateHelpers;
use std::collections::{HashMap, HashSet};

/// Name of the field every model must declare
pub const IDENTIFIER_FIELD: &str = "ID";

/// A data model: exported `PascalCase` name plus ordered fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Singular exported name (e.g., `User`, `UserProfile`)
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<Field>,
}

impl Model {
    /// Create a model
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Look up a field by Go name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fields that appear in JSON output, in declaration order
    pub fn serialized_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.is_serialized())
    }

    /// Check the model on its own: name, fields, identifier
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] found.
    pub fn validate(&self) -> Result<(), InputError> {
        if !is_pascal_case(&self.name) {
            return Err(InputError::InvalidModelName(self.name.clone()));
        }

        if TemplateHelpers::pluralize(&self.name) == self.name {
            return Err(InputError::UncountableName(self.name.clone()));
        }

        if self.fields.is_empty() {
            return Err(InputError::NoFields(self.name.clone()));
        }

        let mut names = HashSet::new();
        let mut json_names = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() || field.json_name.is_empty() {
                return Err(InputError::EmptyFieldName {
                    model: self.name.clone(),
                });
            }
            if !names.insert(field.name.as_str()) {
                return Err(InputError::DuplicateField {
                    model: self.name.clone(),
                    field: field.name.clone(),
                });
            }
            if !json_names.insert(field.json_name.as_str()) {
                return Err(InputError::DuplicateField {
                    model: self.name.clone(),
                    field: field.json_name.clone(),
                });
            }
        }

        if self.field(IDENTIFIER_FIELD).is_none() {
            return Err(InputError::MissingIdentifier(self.name.clone()));
        }

        Ok(())
    }
}

/// Project identity plus the models to generate
///
/// Built once before generation and only read afterwards. Per-model
/// generators work on [`Detail::model`]; aggregate generators iterate
/// [`Detail::models`] in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    /// VCS host (e.g., `github.com`)
    pub vcs: String,
    /// Owner on the VCS host, also used as the media type vendor
    pub user: String,
    /// Project name
    pub project: String,
    /// Go import path of the generated project
    pub import_dir: String,
    /// Model the per-model generators work on
    pub model: Option<Model>,
    /// All models, in output order
    pub models: Vec<Model>,
}

impl Detail {
    /// Create a detail with `import_dir` derived as `{vcs}/{user}/{project}`
    pub fn new(
        vcs: impl Into<String>,
        user: impl Into<String>,
        project: impl Into<String>,
        models: Vec<Model>,
    ) -> Self {
        let vcs = vcs.into();
        let user = user.into();
        let project = project.into();
        let import_dir = format!("{vcs}/{user}/{project}");

        Self {
            vcs,
            user,
            project,
            import_dir,
            model: None,
            models,
        }
    }

    /// Override the derived import path
    #[must_use]
    pub fn with_import_dir(mut self, import_dir: impl Into<String>) -> Self {
        self.import_dir = import_dir.into();
        self
    }

    /// Copy of this detail with `model` as the current model
    #[must_use]
    pub fn for_model(&self, model: &Model) -> Self {
        Self {
            model: Some(model.clone()),
            ..self.clone()
        }
    }

    /// Vendor name used in `application/vnd.{vendor}+json`
    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.user
    }

    /// Look up a model by name
    #[must_use]
    pub fn find_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.name == name)
    }

    /// The current model, checked against the model set
    ///
    /// # Errors
    ///
    /// - [`InputError::NoCurrentModel`] if no model is selected
    /// - [`InputError::ModelNotInSet`] if it is not one of `models`
    pub fn current_model(&self) -> Result<&Model, InputError> {
        let model = self.model.as_ref().ok_or(InputError::NoCurrentModel)?;
        if self.find_model(&model.name).is_none() {
            return Err(InputError::ModelNotInSet(model.name.clone()));
        }
        Ok(model)
    }

    /// Check that every association of `model` targets a known model
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnknownAssociation`] for the first bad target.
    pub fn check_associations(&self, model: &Model) -> Result<(), InputError> {
        for field in &model.fields {
            if let Some(target) = field.association.target() {
                if self.find_model(target).is_none() {
                    return Err(InputError::UnknownAssociation {
                        model: model.name.clone(),
                        field: field.name.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Check that no two models derive the same file stem, route segment or
    /// exported identifier
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NameCollision`] for the first clash, naming the
    /// earlier model as `other`.
    pub fn check_generated_names(&self) -> Result<(), InputError> {
        let mut identifiers = HashMap::new();
        let mut paths = HashMap::new();

        for model in &self.models {
            let name = model.name.as_str();
            claim(&mut identifiers, model.name.clone(), name)?;
            claim(&mut identifiers, TemplateHelpers::pluralize(name), name)?;
            claim(&mut paths, TemplateHelpers::file_stem(name), name)?;
            claim(&mut paths, TemplateHelpers::route_segment(name), name)?;
        }

        Ok(())
    }

    /// Validate the whole description before anything is written
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] found, checking project identity,
    /// then each model in order, then generated names, then associations,
    /// then the current model.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.models.is_empty() {
            return Err(InputError::NoModels);
        }

        if self.import_dir.trim().is_empty() {
            return Err(InputError::EmptyImportPath);
        }

        let mut seen = HashSet::new();
        for model in &self.models {
            model.validate()?;
            if !seen.insert(model.name.as_str()) {
                return Err(InputError::DuplicateModel(model.name.clone()));
            }
        }

        self.check_generated_names()?;

        for model in &self.models {
            self.check_associations(model)?;
        }

        if self.model.is_some() {
            self.current_model()?;
        }

        Ok(())
    }
}

/// Record `model` as the owner of `generated`, failing if another model owns it
fn claim<'a>(
    owners: &mut HashMap<String, &'a str>,
    generated: String,
    model: &'a str,
) -> Result<(), InputError> {
    match owners.get(&generated) {
        Some(&other) if other != model => Err(InputError::NameCollision {
            model: model.to_string(),
            other: other.to_string(),
            name: generated,
        }),
        Some(_) => Ok(()),
        None => {
            owners.insert(generated, model);
            Ok(())
        }
    }
}

fn is_pascal_case(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase()) && chars.all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Association, FieldType};

    fn field(name: &str, json: &str, ty: &str) -> Field {
        Field::new(name, json, ty.parse::<FieldType>().unwrap())
    }

    fn user() -> Model {
        Model::new(
            "User",
            vec![field("ID", "id", "uint"), field("Name", "name", "string")],
        )
    }

    fn detail(models: Vec<Model>) -> Detail {
        Detail::new("github.com", "wantedly", "api-server", models)
    }

    #[test]
    fn test_import_dir_is_derived() {
        let detail = detail(vec![user()]);
        assert_eq!(detail.import_dir, "github.com/wantedly/api-server");
        assert_eq!(detail.vendor(), "wantedly");
    }

    #[test]
    fn test_import_dir_override() {
        let detail = detail(vec![user()]).with_import_dir("example.com/api");
        assert_eq!(detail.import_dir, "example.com/api");
    }

    #[test]
    fn test_valid_detail() {
        assert_eq!(detail(vec![user()]).validate(), Ok(()));
    }

    #[test]
    fn test_no_models() {
        assert_eq!(detail(vec![]).validate(), Err(InputError::NoModels));
    }

    #[test]
    fn test_empty_import_path() {
        let detail = detail(vec![user()]).with_import_dir("  ");
        assert_eq!(detail.validate(), Err(InputError::EmptyImportPath));
    }

    #[test]
    fn test_invalid_model_names() {
        for name in ["user", "", "User_Profile", "User Profile", "1User"] {
            let model = Model::new(name, vec![field("ID", "id", "uint")]);
            assert_eq!(
                detail(vec![model]).validate(),
                Err(InputError::InvalidModelName(name.to_string()))
            );
        }
    }

    #[test]
    fn test_duplicate_model() {
        assert_eq!(
            detail(vec![user(), user()]).validate(),
            Err(InputError::DuplicateModel("User".to_string()))
        );
    }

    #[test]
    fn test_model_without_fields() {
        let model = Model::new("Empty", vec![]);
        assert_eq!(
            detail(vec![model]).validate(),
            Err(InputError::NoFields("Empty".to_string()))
        );
    }

    #[test]
    fn test_missing_identifier() {
        let model = Model::new("Tag", vec![field("Name", "name", "string")]);
        assert_eq!(
            detail(vec![model]).validate(),
            Err(InputError::MissingIdentifier("Tag".to_string()))
        );
    }

    #[test]
    fn test_empty_field_name() {
        let model = Model::new("Tag", vec![field("ID", "id", "uint"), field("Name", "", "string")]);
        assert_eq!(
            detail(vec![model]).validate(),
            Err(InputError::EmptyFieldName {
                model: "Tag".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_field_and_json_name() {
        let model = Model::new("Tag", vec![field("ID", "id", "uint"), field("ID", "other", "uint")]);
        assert_eq!(
            detail(vec![model]).validate(),
            Err(InputError::DuplicateField {
                model: "Tag".to_string(),
                field: "ID".to_string()
            })
        );

        let model = Model::new("Tag", vec![field("ID", "id", "uint"), field("Key", "id", "string")]);
        assert_eq!(
            detail(vec![model]).validate(),
            Err(InputError::DuplicateField {
                model: "Tag".to_string(),
                field: "id".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_association() {
        let post = Model::new(
            "Post",
            vec![
                field("ID", "id", "uint"),
                field("Author", "author", "*Author")
                    .with_association(Association::BelongsTo("Author".to_string())),
            ],
        );
        assert_eq!(
            detail(vec![post]).validate(),
            Err(InputError::UnknownAssociation {
                model: "Post".to_string(),
                field: "Author".to_string(),
                target: "Author".to_string()
            })
        );
    }

    #[test]
    fn test_forward_association_is_allowed() {
        let post = Model::new(
            "Post",
            vec![
                field("ID", "id", "uint"),
                field("User", "user", "*User").with_association(Association::BelongsTo("User".to_string())),
            ],
        );
        assert_eq!(detail(vec![post, user()]).validate(), Ok(()));
    }

    #[test]
    fn test_uncountable_model_names() {
        for name in ["News", "Series"] {
            let model = Model::new(name, vec![field("ID", "id", "uint")]);
            assert_eq!(
                detail(vec![model]).validate(),
                Err(InputError::UncountableName(name.to_string()))
            );
        }
    }

    #[test]
    fn test_models_sharing_a_file_stem() {
        let upper = Model::new("HTTPRequest", vec![field("ID", "id", "uint")]);
        let mixed = Model::new("HttpRequest", vec![field("ID", "id", "uint")]);
        assert_eq!(
            detail(vec![upper, mixed]).validate(),
            Err(InputError::NameCollision {
                model: "HttpRequest".to_string(),
                other: "HTTPRequest".to_string(),
                name: "http_request".to_string()
            })
        );
    }

    #[test]
    fn test_model_named_like_another_plural() {
        let users = Model::new("Users", vec![field("ID", "id", "uint")]);
        let detail = detail(vec![user(), users]);
        assert!(detail.validate().is_err());
        assert_eq!(
            detail.check_generated_names(),
            Err(InputError::NameCollision {
                model: "Users".to_string(),
                other: "User".to_string(),
                name: "Users".to_string()
            })
        );
    }

    #[test]
    fn test_distinct_models_pass_name_check() {
        let post = Model::new("Post", vec![field("ID", "id", "uint")]);
        let profile = Model::new("UserProfile", vec![field("ID", "id", "uint")]);
        assert_eq!(detail(vec![user(), post, profile]).check_generated_names(), Ok(()));
    }

    #[test]
    fn test_current_model() {
        let base = detail(vec![user()]);
        assert_eq!(base.current_model(), Err(InputError::NoCurrentModel));

        let scoped = base.for_model(&user());
        assert_eq!(scoped.current_model().map(|m| m.name.as_str()), Ok("User"));

        let stranger = Model::new("Post", vec![field("ID", "id", "uint")]);
        let outside = base.for_model(&stranger);
        assert_eq!(
            outside.current_model(),
            Err(InputError::ModelNotInSet("Post".to_string()))
        );
        assert_eq!(
            outside.validate(),
            Err(InputError::ModelNotInSet("Post".to_string()))
        );
    }

    #[test]
    fn test_serialized_fields_keep_order() {
        let model = Model::new(
            "User",
            vec![
                field("ID", "id", "uint"),
                field("Password", "password", "string").with_tag(r#"json:"-""#),
                field("Email", "email", "string"),
            ],
        );
        let names: Vec<_> = model.serialized_fields().map(|f| f.json_name.as_str()).collect();
        assert_eq!(names, ["id", "email"]);
    }
}
