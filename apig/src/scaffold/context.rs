//! Template contexts
//!
//! Each template renders from one of the structs below. [`ModelView`] is
//! shared by all per-model and aggregate templates; every field on it is read
//! by at least one of them. With strict undefined behaviour in the renderer,
//! a template referencing anything else fails to render.

use super::helpers::TemplateHelpers;
use crate::model::{Association, Detail, Field, Model, ValueKind};
use serde::Serialize;

/// Sample value shown for timestamps in API docs
const TIME_SAMPLE: &str = "2000-01-01T00:00:00Z";

/// Naming and documentation data for one model
#[derive(Debug, Clone, Serialize)]
pub struct ModelView {
    /// Exported singular name (`User`)
    pub name: String,
    /// Exported plural name (`Users`)
    pub plural: String,
    /// Snake-case file stem (`user`)
    pub snake: String,
    /// Collection route segment (`users`)
    pub route: String,
    /// Local variable for one instance (`user`)
    pub var_name: String,
    /// Local variable for a collection (`users`)
    pub var_plural: String,
    /// Singular name for prose (`user profile`)
    pub label: String,
    /// Plural name for prose (`user profiles`)
    pub label_plural: String,
    /// Serialized fields, in declaration order
    pub attributes: Vec<FieldView>,
}

impl ModelView {
    /// Build the view for `model`
    #[must_use]
    pub fn new(model: &Model) -> Self {
        Self {
            name: model.name.clone(),
            plural: TemplateHelpers::pluralize(&model.name),
            snake: TemplateHelpers::file_stem(&model.name),
            route: TemplateHelpers::route_segment(&model.name),
            var_name: TemplateHelpers::var_name(&model.name),
            var_plural: TemplateHelpers::var_plural(&model.name),
            label: TemplateHelpers::to_label(&model.name),
            label_plural: TemplateHelpers::to_label(&TemplateHelpers::pluralize(&model.name)),
            attributes: model.serialized_fields().map(FieldView::new).collect(),
        }
    }
}

/// One documented field
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    /// JSON key
    pub json_name: String,
    /// Example value for API Blueprint, empty when none applies
    pub doc_sample: String,
    /// MSON type for API Blueprint
    pub doc_type: String,
}

impl FieldView {
    /// Build the view for `field`
    #[must_use]
    pub fn new(field: &Field) -> Self {
        Self {
            json_name: field.json_name.clone(),
            doc_sample: doc_sample(field),
            doc_type: doc_type(field),
        }
    }
}

fn doc_sample(field: &Field) -> String {
    if !field.association.is_none() || field.field_type.is_repeated() {
        return String::new();
    }

    match field.field_type.kind() {
        ValueKind::Bool => "true".to_string(),
        kind if kind.is_float() => "1.5".to_string(),
        kind if kind.is_numeric() => "1".to_string(),
        ValueKind::String => field.json_name.clone(),
        ValueKind::Time => TIME_SAMPLE.to_string(),
        _ => String::new(),
    }
}

fn doc_type(field: &Field) -> String {
    let base = match &field.association {
        Association::BelongsTo(target) => TemplateHelpers::to_snake_case(target),
        Association::HasMany(target) => format!("array[{}]", TemplateHelpers::to_snake_case(target)),
        Association::None => {
            let element = match field.field_type.kind() {
                ValueKind::Bool => "boolean",
                ValueKind::String | ValueKind::Time => "string",
                ValueKind::Named(_) => "object",
                _ => "number",
            };
            if field.field_type.is_repeated() {
                format!("array[{element}]")
            } else {
                element.to_string()
            }
        }
    };

    if field.field_type.is_nullable() {
        format!("{base}, nullable")
    } else {
        base
    }
}

/// `controllers/{snake}.go`
#[derive(Debug, Serialize)]
pub struct ControllerContext<'a> {
    /// Go import path
    pub import_dir: &'a str,
    /// Current model
    pub model: ModelView,
}

/// `router/{snake}.go`
#[derive(Debug, Serialize)]
pub struct RouteContext<'a> {
    /// Go import path
    pub import_dir: &'a str,
    /// Current model
    pub model: ModelView,
}

/// `docs/{snake}.apib`
#[derive(Debug, Serialize)]
pub struct ApibContext<'a> {
    /// Media type vendor
    pub vendor: &'a str,
    /// Current model
    pub model: ModelView,
}

/// `router/router.go` and `db/db.go`
#[derive(Debug, Serialize)]
pub struct IndexContext<'a> {
    /// Go import path
    pub import_dir: &'a str,
    /// All models in order
    pub models: Vec<ModelView>,
}

/// `controllers/root.go` and `README.md`
#[derive(Debug, Serialize)]
pub struct ModelsContext {
    /// All models in order
    pub models: Vec<ModelView>,
}

/// `docs/index.apib`
#[derive(Debug, Serialize)]
pub struct ApibIndexContext<'a> {
    /// Project name
    pub project: &'a str,
    /// Go import path
    pub import_dir: &'a str,
    /// All models in order
    pub models: Vec<ModelView>,
}

/// Templated skeleton files
#[derive(Debug, Serialize)]
pub struct SkeletonContext<'a> {
    /// Project name
    pub project: &'a str,
    /// Go import path
    pub import_dir: &'a str,
    /// Media type vendor
    pub vendor: &'a str,
}

impl<'a> SkeletonContext<'a> {
    /// Build from the project identity in `detail`
    #[must_use]
    pub fn new(detail: &'a Detail) -> Self {
        Self {
            project: &detail.project,
            import_dir: &detail.import_dir,
            vendor: detail.vendor(),
        }
    }
}

/// Views for every model, preserving order
#[must_use]
pub fn model_views(models: &[Model]) -> Vec<ModelView> {
    models.iter().map(ModelView::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldType;

    fn field(name: &str, json: &str, ty: &str) -> Field {
        Field::new(name, json, ty.parse::<FieldType>().unwrap())
    }

    #[test]
    fn test_model_view_names() {
        let view = ModelView::new(&Model::new("UserProfile", vec![field("ID", "id", "uint")]));
        assert_eq!(view.name, "UserProfile");
        assert_eq!(view.plural, "UserProfiles");
        assert_eq!(view.snake, "user_profile");
        assert_eq!(view.route, "user_profiles");
        assert_eq!(view.var_name, "userProfile");
        assert_eq!(view.var_plural, "userProfiles");
        assert_eq!(view.label, "user profile");
        assert_eq!(view.label_plural, "user profiles");
    }

    #[test]
    fn test_labels_skip_identifier_suffix() {
        let view = ModelView::new(&Model::new("Version", vec![field("ID", "id", "uint")]));
        assert_eq!(view.var_name, "versionItem");
        assert_eq!(view.label, "version");
        assert_eq!(view.label_plural, "versions");
    }

    #[test]
    fn test_doc_types_and_samples() {
        let cases = [
            (field("ID", "id", "uint"), "1", "number"),
            (field("Name", "name", "string"), "name", "string"),
            (field("Score", "score", "float64"), "1.5", "number"),
            (field("Active", "active", "bool"), "true", "boolean"),
            (field("CreatedAt", "created_at", "*time.Time"), TIME_SAMPLE, "string, nullable"),
            (field("Tags", "tags", "[]string"), "", "array[string]"),
            (field("Meta", "meta", "Meta"), "", "object"),
        ];

        for (field, sample, ty) in cases {
            let view = FieldView::new(&field);
            assert_eq!(view.doc_sample, sample, "sample for {}", field.name);
            assert_eq!(view.doc_type, ty, "type for {}", field.name);
        }
    }

    #[test]
    fn test_association_doc_types() {
        let belongs = field("UserProfile", "user_profile", "*UserProfile")
            .with_association(Association::BelongsTo("UserProfile".to_string()));
        let view = FieldView::new(&belongs);
        assert_eq!(view.doc_type, "user_profile, nullable");
        assert_eq!(view.doc_sample, "");

        let many = field("Comments", "comments", "[]Comment")
            .with_association(Association::HasMany("Comment".to_string()));
        assert_eq!(FieldView::new(&many).doc_type, "array[comment]");
    }

    #[test]
    fn test_hidden_fields_are_not_documented() {
        let model = Model::new(
            "User",
            vec![
                field("ID", "id", "uint"),
                field("Password", "password", "string").with_tag(r#"json:"-""#),
            ],
        );
        let view = ModelView::new(&model);
        assert_eq!(view.attributes.len(), 1);
        assert_eq!(view.attributes[0].json_name, "id");
    }

    #[test]
    fn test_skeleton_context_uses_user_as_vendor() {
        let detail = Detail::new("github.com", "wantedly", "api-server", vec![]);
        let ctx = SkeletonContext::new(&detail);
        assert_eq!(ctx.vendor, "wantedly");
        assert_eq!(ctx.import_dir, "github.com/wantedly/api-server");
    }
}
