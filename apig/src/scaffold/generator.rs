//! Project generator orchestrator
//!
//! Coordinates everything written for a project:
//! - Skeleton (static support files)
//! - Per-model controllers, router fragments and API Blueprint pages
//! - Aggregates: database wiring, router index, root endpoint listing,
//!   API Blueprint index and README

use super::context::{
    model_views, ApibContext, ApibIndexContext, ControllerContext, IndexContext, ModelView,
    ModelsContext, RouteContext,
};
use super::skeleton;
use crate::error::{GenerateError, Result, ALL_MODELS};
use crate::model::{Detail, Model};
use crate::templates::{self, TemplateRenderer};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Generates a gin + gorm API server from a [`Detail`]
#[derive(Debug)]
pub struct ScaffoldGenerator {
    templates: TemplateRenderer,
}

impl ScaffoldGenerator {
    /// Create a generator using the built-in templates
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        Ok(Self::with_renderer(TemplateRenderer::new()?))
    }

    /// Create a generator using a prepared renderer (e.g. with overrides)
    #[must_use]
    pub const fn with_renderer(templates: TemplateRenderer) -> Self {
        Self { templates }
    }

    /// Generate the whole project into `out_dir`
    ///
    /// This orchestrates:
    /// 1. Validation of `detail` (nothing is written if it fails)
    /// 2. Skeleton files
    /// 3. For each model in order: controller, router fragment, API doc page
    /// 4. Database wiring, router index, root endpoints, API doc index, README
    ///
    /// Stops at the first failure. Files written before it are left in place.
    ///
    /// # Errors
    ///
    /// Returns the first input, template or I/O error encountered.
    pub fn generate_project(&self, detail: &Detail, out_dir: &Path) -> Result<Vec<PathBuf>> {
        detail.validate()?;

        let mut written = self.assemble_skeleton(detail, out_dir)?;

        for model in &detail.models {
            let scoped = detail.for_model(model);
            written.push(self.generate_controller(&scoped, out_dir)?);
            written.push(self.generate_route(&scoped, out_dir)?);
            written.push(self.generate_apib_model(&scoped, out_dir)?);
        }

        written.push(self.generate_db(detail, out_dir)?);
        written.push(self.generate_router(detail, out_dir)?);
        written.push(self.generate_root(&detail.models, out_dir)?);
        written.push(self.generate_apib_index(detail, out_dir)?);
        written.push(self.generate_readme(&detail.models, out_dir)?);

        debug!(files = written.len(), out_dir = %out_dir.display(), "project generated");
        Ok(written)
    }

    /// Copy the static skeleton into `out_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if `out_dir` cannot be created or a file cannot be
    /// rendered or written.
    pub fn assemble_skeleton(&self, detail: &Detail, out_dir: &Path) -> Result<Vec<PathBuf>> {
        skeleton::assemble(&self.templates, detail, out_dir)
    }

    /// Write `controllers/{snake}.go` for the current model
    ///
    /// # Errors
    ///
    /// Input errors for a missing current model or bad association, then
    /// template and I/O errors.
    pub fn generate_controller(&self, detail: &Detail, out_dir: &Path) -> Result<PathBuf> {
        self.controller(detail)?.write_to(out_dir)
    }

    /// Write `router/{snake}.go` for the current model
    ///
    /// # Errors
    ///
    /// See [`Self::generate_controller`].
    pub fn generate_route(&self, detail: &Detail, out_dir: &Path) -> Result<PathBuf> {
        self.route(detail)?.write_to(out_dir)
    }

    /// Write `docs/{snake}.apib` for the current model
    ///
    /// # Errors
    ///
    /// See [`Self::generate_controller`].
    pub fn generate_apib_model(&self, detail: &Detail, out_dir: &Path) -> Result<PathBuf> {
        self.apib_model(detail)?.write_to(out_dir)
    }

    /// Write `db/db.go` registering every model for auto-migration
    ///
    /// Takes a detail like the per-model generators but ignores the current
    /// model.
    ///
    /// # Errors
    ///
    /// Template and I/O errors.
    pub fn generate_db(&self, detail: &Detail, out_dir: &Path) -> Result<PathBuf> {
        self.db(detail)?.write_to(out_dir)
    }

    /// Write `router/router.go` mounting every model's routes
    ///
    /// # Errors
    ///
    /// Template and I/O errors.
    pub fn generate_router(&self, detail: &Detail, out_dir: &Path) -> Result<PathBuf> {
        self.router(detail)?.write_to(out_dir)
    }

    /// Write `controllers/root.go` listing every model's endpoints
    ///
    /// # Errors
    ///
    /// Template and I/O errors.
    pub fn generate_root(&self, models: &[Model], out_dir: &Path) -> Result<PathBuf> {
        self.root(models)?.write_to(out_dir)
    }

    /// Write `docs/index.apib` including every model's page
    ///
    /// # Errors
    ///
    /// Template and I/O errors.
    pub fn generate_apib_index(&self, detail: &Detail, out_dir: &Path) -> Result<PathBuf> {
        self.apib_index(detail)?.write_to(out_dir)
    }

    /// Write `README.md` with one endpoint section per model
    ///
    /// # Errors
    ///
    /// Template and I/O errors.
    pub fn generate_readme(&self, models: &[Model], out_dir: &Path) -> Result<PathBuf> {
        self.readme(models)?.write_to(out_dir)
    }

    /// Render the controller for the current model
    ///
    /// # Errors
    ///
    /// See [`Self::generate_controller`].
    pub fn controller(&self, detail: &Detail) -> Result<GeneratedFile> {
        let model = Self::current_view(detail)?;
        let path = PathBuf::from(format!("controllers/{}.go", model.snake));
        let description = format!("CRUD handlers for {}", model.name);
        let content = self.templates.render(
            templates::CONTROLLER,
            &model.name.clone(),
            &ControllerContext {
                import_dir: &detail.import_dir,
                model,
            },
        )?;

        Ok(GeneratedFile {
            path,
            content,
            description,
        })
    }

    /// Render the router fragment for the current model
    ///
    /// # Errors
    ///
    /// See [`Self::generate_controller`].
    pub fn route(&self, detail: &Detail) -> Result<GeneratedFile> {
        let model = Self::current_view(detail)?;
        let path = PathBuf::from(format!("router/{}.go", model.snake));
        let description = format!("Routes for /api/{}", model.route);
        let content = self.templates.render(
            templates::ROUTE,
            &model.name.clone(),
            &RouteContext {
                import_dir: &detail.import_dir,
                model,
            },
        )?;

        Ok(GeneratedFile {
            path,
            content,
            description,
        })
    }

    /// Render the API Blueprint page for the current model
    ///
    /// # Errors
    ///
    /// See [`Self::generate_controller`].
    pub fn apib_model(&self, detail: &Detail) -> Result<GeneratedFile> {
        let model = Self::current_view(detail)?;
        let path = PathBuf::from(format!("docs/{}.apib", model.snake));
        let description = format!("API Blueprint for {}", model.name);
        let content = self.templates.render(
            templates::APIB_MODEL,
            &model.name.clone(),
            &ApibContext {
                vendor: detail.vendor(),
                model,
            },
        )?;

        Ok(GeneratedFile {
            path,
            content,
            description,
        })
    }

    /// Render the database wiring
    ///
    /// # Errors
    ///
    /// Template errors.
    pub fn db(&self, detail: &Detail) -> Result<GeneratedFile> {
        self.render_index(templates::DB, "db/db.go", "Database connection and migrations", detail)
    }

    /// Render the router index
    ///
    /// # Errors
    ///
    /// Template errors.
    pub fn router(&self, detail: &Detail) -> Result<GeneratedFile> {
        self.render_index(templates::ROUTER, "router/router.go", "Route registration", detail)
    }

    /// Render the root endpoint listing
    ///
    /// # Errors
    ///
    /// Template errors.
    pub fn root(&self, models: &[Model]) -> Result<GeneratedFile> {
        let content = self.templates.render(
            templates::ROOT,
            ALL_MODELS,
            &ModelsContext {
                models: model_views(models),
            },
        )?;

        Ok(GeneratedFile {
            path: PathBuf::from("controllers/root.go"),
            content,
            description: "Endpoint listing".to_string(),
        })
    }

    /// Render the API Blueprint index
    ///
    /// # Errors
    ///
    /// Template errors.
    pub fn apib_index(&self, detail: &Detail) -> Result<GeneratedFile> {
        let content = self.templates.render(
            templates::APIB_INDEX,
            ALL_MODELS,
            &ApibIndexContext {
                project: &detail.project,
                import_dir: &detail.import_dir,
                models: model_views(&detail.models),
            },
        )?;

        Ok(GeneratedFile {
            path: PathBuf::from("docs/index.apib"),
            content,
            description: "API Blueprint index".to_string(),
        })
    }

    /// Render the README
    ///
    /// # Errors
    ///
    /// Template errors.
    pub fn readme(&self, models: &[Model]) -> Result<GeneratedFile> {
        let content = self.templates.render(
            templates::README,
            ALL_MODELS,
            &ModelsContext {
                models: model_views(models),
            },
        )?;

        Ok(GeneratedFile {
            path: PathBuf::from("README.md"),
            content,
            description: "Endpoint list".to_string(),
        })
    }

    fn render_index(
        &self,
        template: &str,
        path: &str,
        description: &str,
        detail: &Detail,
    ) -> Result<GeneratedFile> {
        let content = self.templates.render(
            template,
            ALL_MODELS,
            &IndexContext {
                import_dir: &detail.import_dir,
                models: model_views(&detail.models),
            },
        )?;

        Ok(GeneratedFile {
            path: PathBuf::from(path),
            content,
            description: description.to_string(),
        })
    }

    fn current_view(detail: &Detail) -> Result<ModelView> {
        let model = detail.current_model()?;
        detail.check_associations(model)?;
        Ok(ModelView::new(model))
    }
}

/// Represents a generated file
#[derive(Debug)]
pub struct GeneratedFile {
    /// Relative path from project root
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
}

impl GeneratedFile {
    /// Write under `out_dir`, creating parent directories
    ///
    /// Returns the relative path that was written.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] if a directory or the file cannot be
    /// written.
    pub fn write_to(&self, out_dir: &Path) -> Result<PathBuf> {
        let target = out_dir.join(&self.path);

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GenerateError::io(parent, e))?;
        }
        std::fs::write(&target, &self.content).map_err(|e| GenerateError::io(&target, e))?;

        debug!(path = %self.path.display(), bytes = self.content.len(), "wrote file");
        Ok(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, InputError};
    use crate::model::{Association, Field, FieldType};
    use tempfile::tempdir;

    fn field(name: &str, json: &str, ty: &str) -> Field {
        Field::new(name, json, ty.parse::<FieldType>().unwrap())
    }

    fn user() -> Model {
        Model::new(
            "User",
            vec![
                field("ID", "id", "uint"),
                field("Name", "name", "string"),
            ],
        )
    }

    fn category() -> Model {
        Model::new("Category", vec![field("ID", "id", "uint")])
    }

    fn detail(models: Vec<Model>) -> Detail {
        Detail::new("github.com", "wantedly", "api-server", models)
    }

    #[test]
    fn test_controller_requires_current_model() {
        let generator = ScaffoldGenerator::new().unwrap();
        let err = generator.controller(&detail(vec![user()])).unwrap_err();
        assert!(matches!(err, GenerateError::Input(InputError::NoCurrentModel)));
    }

    #[test]
    fn test_controller_rejects_unknown_association() {
        let post = Model::new(
            "Post",
            vec![
                field("ID", "id", "uint"),
                field("Author", "author", "*Author")
                    .with_association(Association::BelongsTo("Author".to_string())),
            ],
        );
        let base = detail(vec![post.clone()]);
        let generator = ScaffoldGenerator::new().unwrap();

        let err = generator.apib_model(&base.for_model(&post)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_controller_handlers() {
        let generator = ScaffoldGenerator::new().unwrap();
        let base = detail(vec![user()]);
        let file = generator.controller(&base.for_model(&user())).unwrap();

        assert_eq!(file.path, PathBuf::from("controllers/user.go"));
        for handler in ["GetUsers", "GetUser", "CreateUser", "UpdateUser", "DeleteUser"] {
            assert!(
                file.content.contains(&format!("func {handler}(c *gin.Context)")),
                "missing {handler}"
            );
        }
    }

    #[test]
    fn test_route_uses_plural_route_segment() {
        let generator = ScaffoldGenerator::new().unwrap();
        let base = detail(vec![category()]);
        let file = generator.route(&base.for_model(&category())).unwrap();

        assert_eq!(file.path, PathBuf::from("router/category.go"));
        assert!(file.content.contains("func initCategoriesRoutes(api *gin.RouterGroup)"));
        assert!(file.content.contains("api.GET(\"/categories/:id\", controllers.GetCategory)"));
    }

    #[test]
    fn test_apib_prose_uses_readable_names() {
        let version = Model::new("Version", vec![field("ID", "id", "uint")]);
        let generator = ScaffoldGenerator::new().unwrap();
        let file = generator
            .apib_model(&detail(vec![version.clone()]).for_model(&version))
            .unwrap();

        assert!(file.content.contains("### Create version [POST]"));
        assert!(file.content.contains("## versions [/versions]"));
        assert!(!file.content.contains("versionItem"));
    }

    #[test]
    fn test_router_preserves_model_order() {
        let generator = ScaffoldGenerator::new().unwrap();
        let file = generator.router(&detail(vec![user(), category()])).unwrap();

        let users = file.content.find("initUsersRoutes(api)").unwrap();
        let categories = file.content.find("initCategoriesRoutes(api)").unwrap();
        assert!(users < categories);
    }

    #[test]
    fn test_db_registers_every_model() {
        let generator = ScaffoldGenerator::new().unwrap();
        let file = generator.db(&detail(vec![user(), category()])).unwrap();

        assert_eq!(file.path, PathBuf::from("db/db.go"));
        assert!(file.content.contains("\t\t\t&models.User{},\n\t\t\t&models.Category{},\n"));
    }

    #[test]
    fn test_root_lists_collection_and_member_urls() {
        let generator = ScaffoldGenerator::new().unwrap();
        let file = generator.root(&[category()]).unwrap();

        assert!(file.content.contains("\"categories_url\": baseURL + \"/api/categories\","));
        assert!(file.content.contains("\"category_url\": baseURL + \"/api/categories/{id}\","));
    }

    #[test]
    fn test_write_to_creates_parents() {
        let temp = tempdir().unwrap();
        let file = GeneratedFile {
            path: PathBuf::from("docs/deep/x.apib"),
            content: "x".to_string(),
            description: String::new(),
        };

        let written = file.write_to(temp.path()).unwrap();
        assert_eq!(written, PathBuf::from("docs/deep/x.apib"));
        assert_eq!(std::fs::read_to_string(temp.path().join(&written)).unwrap(), "x");
    }

    #[test]
    fn test_generate_project_validates_first() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("out");
        let generator = ScaffoldGenerator::new().unwrap();

        let err = generator.generate_project(&detail(vec![]), &out).unwrap_err();
        assert!(matches!(err, GenerateError::Input(InputError::NoModels)));
        assert!(!out.exists());
    }
}
