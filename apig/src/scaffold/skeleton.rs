//! Static project skeleton
//!
//! The manifest lists every file a fresh project starts with. Verbatim
//! entries are copied byte for byte; templated entries are rendered with
//! the project identity.

use super::context::SkeletonContext;
use super::generator::GeneratedFile;
use crate::error::{Result, SKELETON};
use crate::model::Detail;
use crate::templates::TemplateRenderer;
use std::path::{Path, PathBuf};

/// Where a skeleton file's content comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkeletonSource {
    /// Copied as-is
    Verbatim(&'static str),
    /// Rendered from the named template
    Templated(&'static str),
}

/// One file of the skeleton
#[derive(Debug, Clone, Copy)]
pub struct SkeletonEntry {
    /// Path relative to the output directory
    pub path: &'static str,
    /// Content source
    pub source: SkeletonSource,
}

const fn verbatim(path: &'static str, content: &'static str) -> SkeletonEntry {
    SkeletonEntry {
        path,
        source: SkeletonSource::Verbatim(content),
    }
}

const fn templated(path: &'static str, template: &'static str) -> SkeletonEntry {
    SkeletonEntry {
        path,
        source: SkeletonSource::Templated(template),
    }
}

/// Every file of a fresh project, in write order
pub const MANIFEST: &[SkeletonEntry] = &[
    templated("README.md", "skeleton/README.md.tmpl"),
    verbatim(".gitignore", include_str!("../../templates/skeleton/gitignore")),
    templated("main.go", "skeleton/main.go.tmpl"),
    templated("db/db.go", "skeleton/db/db.go.tmpl"),
    verbatim(
        "db/pagination.go",
        include_str!("../../templates/skeleton/db/pagination.go"),
    ),
    verbatim(
        "router/router.go",
        include_str!("../../templates/skeleton/router/router.go"),
    ),
    verbatim(
        "middleware/set_db.go",
        include_str!("../../templates/skeleton/middleware/set_db.go"),
    ),
    templated("server/server.go", "skeleton/server/server.go.tmpl"),
    verbatim(
        "helper/field.go",
        include_str!("../../templates/skeleton/helper/field.go"),
    ),
    verbatim(
        "helper/field_test.go",
        include_str!("../../templates/skeleton/helper/field_test.go"),
    ),
    templated("version/version.go", "skeleton/version/version.go.tmpl"),
    templated(
        "version/version_test.go",
        "skeleton/version/version_test.go.tmpl",
    ),
    verbatim("controllers/.gitkeep", ""),
    verbatim("models/.gitkeep", ""),
];

/// Render every manifest entry for `detail`
///
/// # Errors
///
/// Returns a template error if a templated entry fails to render.
pub fn render(renderer: &TemplateRenderer, detail: &Detail) -> Result<Vec<GeneratedFile>> {
    let ctx = SkeletonContext::new(detail);

    MANIFEST
        .iter()
        .map(|entry| -> Result<GeneratedFile> {
            let content = match entry.source {
                SkeletonSource::Verbatim(content) => content.to_string(),
                SkeletonSource::Templated(template) => renderer.render(template, SKELETON, &ctx)?,
            };
            Ok(GeneratedFile {
                path: PathBuf::from(entry.path),
                content,
                description: "project skeleton".to_string(),
            })
        })
        .collect()
}

/// Write the skeleton into `out_dir`, creating it if needed
///
/// Existing manifest files are overwritten; nothing else is touched.
///
/// # Errors
///
/// Returns an I/O error if `out_dir` or any file cannot be written, or a
/// template error from [`render`]. Everything is rendered before the first
/// write.
pub fn assemble(renderer: &TemplateRenderer, detail: &Detail, out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir).map_err(|e| crate::error::GenerateError::io(out_dir, e))?;

    render(renderer, detail)?
        .iter()
        .map(|file| file.write_to(out_dir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn detail() -> Detail {
        Detail::new("github.com", "wantedly", "api-server", vec![])
    }

    #[test]
    fn test_manifest_paths_are_unique() {
        let mut paths: Vec<_> = MANIFEST.iter().map(|e| e.path).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), MANIFEST.len());
    }

    #[test]
    fn test_templated_entries_render() {
        let renderer = TemplateRenderer::new().unwrap();
        let files = render(&renderer, &detail()).unwrap();

        let find = |path: &str| {
            files
                .iter()
                .find(|f| f.path == Path::new(path))
                .map(|f| f.content.as_str())
                .unwrap()
        };

        assert!(find("README.md").starts_with("# api-server\n"));
        assert!(find("main.go").contains("\"github.com/wantedly/api-server/db\""));
        assert!(find("server/server.go").contains("\"github.com/wantedly/api-server/router\""));
        assert!(find("version/version.go").contains(r"application/vnd\.wantedly\+json"));
        assert_eq!(find("controllers/.gitkeep"), "");
    }

    #[test]
    fn test_verbatim_entries_have_no_template_markers() {
        for entry in MANIFEST {
            if let SkeletonSource::Verbatim(content) = entry.source {
                assert!(!content.contains("{{"), "{} looks templated", entry.path);
            }
        }
    }

    #[test]
    fn test_assemble_creates_out_dir() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("nested").join("project");
        let renderer = TemplateRenderer::new().unwrap();

        let written = assemble(&renderer, &detail(), &out).unwrap();

        assert_eq!(written.len(), MANIFEST.len());
        for entry in MANIFEST {
            assert!(out.join(entry.path).is_file(), "missing {}", entry.path);
        }
    }

    #[test]
    fn test_assemble_fails_when_out_dir_is_a_file() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("taken");
        std::fs::write(&out, "").unwrap();
        let renderer = TemplateRenderer::new().unwrap();

        let err = assemble(&renderer, &detail(), &out).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }
}
