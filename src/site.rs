//! Static site generation.
//!
//! A build wipes the output directory, copies static assets into it, then
//! converts every Markdown file under the content directory into an HTML page
//! by filling the template's title and content placeholders. Pages are
//! independent, so they are rendered on the rayon global pool.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::{Config, TemplateConfig};

/// Error returned by the site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Cannot read template {}: {source}", .path.display())]
    Template { path: PathBuf, source: io::Error },

    #[error(
        "Output directory {} would delete content directory {}",
        .output.display(),
        .content.display()
    )]
    OutputContainsContent { output: PathBuf, content: PathBuf },
}

trait IoResultExt<T> {
    fn at(self, path: &Path) -> Result<T, BuildError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T, BuildError> {
        self.map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Files written by a build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Generated pages, in source order.
    pub pages: Vec<PathBuf>,
    /// Number of static files copied.
    pub assets: usize,
}

/// Builds a static site from a content directory and a page template.
pub struct SiteBuilder {
    config: Config,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run a full build.
    ///
    /// # Errors
    ///
    /// Fails on the first file that cannot be read or written. Output written
    /// before the failure is left in place.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let site = &self.config.site;

        if is_within(&site.content_dir, &site.output_dir) {
            return Err(BuildError::OutputContainsContent {
                output: site.output_dir.clone(),
                content: site.content_dir.clone(),
            });
        }

        clean_dir(&site.output_dir)?;
        let assets = self.copy_static()?;

        let sources = if site.content_dir.is_dir() {
            walk_files(&site.content_dir)?
                .into_iter()
                .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
                .collect()
        } else {
            tracing::warn!(dir = %site.content_dir.display(), "Content directory not found");
            Vec::new()
        };
        tracing::debug!(count = sources.len(), "Discovered Markdown sources");

        let template = fs::read_to_string(&site.template).map_err(|source| {
            BuildError::Template {
                path: site.template.clone(),
                source,
            }
        })?;
        if !template.contains(&self.config.template.content_placeholder) {
            tracing::warn!(
                template = %site.template.display(),
                placeholder = %self.config.template.content_placeholder,
                "Template has no content placeholder"
            );
        }

        let pages = sources
            .par_iter()
            .map(|relative| self.build_page(relative, &template))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(pages = pages.len(), assets, "Site built");
        Ok(BuildReport { pages, assets })
    }

    /// Convert one source, given relative to the content directory.
    fn build_page(&self, relative: &Path, template: &str) -> Result<PathBuf, BuildError> {
        let site = &self.config.site;
        let source = site.content_dir.join(relative);
        let dest = site.output_dir.join(relative).with_extension("html");
        tracing::info!(
            source = %source.display(),
            dest = %dest.display(),
            "Generating page"
        );

        let markdown = fs::read_to_string(&source).at(&source)?;
        let page = crate::markdown_to_html(&markdown);

        let title = page
            .title
            .or_else(|| site.default_title.clone())
            .unwrap_or_else(|| file_stem(relative));
        let output = fill_template(template, &self.config.template, &title, &page.html);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).at(parent)?;
        }
        fs::write(&dest, output).at(&dest)?;
        Ok(dest)
    }

    fn copy_static(&self) -> Result<usize, BuildError> {
        let site = &self.config.site;
        if !site.static_dir.is_dir() {
            return Ok(0);
        }

        let files = walk_files(&site.static_dir)?;
        for relative in &files {
            let from = site.static_dir.join(relative);
            let to = site.output_dir.join(relative);
            if let Some(parent) = to.parent() {
                fs::create_dir_all(parent).at(parent)?;
            }
            fs::copy(&from, &to).at(&from)?;
            tracing::debug!(asset = %relative.display(), "Copied static file");
        }
        Ok(files.len())
    }
}

/// Substitute every title placeholder, then every content placeholder.
pub fn fill_template(template: &str, config: &TemplateConfig, title: &str, content: &str) -> String {
    template
        .replace(&config.title_placeholder, title)
        .replace(&config.content_placeholder, content)
}

/// Whether `inner` lies inside `outer`, comparing absolute paths when possible
/// so that an output directory of `.` is caught.
fn is_within(inner: &Path, outer: &Path) -> bool {
    match (std::path::absolute(inner), std::path::absolute(outer)) {
        (Ok(inner), Ok(outer)) => inner.starts_with(outer),
        _ => inner.starts_with(outer),
    }
}

fn clean_dir(dir: &Path) -> Result<(), BuildError> {
    if dir.exists() {
        fs::remove_dir_all(dir).at(dir)?;
    }
    fs::create_dir_all(dir).at(dir)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Recursively list files under `base`, relative to it and sorted.
fn walk_files(base: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut result = Vec::new();
    walk_files_inner(base, base, &mut result)?;
    result.sort();
    Ok(result)
}

/// Symlinked directories are listed neither as files nor walked into, so a
/// link cycle cannot recurse. Symlinks to files are kept.
fn walk_files_inner(base: &Path, dir: &Path, result: &mut Vec<PathBuf>) -> Result<(), BuildError> {
    for entry in fs::read_dir(dir).at(dir)? {
        let entry = entry.at(dir)?;
        let path = entry.path();
        // `DirEntry::file_type` does not follow symlinks.
        let is_real_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if is_real_dir {
            walk_files_inner(base, &path, result)?;
        } else if path.is_file() {
            if let Ok(relative) = path.strip_prefix(base) {
                result.push(relative.to_path_buf());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = "<title>{{ Title }}</title>\n<body>{{ Content }}</body>";

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config_in(root: &Path) -> Config {
        Config {
            site: SiteConfig {
                content_dir: root.join("content"),
                static_dir: root.join("static"),
                output_dir: root.join("public"),
                template: root.join("template.html"),
                default_title: None,
            },
            template: TemplateConfig::default(),
        }
    }

    #[test]
    fn builds_nested_pages() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(&root.join("template.html"), TEMPLATE);
        write(&root.join("content/index.md"), "# Home\n\nWelcome **all**.\n");
        write(&root.join("content/blog/post.md"), "# Post\n\n- a\n- b\n");
        write(&root.join("content/notes.txt"), "not markdown");

        let report = SiteBuilder::new(config_in(root)).build().unwrap();

        assert_eq!(
            report.pages,
            vec![
                root.join("public/blog/post.html"),
                root.join("public/index.html"),
            ]
        );
        assert_eq!(
            fs::read_to_string(root.join("public/index.html")).unwrap(),
            "<title>Home</title>\n<body><h1>Home</h1>\n<p>\nWelcome <b>all</b>.\n</p></body>"
        );
        assert_eq!(
            fs::read_to_string(root.join("public/blog/post.html")).unwrap(),
            "<title>Post</title>\n<body><h1>Post</h1>\n<ul>\n\t<li>a</li>\n\t<li>b</li>\n</ul></body>"
        );
        assert!(!root.join("public/notes.html").exists());
        assert!(!root.join("public/notes.txt").exists());
    }

    #[test]
    fn copies_static_and_removes_stale_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(&root.join("template.html"), TEMPLATE);
        write(&root.join("static/css/site.css"), "body {}");
        write(&root.join("public/stale.html"), "old");

        let report = SiteBuilder::new(config_in(root)).build().unwrap();

        assert_eq!(report.assets, 1);
        assert!(report.pages.is_empty());
        assert_eq!(
            fs::read_to_string(root.join("public/css/site.css")).unwrap(),
            "body {}"
        );
        assert!(!root.join("public/stale.html").exists());
    }

    #[test]
    fn title_falls_back_to_default_then_stem() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(&root.join("template.html"), "{{ Title }}");
        write(&root.join("content/about-us.md"), "## Not a title\n");

        SiteBuilder::new(config_in(root)).build().unwrap();
        assert_eq!(
            fs::read_to_string(root.join("public/about-us.html")).unwrap(),
            "about-us"
        );

        let mut config = config_in(root);
        config.site.default_title = Some("Untitled".to_string());
        SiteBuilder::new(config).build().unwrap();
        assert_eq!(
            fs::read_to_string(root.join("public/about-us.html")).unwrap(),
            "Untitled"
        );
    }

    #[test]
    fn missing_template_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(&root.join("content/index.md"), "# Home\n");

        let err = SiteBuilder::new(config_in(root)).build().unwrap_err();
        assert!(matches!(err, BuildError::Template { .. }));
    }

    #[test]
    fn refuses_to_wipe_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        let mut config = config_in(root);
        config.site.output_dir = root.to_path_buf();

        let err = SiteBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, BuildError::OutputContainsContent { .. }));
        assert!(root.exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(&root.join("template.html"), TEMPLATE);
        write(&root.join("content/index.md"), "# Home\n");
        write(&root.join("static/site.css"), "body {}");
        std::os::unix::fs::symlink(root.join("content"), root.join("content/self")).unwrap();
        std::os::unix::fs::symlink(root.join("static"), root.join("static/loop")).unwrap();

        let report = SiteBuilder::new(config_in(root)).build().unwrap();

        assert_eq!(report.pages, vec![root.join("public/index.html")]);
        assert_eq!(report.assets, 1);
        assert!(!root.join("public/self").exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_included() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(&root.join("template.html"), TEMPLATE);
        write(&root.join("shared/about.md"), "# About\n");
        fs::create_dir_all(root.join("content")).unwrap();
        std::os::unix::fs::symlink(root.join("shared/about.md"), root.join("content/about.md"))
            .unwrap();

        let report = SiteBuilder::new(config_in(root)).build().unwrap();

        assert_eq!(report.pages, vec![root.join("public/about.html")]);
    }

    #[test]
    fn current_dir_contains_relative_content() {
        assert!(is_within(Path::new("content"), Path::new(".")));
        assert!(is_within(Path::new("site/content"), Path::new("site")));
        assert!(!is_within(Path::new("content"), Path::new("public")));
    }

    #[test]
    fn fill_template_replaces_every_placeholder() {
        let filled = fill_template(
            "{{ Title }} | {{ Title }}\n{{ Content }}",
            &TemplateConfig::default(),
            "T",
            "<p>\nx\n</p>",
        );
        assert_eq!(filled, "T | T\n<p>\nx\n</p>");
    }
}
