use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// The site author, surfaced in the Atom feed.
#[derive(Clone, Deserialize)]
pub struct Author {
    pub name: String,

    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct HomePage(String);
impl Default for HomePage {
    fn default() -> Self {
        HomePage("articles/index.html".to_owned())
    }
}

/// The project file (`folio.yaml`) at the root of a portfolio project.
#[derive(Deserialize)]
struct ProjectFile {
    pub site_root: Url,
    pub title: String,

    #[serde(default)]
    pub author: Option<Author>,

    #[serde(default)]
    pub home_page: HomePage,
}

/// The theme file (`theme/theme.yaml`). Each template is a list of
/// fragment files concatenated before parsing, so themes can share a
/// base layout.
#[derive(Deserialize)]
struct Theme {
    list_template: Vec<PathBuf>,
    detail_template: Vec<PathBuf>,
}

pub struct Config {
    pub title: String,
    pub author: Option<Author>,
    pub site_root: Url,
    pub home_page: Url,
    pub static_url: Url,
    pub content_directory: PathBuf,
    pub static_source_directory: PathBuf,
    pub list_template: Vec<PathBuf>,
    pub detail_template: Vec<PathBuf>,
    pub root_output_directory: PathBuf,
    pub static_output_directory: PathBuf,
}

impl Config {
    /// Looks for `folio.yaml` in `dir` or the nearest ancestor directory
    /// and loads the configuration from it.
    pub fn from_directory(dir: &Path, output_directory: &Path) -> Result<Config> {
        let path = dir.join("folio.yaml");
        if path.exists() {
            match Config::from_project_file(&path, output_directory) {
                Ok(config) => Ok(config),
                Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
            }
        } else {
            match path.parent().and_then(Path::parent) {
                Some(parent) => Config::from_directory(parent, output_directory),
                None => Err(anyhow!(
                    "Could not find `folio.yaml` in any parent directory"
                )),
            }
        }
    }

    pub fn from_project_file(path: &Path, output_directory: &Path) -> Result<Config> {
        use crate::util::open;
        let project: ProjectFile = serde_yaml::from_reader(open(path, "project")?)?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => {
                let theme_dir = project_root.join("theme");
                let theme_file = open(&theme_dir.join("theme.yaml"), "theme")?;
                let theme: Theme = serde_yaml::from_reader(theme_file)?;
                Ok(Config {
                    title: project.title,
                    author: project.author,
                    home_page: project.site_root.join(&project.home_page.0)?,
                    static_url: project.site_root.join("static/")?,
                    site_root: project.site_root,
                    content_directory: project_root.join("content"),
                    static_source_directory: project_root.join("static"),
                    list_template: theme
                        .list_template
                        .iter()
                        .map(|relpath| theme_dir.join(relpath))
                        .collect(),
                    detail_template: theme
                        .detail_template
                        .iter()
                        .map(|relpath| theme_dir.join(relpath))
                        .collect(),
                    root_output_directory: output_directory.to_owned(),
                    static_output_directory: output_directory.join("static"),
                })
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_directory_walks_up_to_project_file() -> Result<()> {
        // The project file sits at `testdata/site/folio.yaml`; loading
        // from the content subdirectory must find it.
        let config = Config::from_directory(
            Path::new("./testdata/site/content/articles"),
            Path::new("/tmp/folio-out"),
        )?;
        assert_eq!(config.title, "Example Portfolio");
        assert_eq!(config.site_root.as_str(), "https://example.org/");
        assert_eq!(
            config.home_page.as_str(),
            "https://example.org/articles/index.html"
        );
        assert!(config.content_directory.ends_with("testdata/site/content"));
        assert_eq!(config.list_template.len(), 2);
        Ok(())
    }
}
