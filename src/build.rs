//! Exports the [`build_site`] function which stitches together the
//! high-level steps of building the output site: assembling each content
//! kind's collection ([`crate::collection`]), rendering list and detail
//! pages ([`crate::write`]), copying the static source directory into the
//! static output directory, and generating the Atom feed for articles.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use gtmpl::Template;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::collection::{self, Entry};
use crate::config::Config;
use crate::document::{Article, Certification, Experience, Kind, Metadata, Project};
use crate::feed::{Error as FeedError, FeedConfig, write_feed};
use crate::store::{Error as StoreError, Store};
use crate::write::{Error as WriteError, Writer};

/// Builds the site from a [`Config`] object. Each content kind is
/// assembled and written independently; [`collection::assemble`] and
/// [`Writer::write_kind`] do the heavy-lifting. This function also copies
/// the static assets from the source directory to the output directory
/// and writes the article feed.
pub fn build_site(config: Config) -> Result<()> {
    let store = Store::new(&config.content_directory);

    // Parse the template files.
    let list_template = parse_template(config.list_template.iter())?;
    let detail_template = parse_template(config.detail_template.iter())?;

    // Blow away the old kind output directories so we don't have any
    // collisions. We don't naively delete the whole root output directory
    // in case the user accidentally passes the wrong directory.
    for kind in Kind::all() {
        rmdir(&config.root_output_directory.join(kind.dir_name()))?;
    }
    rmdir(&config.static_output_directory)?;

    let writer = Writer {
        list_template: &list_template,
        detail_template: &detail_template,
        site_root: &config.site_root,
        output_directory: &config.root_output_directory,
        home_page: &config.home_page,
        static_url: &config.static_url,
    };

    let articles = build_kind::<Article>(&store, &writer)?;
    build_kind::<Project>(&store, &writer)?;
    build_kind::<Certification>(&store, &writer)?;
    build_kind::<Experience>(&store, &writer)?;

    // copy the static directory
    copy_dir(
        &config.static_source_directory,
        &config.static_output_directory,
    )?;

    // copy /articles/index.html to /index.html
    let _ = std::fs::copy(
        &config
            .root_output_directory
            .join(Kind::Articles.dir_name())
            .join("index.html"),
        &config.root_output_directory.join("index.html"),
    )?;

    // create the atom feed
    write_feed(
        FeedConfig {
            title: config.title,
            id: config.home_page.to_string(),
            author: config.author,
            home_page: config.home_page,
            articles_url: config.site_root.join("articles/").map_err(WriteError::from)?,
        },
        &articles,
        File::create(config.root_output_directory.join("feed.atom"))?,
    )?;

    Ok(())
}

fn build_kind<M>(store: &Store, writer: &Writer) -> Result<Vec<Entry<M>>>
where
    M: Metadata,
    for<'v> &'v M: Into<gtmpl::Value>,
{
    let entries = collection::assemble::<M>(store)?;
    info!(
        kind = M::kind().dir_name(),
        documents = entries.len(),
        "assembled collection"
    );
    writer.write_kind(store, &entries)?;
    Ok(entries)
}

fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        warn!(path = %src.display(), "no static directory; skipping copy");
        return Ok(());
    }
    for result in WalkDir::new(src) {
        let entry = result?;
        // strip_prefix shouldn't fail since `src` is always an ancestor
        // of the walked path
        let target = dst.join(entry.path().strip_prefix(src).unwrap());
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

// Loads the template file contents, concatenates them, and parses the
// result into a template.
fn parse_template<P: AsRef<Path>>(template_files: impl Iterator<Item = P>) -> Result<Template> {
    let mut contents = String::new();
    for template_file in template_files {
        use std::io::Read;
        let template_file = template_file.as_ref();
        File::open(&template_file)
            .map_err(|e| Error::OpenTemplateFile {
                path: template_file.to_owned(),
                err: e,
            })?
            .read_to_string(&mut contents)?;
        contents.push(' ');
    }

    let mut template = Template::default();
    template.parse(&contents).map_err(Error::ParseTemplate)?;
    Ok(template)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can occur during assembly,
/// writing, cleaning output directories, parsing template files, and
/// other I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for structural store failures while assembling a kind.
    Store(StoreError),

    /// Returned for errors writing pages to disk as HTML files.
    Write(WriteError),

    /// Returned for I/O problems while cleaning output directories.
    Clean { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate(String),

    /// Returned for errors writing the feed.
    Feed(FeedError),

    /// Returned for I/O errors while copying static assets.
    WalkDir(walkdir::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Store(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate(err) => err.fmt(f),
            Error::Feed(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate(_) => None,
            Error::Feed(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<StoreError> for Error {
    /// Converts [`StoreError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: StoreError) -> Error {
        Error::Store(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

impl From<FeedError> for Error {
    /// Converts [`FeedError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: FeedError) -> Error {
        Error::Feed(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts [`walkdir::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

fn rmdir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(x) => Ok(x),
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => Ok(()),
            _ => Err(Error::Clean {
                path: dir.to_owned(),
                err: e,
            }),
        },
    }
}
