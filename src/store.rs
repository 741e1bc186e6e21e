//! The document store: a content root directory with one subdirectory per
//! content [`Kind`], each holding flat `<slug>.md` documents. The store is
//! read-only from this pipeline's point of view; the files themselves are
//! managed externally (version control), and every build pass re-reads
//! them from scratch.

use std::fmt;
use std::fs::{read_dir, File};
use std::io;
use std::io::prelude::*;
use std::path::PathBuf;

use tracing::warn;

use crate::document::{self, Document, Kind, Metadata};

const MARKDOWN_EXTENSION: &str = ".md";

/// Reads and parses content documents from a content root directory.
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Store {
        Store { root: root.into() }
    }

    /// Lists the document slugs available for a kind, in the store's
    /// natural enumeration order (not guaranteed sorted; the collection
    /// assembler imposes a meaningful order later). Only `.md` files are
    /// recognized. A missing kind directory yields an empty list so that
    /// kinds without documents degrade gracefully; any other I/O failure
    /// is fatal to that kind's build.
    pub fn slugs(&self, kind: Kind) -> Result<Vec<String>> {
        let dir = self.root.join(kind.dir_name());
        let entries = match read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let mut slugs = Vec::new();
        for result in entries {
            let entry = result?;
            let os_file_name = entry.file_name();
            let file_name = os_file_name.to_string_lossy();
            if let Some(stem) = file_name.strip_suffix(MARKDOWN_EXTENSION) {
                if stem != slug::slugify(stem) {
                    // Slugs become URL path segments, so flag anything
                    // that isn't already URL-safe.
                    warn!(
                        kind = kind.dir_name(),
                        slug = stem,
                        "document slug is not URL-safe"
                    );
                }
                slugs.push(stem.to_owned());
            }
        }
        Ok(slugs)
    }

    /// Reads and parses a single document by slug. A missing backing file
    /// surfaces as [`Error::NotFound`], which page-generation callers
    /// treat as a missing route rather than a build failure.
    pub fn document<M: Metadata>(&self, slug: &str) -> Result<Document<M>> {
        let path = self
            .root
            .join(M::kind().dir_name())
            .join(format!("{}{}", slug, MARKDOWN_EXTENSION));
        let mut contents = String::new();
        match File::open(&path) {
            Ok(mut file) => {
                file.read_to_string(&mut contents)?;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound {
                    kind: M::kind(),
                    slug: slug.to_owned(),
                });
            }
            Err(e) => return Err(Error::Io(e)),
        }
        Document::from_str(slug, &contents).map_err(|err| Error::Document {
            kind: M::kind(),
            slug: slug.to_owned(),
            err,
        })
    }
}

/// Represents the result of a [`Store`] operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error reading a document from the [`Store`].
#[derive(Debug)]
pub enum Error {
    /// Returned when a requested slug has no backing file. Distinct from
    /// a malformed document; maps to a 404-equivalent outcome at the page
    /// level.
    NotFound { kind: Kind, slug: String },

    /// Returned when a document file exists but could not be parsed.
    Document {
        kind: Kind,
        slug: String,
        err: document::Error,
    },

    /// Returned for other I/O errors.
    Io(io::Error),
}

impl Error {
    /// True iff the error is the missing-document case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound { kind, slug } => {
                write!(f, "no such {} document: `{}`", kind, slug)
            }
            Error::Document { kind, slug, err } => {
                write!(f, "parsing {} document `{}`: {}", kind, slug, err)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound { .. } => None,
            Error::Document { err, .. } => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    /// Converts a [`io::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for fallible I/O functions.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::{Article, Experience};

    fn store() -> Store {
        Store::new("./testdata/content")
    }

    #[test]
    fn test_slugs_recognizes_only_markdown() -> Result<()> {
        let mut slugs = store().slugs(Kind::Articles)?;
        slugs.sort();
        // `notes.txt` sits in the same directory and must be ignored.
        assert_eq!(
            slugs,
            vec!["kubernetes-operators", "terraform-state-deep-dive"]
        );
        Ok(())
    }

    #[test]
    fn test_missing_kind_directory_yields_empty_list() -> Result<()> {
        let store = Store::new("./testdata/does-not-exist");
        assert_eq!(store.slugs(Kind::Certifications)?, Vec::<String>::new());
        Ok(())
    }

    #[test]
    fn test_document_loads_body() -> Result<()> {
        let doc: Document<Experience> =
            store().document("platform-engineer")?;
        assert_eq!(doc.meta.period, "July 2017 - Present");
        assert!(doc.body.contains("platform"));
        Ok(())
    }

    #[test]
    fn test_missing_document_is_not_found() {
        let err = store()
            .document::<Article>("no-such-article")
            .expect_err("expected a NotFound error");
        assert!(err.is_not_found());
    }
}
