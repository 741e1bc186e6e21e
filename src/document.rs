//! Defines the content [`Kind`]s, the per-kind front-matter metadata types,
//! and the [`Document`] parser. Parsing is deliberately lenient: a missing
//! field is a content-authoring concern, not a structural error, so every
//! field defaults to an explicit empty value (empty string, empty list, or
//! `None`) instead of failing the document. Only a structurally broken
//! document (missing front-matter fences, invalid YAML) is an error, and
//! those are isolated per document by the collection assembler.
//!
//! Each document file must be structured as follows:
//!
//! ```md
//! ---
//! title: Hello, world!
//! date: 2024-08-15
//! tags: [greet]
//! ---
//! # Hello
//!
//! World
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// The four categories of content, each backed by its own store directory
/// and carrying its own metadata schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Articles,
    Projects,
    Certifications,
    Experiences,
}

impl Kind {
    /// The store directory name for the kind, which doubles as its URL
    /// path segment.
    pub fn dir_name(self) -> &'static str {
        match self {
            Kind::Articles => "articles",
            Kind::Projects => "projects",
            Kind::Certifications => "certifications",
            Kind::Experiences => "experiences",
        }
    }

    /// All kinds, in the order they are built.
    pub fn all() -> [Kind; 4] {
        [
            Kind::Articles,
            Kind::Projects,
            Kind::Certifications,
            Kind::Experiences,
        ]
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Implemented by the per-kind front-matter types. Exposes the kind and
/// the raw date-like field from which the sort key is derived.
pub trait Metadata: DeserializeOwned {
    /// The content kind this metadata belongs to.
    fn kind() -> Kind;

    /// The raw date-like field used for ordering. For most kinds this is
    /// the `date` field; experiences order by their free-text `period`.
    fn raw_date(&self) -> &str;
}

/// Front-matter for an article.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub date: String,

    #[serde(default, rename = "readTime")]
    pub read_time: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub cover_image: String,
}

impl Metadata for Article {
    fn kind() -> Kind {
        Kind::Articles
    }

    fn raw_date(&self) -> &str {
        &self.date
    }
}

/// Front-matter for a project.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, rename = "readTime")]
    pub read_time: String,

    #[serde(default)]
    pub image: String,
}

impl Metadata for Project {
    fn kind() -> Kind {
        Kind::Projects
    }

    fn raw_date(&self) -> &str {
        &self.date
    }
}

/// A certification's level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum Level {
    Foundational,
    Associate,
    Professional,
    Expert,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Foundational => "Foundational",
            Level::Associate => "Associate",
            Level::Professional => "Professional",
            Level::Expert => "Expert",
        }
    }
}

/// Front-matter for a certification.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub provider: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub credential_id: String,

    /// `None` when the certification does not expire.
    #[serde(default)]
    pub expiry_date: Option<String>,

    #[serde(default)]
    pub verification_url: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub level: Option<Level>,

    #[serde(default)]
    pub logo: String,
}

impl Metadata for Certification {
    fn kind() -> Kind {
        Kind::Certifications
    }

    fn raw_date(&self) -> &str {
        &self.date
    }
}

/// Front-matter for a work or community experience.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub organization: String,

    #[serde(default)]
    pub role: String,

    /// Free text, e.g. `July 2017 - Present` or `2018 - 2020`. The
    /// author-intended literal is displayed as-is; ordering uses the
    /// normalized end boundary.
    #[serde(default)]
    pub period: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub logo: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl Metadata for Experience {
    fn kind() -> Kind {
        Kind::Experiences
    }

    fn raw_date(&self) -> &str {
        &self.period
    }
}

/// A parsed content document: its slug (the filename-derived routing key),
/// typed front-matter, and the raw markdown body. The body is opaque to
/// this pipeline; it's handed unparsed to the markdown collaborator at
/// render time.
#[derive(Clone, Debug, PartialEq)]
pub struct Document<M> {
    pub slug: String,
    pub meta: M,
    pub body: String,
}

impl<M: Metadata> Document<M> {
    /// Parses a document from its slug and raw file contents: a `---`
    /// fence, YAML front-matter, a closing `---` fence, and the body.
    pub fn from_str(slug: &str, input: &str) -> Result<Self> {
        let (front, body) = split_front_matter(input)?;
        Ok(Document {
            slug: slug.to_owned(),
            meta: serde_yaml::from_str(front)?,
            body: body.to_owned(),
        })
    }
}

fn split_front_matter(input: &str) -> Result<(&str, &str)> {
    const FENCE: &str = "---";
    let rest = match input.strip_prefix(FENCE) {
        Some(rest) => rest,
        None => return Err(Error::MissingStartFence),
    };
    match rest.find(FENCE) {
        None => Err(Error::MissingEndFence),
        Some(stop) => Ok((&rest[..stop], &rest[stop + FENCE.len()..])),
    }
}

/// Represents the result of a [`Document`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a single [`Document`].
#[derive(Debug)]
pub enum Error {
    /// Returned when a document is missing its starting front-matter
    /// fence (`---`).
    MissingStartFence,

    /// Returned when the starting fence was found but the terminal one
    /// was missing.
    MissingEndFence,

    /// Returned when there was an error parsing the front-matter as YAML.
    DeserializeYaml(serde_yaml::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingStartFence => {
                write!(f, "Document must begin with `---`")
            }
            Error::MissingEndFence => write!(f, "Missing closing `---`"),
            Error::DeserializeYaml(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingStartFence => None,
            Error::MissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_article() -> Result<()> {
        let doc: Document<Article> = Document::from_str(
            "terraform-state",
            "---\n\
             title: Terraform State\n\
             description: Where state really lives\n\
             date: 15.03.2024\n\
             readTime: 7 min\n\
             tags: [terraform, iac]\n\
             cover_image: /images/articles/tfstate.png\n\
             ---\n\
             State is a *contract*.",
        )?;
        assert_eq!(doc.slug, "terraform-state");
        assert_eq!(doc.meta.title, "Terraform State");
        assert_eq!(doc.meta.read_time, "7 min");
        assert_eq!(doc.meta.tags, vec!["terraform", "iac"]);
        assert_eq!(doc.body.trim(), "State is a *contract*.");
        Ok(())
    }

    #[test]
    fn test_missing_fields_default_to_explicit_empty_values() -> Result<()> {
        let doc: Document<Certification> = Document::from_str(
            "cka",
            "---\n\
             title: Certified Kubernetes Administrator\n\
             date: 2024-07-01\n\
             ---\n",
        )?;
        assert_eq!(doc.meta.provider, "");
        assert_eq!(doc.meta.credential_id, "");
        assert_eq!(doc.meta.expiry_date, None);
        assert_eq!(doc.meta.verification_url, None);
        assert_eq!(doc.meta.skills, Vec::<String>::new());
        assert_eq!(doc.meta.level, None);
        Ok(())
    }

    #[test]
    fn test_level_parses_enumerated_values() -> Result<()> {
        let doc: Document<Certification> = Document::from_str(
            "aws-devops",
            "---\ntitle: AWS DevOps\nlevel: Professional\n---\n",
        )?;
        assert_eq!(doc.meta.level, Some(Level::Professional));
        Ok(())
    }

    #[test]
    fn test_missing_start_fence() {
        let result = Document::<Article>::from_str("x", "title: No fences\n");
        assert!(matches!(result, Err(Error::MissingStartFence)));
    }

    #[test]
    fn test_missing_end_fence() {
        let result = Document::<Article>::from_str("x", "---\ntitle: Open\n");
        assert!(matches!(result, Err(Error::MissingEndFence)));
    }
}
