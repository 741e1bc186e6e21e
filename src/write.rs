//! Responsible for templating and writing HTML pages to disk from
//! assembled collections: one list page per content kind plus one detail
//! page per document.

use std::fmt;
use std::io;
use std::path::Path;

use gtmpl::{Context, Template, Value};
use url::Url;

use crate::collection::Entry;
use crate::document::Metadata;
use crate::markdown;
use crate::store::{self, Store};

/// Writes list and detail pages for assembled collections.
pub struct Writer<'a> {
    /// The template for a kind's list page, rendered with the kind name
    /// and its entries.
    pub list_template: &'a Template,

    /// The template for a single document's detail page, rendered with
    /// the document's metadata plus its body as HTML.
    pub detail_template: &'a Template,

    /// The base URL of the site. Kind list pages live at
    /// `{site_root}/{kind}/index.html` and detail pages at
    /// `{site_root}/{kind}/{slug}.html`.
    pub site_root: &'a Url,

    /// The root output directory. Pages are written under
    /// `{output_directory}/{kind}/`.
    pub output_directory: &'a Path,

    /// The URL for the site's home page, made available to every
    /// template, typically as the destination for the site-header link.
    pub home_page: &'a Url,

    /// The URL for the static assets, made available to every template,
    /// typically for the theme's stylesheet.
    pub static_url: &'a Url,
}

impl Writer<'_> {
    /// Writes the list page and all detail pages for one content kind.
    /// The list page sees metadata only; each detail page re-requests the
    /// full document from the store for its body.
    pub fn write_kind<M>(&self, store: &Store, entries: &[Entry<M>]) -> Result<()>
    where
        M: Metadata,
        for<'v> &'v M: Into<Value>,
    {
        let kind = M::kind();
        let dir = self.output_directory.join(kind.dir_name());
        std::fs::create_dir_all(&dir)?;

        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            items.push(entry.to_value(&self.page_url(kind.dir_name(), &entry.slug)?));
        }
        self.render(
            self.list_template,
            &dir.join("index.html"),
            self.page_value(kind.dir_name(), Value::Array(items)),
        )?;

        for entry in entries {
            let doc = store.document::<M>(&entry.slug)?;
            let mut body = String::new();
            markdown::to_html(&mut body, &doc.body);

            let mut item = entry.to_value(&self.page_url(kind.dir_name(), &entry.slug)?);
            if let Value::Object(m) = &mut item {
                m.insert("body".to_owned(), Value::String(body));
            }
            self.render(
                self.detail_template,
                &dir.join(format!("{}.html", entry.slug)),
                self.page_value(kind.dir_name(), item),
            )?;
        }
        Ok(())
    }

    fn page_url(&self, kind: &str, slug: &str) -> Result<Url> {
        // NOTE: `Url::join` treats a base without a trailing slash as a
        // "file" whose name gets replaced, so the kind and slug are joined
        // in a single relative path.
        Ok(self.site_root.join(&format!("{}/{}.html", kind, slug))?)
    }

    /// Wraps a page's main item in the common template envelope.
    fn page_value(&self, kind: &str, item: Value) -> Value {
        use std::collections::HashMap;
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("kind".to_owned(), Value::from(kind));
        m.insert("item".to_owned(), item);
        m.insert(
            "home_page".to_owned(),
            Value::String(self.home_page.to_string()),
        );
        m.insert(
            "static_url".to_owned(),
            Value::String(self.static_url.to_string()),
        );
        Value::Object(m)
    }

    fn render(&self, template: &Template, path: &Path, value: Value) -> Result<()> {
        template.execute(
            &mut std::fs::File::create(path)?,
            &Context::from(value).unwrap(),
        )?;
        Ok(())
    }
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(String),

    /// An error re-reading a document for its detail page.
    Store(store::Error),

    /// Returned when there is a problem building page URLs.
    UrlParse(url::ParseError),

    /// An error writing the output files.
    Io(io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::Store(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(_) => None,
            Error::Store(err) => Some(err),
            Error::UrlParse(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use
    /// the `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`].
    /// This allows us to use the `?` operator for fallible template
    /// operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

impl From<store::Error> for Error {
    fn from(err: store::Error) -> Error {
        Error::Store(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}
