//! Support for creating an Atom feed from the article collection.

use std::fmt;
use std::io::Write;

use atom_syndication::{Entry as FeedEntry, Error as AtomError, Feed, Link, Person, Text};
use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use tracing::warn;
use url::Url;

use crate::collection::Entry;
use crate::config::Author;
use crate::date::{self, SortKey};
use crate::document::Article;

/// Bundled configuration for creating a feed.
pub struct FeedConfig {
    pub title: String,
    pub id: String,
    pub author: Option<Author>,
    pub home_page: Url,
    pub articles_url: Url,
}

/// Creates a feed from some configuration ([`FeedConfig`]) and the
/// assembled article collection and writes the result to a
/// [`std::io::Write`]. This function takes ownership of the provided
/// [`FeedConfig`].
pub fn write_feed<W: Write>(
    config: FeedConfig,
    articles: &[Entry<Article>],
    w: W,
) -> Result<()> {
    feed(config, articles)?.write_to(w)?;
    Ok(())
}

fn feed(config: FeedConfig, articles: &[Entry<Article>]) -> Result<Feed> {
    Ok(Feed {
        entries: feed_entries(&config, articles)?,
        title: Text::plain(config.title),
        id: config.id,
        updated: FixedOffset::east(0).from_utc_datetime(&Utc::now().naive_utc()),
        authors: author_to_people(config.author),
        links: vec![Link {
            href: config.home_page.to_string(),
            rel: "alternate".to_string(),
            ..Link::default()
        }],
        ..Feed::default()
    })
}

fn feed_entries(config: &FeedConfig, articles: &[Entry<Article>]) -> Result<Vec<FeedEntry>> {
    let mut entries: Vec<FeedEntry> = Vec::with_capacity(articles.len());

    for article in articles {
        // Atom entries need a concrete timestamp. The normalized sort key
        // already did the format wrangling; anything without a calendar
        // date is left out of the feed.
        let date = match date::sort_key(&article.meta.date) {
            SortKey::Date(date) => midnight_utc(date),
            _ => {
                warn!(
                    slug = article.slug.as_str(),
                    date = article.meta.date.as_str(),
                    "article has no concrete date; omitting from feed"
                );
                continue;
            }
        };

        let url = config
            .articles_url
            .join(&format!("{}.html", article.slug))?;
        entries.push(FeedEntry {
            id: url.to_string(),
            title: Text::plain(article.meta.title.clone()),
            updated: date,
            authors: author_to_people(config.author.clone()),
            links: vec![Link {
                href: url.to_string(),
                rel: "alternate".to_owned(),
                ..Link::default()
            }],
            summary: Some(Text::plain(article.meta.description.clone())),
            published: Some(date),
            ..FeedEntry::default()
        })
    }
    Ok(entries)
}

fn midnight_utc(date: chrono::NaiveDate) -> DateTime<FixedOffset> {
    FixedOffset::east(0).from_utc_datetime(&date.and_time(NaiveTime::from_hms(0, 0, 0)))
}

fn author_to_people(author: Option<Author>) -> Vec<Person> {
    match author {
        Some(author) => vec![Person {
            name: author.name,
            email: author.email,
            uri: None,
        }],
        None => Vec::new(),
    }
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem creating a feed. Variants include I/O, Atom, and
/// URL issues.
#[derive(Debug)]
pub enum Error {
    /// Returned when there is a generic I/O error.
    Io(std::io::Error),

    /// Returned when there is an Atom-related error.
    Atom(AtomError),

    /// Returned when there is a problem building entry URLs.
    UrlParse(url::ParseError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Atom(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Atom(err) => Some(err),
            Error::UrlParse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator in fallible feed operations.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<AtomError> for Error {
    /// Converts [`AtomError`]s into [`Error`]. This allows us to use the
    /// `?` operator in fallible feed operations.
    fn from(err: AtomError) -> Error {
        Error::Atom(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts [`url::ParseError`]s into [`Error`]. This allows us to use
    /// the `?` operator in fallible feed operations.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::collection;
    use crate::store::Store;

    #[test]
    fn test_feed_contains_dated_articles() -> anyhow::Result<()> {
        let store = Store::new("./testdata/content");
        let articles = collection::assemble::<Article>(&store)?;
        let mut out = Vec::new();
        write_feed(
            FeedConfig {
                title: "Portfolio".to_owned(),
                id: "https://example.org/".to_owned(),
                author: None,
                home_page: Url::parse("https://example.org/")?,
                articles_url: Url::parse("https://example.org/articles/")?,
            },
            &articles,
            &mut out,
        )?;
        let xml = String::from_utf8(out)?;
        assert!(xml.contains("Portfolio"));
        assert!(xml.contains("articles/kubernetes-operators.html"));
        Ok(())
    }
}
