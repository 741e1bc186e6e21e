//! The library code for the `folio` portfolio site generator. The
//! architecture is a single pipeline over four content kinds (articles,
//! projects, certifications, experiences), each a flat directory of
//! markdown documents with YAML front-matter:
//!
//! 1. The store scans a kind's directory for document slugs
//!    ([`crate::store`])
//! 2. Each document is parsed into typed metadata plus a raw markdown
//!    body ([`crate::document`])
//! 3. Raw date fields, which authors write in several formats, are
//!    normalized into a single comparable sort key ([`crate::date`])
//! 4. The assembler merges the parsed documents into a stable,
//!    descending-chronological collection, skipping (and logging) any
//!    document that fails to parse ([`crate::collection`])
//!
//! The assembled collections are then rendered into list and detail pages
//! ([`crate::write`]) and an Atom feed for articles ([`crate::feed`]);
//! [`crate::build`] stitches the whole pass together. Every stage is
//! synchronous and deterministic, and each build pass re-reads the full
//! content store from scratch.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod collection;
pub mod config;
pub mod date;
pub mod document;
pub mod feed;
pub mod markdown;
pub mod store;
pub mod util;
pub mod value;
pub mod write;
