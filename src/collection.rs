//! The collection assembler: merges every parsed document of a kind into a
//! single descending-chronological listing. Per-document failures are
//! logged and skipped so that one malformed document never breaks the
//! listing of all the others.

use tracing::warn;

use crate::date::{self, SortKey};
use crate::document::Metadata;
use crate::store::{Result, Store};

/// One listing entry: a document's slug and metadata plus the sort key
/// derived from its raw date field. Body content is deliberately elided;
/// detail views re-request the full document from the [`Store`] by slug.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<M> {
    pub slug: String,
    pub sort_key: SortKey,
    pub meta: M,
}

/// Scans the store for every document of kind `M::kind()`, parses each,
/// and returns the entries sorted by sort key, most recent first. The
/// sort is stable, so entries with equal keys keep the store's enumeration
/// order. Documents that fail to parse are skipped with a diagnostic;
/// only a structural store failure aborts the kind.
pub fn assemble<M: Metadata>(store: &Store) -> Result<Vec<Entry<M>>> {
    let mut entries = Vec::new();
    for slug in store.slugs(M::kind())? {
        match store.document::<M>(&slug) {
            Ok(doc) => entries.push(Entry {
                sort_key: date::sort_key(doc.meta.raw_date()),
                slug: doc.slug,
                meta: doc.meta,
            }),
            Err(err) => warn!(
                kind = M::kind().dir_name(),
                slug = slug.as_str(),
                error = %err,
                "skipping document"
            ),
        }
    }
    entries.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));
    Ok(entries)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::{Article, Certification, Experience, Project};

    fn store() -> Store {
        Store::new("./testdata/content")
    }

    fn slugs<M>(entries: &[Entry<M>]) -> Vec<&str> {
        entries.iter().map(|e| e.slug.as_str()).collect()
    }

    #[test]
    fn test_articles_sorted_descending_across_formats() -> Result<()> {
        // `terraform-state-deep-dive` is dated `15.03.2024` (day-first),
        // `kubernetes-operators` is `2024-08-15` (ISO); the later date
        // must come first regardless of format.
        let articles = assemble::<Article>(&store())?;
        assert_eq!(
            slugs(&articles),
            vec!["kubernetes-operators", "terraform-state-deep-dive"]
        );
        Ok(())
    }

    #[test]
    fn test_output_is_descending_by_sort_key() -> Result<()> {
        let projects = assemble::<Project>(&store())?;
        for pair in projects.windows(2) {
            assert!(pair[0].sort_key >= pair[1].sort_key);
        }
        Ok(())
    }

    #[test]
    fn test_malformed_document_is_skipped_not_fatal() -> Result<()> {
        // `unfinished-draft.md` has no front-matter fences; the two valid
        // projects must still be listed.
        let projects = assemble::<Project>(&store())?;
        assert_eq!(
            slugs(&projects),
            vec!["portfolio-site", "homelab-gitops"]
        );
        Ok(())
    }

    #[test]
    fn test_ongoing_experience_sorts_first() -> Result<()> {
        let experiences = assemble::<Experience>(&store())?;
        assert_eq!(
            slugs(&experiences),
            vec!["platform-engineer", "flight-engineer"]
        );
        assert_eq!(experiences[0].sort_key, SortKey::Ongoing);
        Ok(())
    }

    #[test]
    fn test_missing_optional_fields_are_explicit_nulls() -> Result<()> {
        let certifications = assemble::<Certification>(&store())?;
        let hackathon = certifications
            .iter()
            .find(|c| c.slug == "campus-challenge-winner")
            .expect("fixture certification missing");
        assert_eq!(hackathon.meta.expiry_date, None);
        assert_eq!(hackathon.meta.credential_id, "");
        Ok(())
    }

    #[test]
    fn test_assembly_is_idempotent() -> Result<()> {
        let store = store();
        let first = assemble::<Article>(&store)?;
        let second = assemble::<Article>(&store)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_missing_store_yields_empty_collection() -> Result<()> {
        let store = Store::new("./testdata/does-not-exist");
        assert_eq!(assemble::<Article>(&store)?, Vec::new());
        Ok(())
    }
}
