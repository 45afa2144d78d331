//! Immutable, ordered entry store.
//!
//! # Invariants
//! - Entry order is the authored order; the store never re-sorts.
//! - Slugs are unique across the store.
//! - Every entry has passed `Entry::validate()`, builder-made ones included.
//! - The store is never mutated after construction.

use crate::model::entry::Entry;
use crate::repo::entry_repo::{EntryRepository, RepoError, RepoResult};
use std::collections::HashSet;

/// Catalog entries as loaded.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    /// Builds a store from a repository, rejecting duplicate slugs.
    pub fn load(repo: &impl EntryRepository) -> RepoResult<Self> {
        Self::from_entries(repo.load_entries()?)
    }

    /// Builds a store from already-decoded entries.
    pub fn from_entries(entries: Vec<Entry>) -> RepoResult<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            entry.validate()?;
            if !seen.insert(entry.slug.as_str()) {
                return Err(RepoError::DuplicateSlug(entry.slug.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, slug: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::EntryStore;
    use crate::model::entry::{Entry, EntryValidationError};
    use crate::repo::entry_repo::RepoError;

    fn entry(slug: &str) -> Entry {
        Entry::new(slug, slug.to_uppercase(), vec!["Web".to_string()]).unwrap()
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let err = EntryStore::from_entries(vec![entry("a"), entry("b"), entry("a")]).unwrap_err();
        assert!(matches!(err, RepoError::DuplicateSlug(slug) if slug == "a"));
    }

    #[test]
    fn keeps_authored_order() {
        let store = EntryStore::from_entries(vec![entry("b"), entry("a")]).unwrap();
        let slugs: Vec<&str> = store.entries().iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "a"]);
        assert!(store.get("a").is_some());
        assert!(store.get("z").is_none());
    }

    #[test]
    fn rejects_builder_entries_with_nan_score() {
        let err = EntryStore::from_entries(vec![entry("a"), entry("b").with_score(f64::NAN)])
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(EntryValidationError::NonFiniteScore { ref slug }) if slug == "b"
        ));
        assert!(err.to_string().contains("non-finite score"));
    }
}
