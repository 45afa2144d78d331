//! Filter/sort view over the entry store.
//!
//! # Invariants
//! - Order is `score DESC`; equal scores keep store order (stable sort).
//! - An entry is visible iff the selection is `All` or its token set
//!   contains the selected token.
//! - Pure: identical inputs always yield the identical sequence.

use crate::model::entry::Entry;
use crate::model::tag::Selection;
use crate::repo::entry_store::EntryStore;

/// Visible entries for `selection`, in display order.
pub fn visible_entries<'s>(store: &'s EntryStore, selection: &Selection) -> Vec<&'s Entry> {
    let mut visible: Vec<&Entry> = store
        .entries()
        .iter()
        .filter(|entry| selection.admits(&entry.tag_tokens()))
        .collect();
    // `sort_by` is stable; scores are finite once an entry is in a store.
    visible.sort_by(|a, b| b.score.total_cmp(&a.score));
    visible
}

#[cfg(test)]
mod tests {
    use super::visible_entries;
    use crate::model::entry::Entry;
    use crate::model::tag::Selection;
    use crate::repo::entry_store::EntryStore;

    fn store() -> EntryStore {
        let entry = |slug: &str, score: f64, tags: &[&str]| {
            Entry::new(slug, slug, tags.iter().map(|t| t.to_string()).collect())
                .unwrap()
                .with_score(score)
        };
        EntryStore::from_entries(vec![
            entry("a", 5.0, &["Web"]),
            entry("b", 9.0, &["Animation"]),
            entry("c", 5.0, &["Web", "Animation"]),
        ])
        .unwrap()
    }

    fn slugs(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|entry| entry.slug.clone()).collect()
    }

    #[test]
    fn all_sorts_by_score_keeping_ties_in_store_order() {
        let store = store();
        assert_eq!(slugs(&visible_entries(&store, &Selection::All)), ["b", "a", "c"]);
    }

    #[test]
    fn tag_selection_filters_by_token() {
        let store = store();
        let animation = Selection::parse("Animation").unwrap();
        assert_eq!(slugs(&visible_entries(&store, &animation)), ["b", "c"]);
    }

    #[test]
    fn unknown_token_yields_nothing() {
        let store = store();
        let none = Selection::parse("print").unwrap();
        assert!(visible_entries(&store, &none).is_empty());
    }
}
