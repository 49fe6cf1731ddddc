//! The category list shown in the sidebar, derived from the catalogue on demand.
use std::collections::BTreeSet;

use cinestream_state::{ALL_CATEGORY, DEFAULT_CATEGORIES, Entry};

/// `All`, followed by the default categories and every category in use, sorted.
pub fn category_index(entries: &[Entry]) -> Vec<String> {
    std::iter::once(ALL_CATEGORY.to_string())
        .chain(form_categories(entries))
        .collect()
}

/// The categories an entry can be filed under: the default categories and every
/// category in use, sorted, without `All`.
pub fn form_categories(entries: &[Entry]) -> Vec<String> {
    DEFAULT_CATEGORIES
        .iter()
        .copied()
        .chain(entries.iter().map(|e| e.category.as_str()))
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORY)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use cinestream_state::{EntryId, seed_entries};

    use super::*;

    fn with_category(category: &str) -> Entry {
        Entry {
            id: EntryId::from(category),
            title: "T".to_string(),
            playback_url: "https://youtu.be/x".to_string(),
            poster_url: String::new(),
            description: None,
            category: category.to_string(),
            year: None,
            rating: None,
        }
    }

    #[test]
    fn all_comes_first_then_alphabetical() {
        let index = category_index(&[]);
        assert_eq!(index[0], ALL_CATEGORY);
        let mut rest = index[1..].to_vec();
        rest.sort();
        assert_eq!(rest, index[1..]);
        assert_eq!(index.len(), DEFAULT_CATEGORIES.len() + 1);
    }

    #[test]
    fn custom_categories_are_merged_once() {
        let entries = vec![
            with_category("Anime"),
            with_category("Anime"),
            with_category("Drama"),
            with_category(ALL_CATEGORY),
        ];
        let index = category_index(&entries);
        assert_eq!(index.iter().filter(|c| *c == "Anime").count(), 1);
        assert_eq!(index.iter().filter(|c| *c == "Drama").count(), 1);
        assert_eq!(index.iter().filter(|c| *c == ALL_CATEGORY).count(), 1);
        assert_eq!(index[1], "Action");
        assert_eq!(index[2], "Animation");
        assert_eq!(index[3], "Anime");
    }

    #[test]
    fn stable_across_unrelated_mutations() {
        let mut entries = seed_entries();
        let before = category_index(&entries);
        entries.remove(0);
        entries.reverse();
        assert_eq!(category_index(&entries), before);
    }
}
