// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Entry, TagFilter};
use std::collections::BTreeSet;

/// Distinct tags across a catalog, sorted lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagUniverse {
    tags: Vec<String>,
}

impl TagUniverse {
    pub fn from_entries(entries: &[Entry]) -> Self {
        let tags = entries
            .iter()
            .flat_map(|entry| entry.tags.iter().cloned())
            .collect::<BTreeSet<String>>();
        Self {
            tags: tags.into_iter().collect(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Selectable values: the `all` sentinel first, then every tag.
    pub fn options(&self) -> Vec<TagFilter> {
        std::iter::once(TagFilter::All)
            .chain(self.tags.iter().cloned().map(TagFilter::Only))
            .collect()
    }

    pub fn contains(&self, filter: &TagFilter) -> bool {
        match filter {
            TagFilter::All => true,
            TagFilter::Only(tag) => self.tags.binary_search(tag).is_ok(),
        }
    }

    pub fn normalize(&self, filter: TagFilter) -> TagFilter {
        if self.contains(&filter) {
            filter
        } else {
            TagFilter::All
        }
    }

    pub fn rotate(&self, current: &TagFilter, delta: isize) -> TagFilter {
        let options = self.options();
        let index = options
            .iter()
            .position(|option| option == current)
            .unwrap_or(0) as isize;
        let len = options.len() as isize;
        options[(index + delta).rem_euclid(len) as usize].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::TagUniverse;
    use crate::{Entry, TagFilter};
    use time::macros::datetime;

    fn tagged(tags: &[&str]) -> Entry {
        Entry {
            title: "game".to_owned(),
            description: String::new(),
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
            url: String::new(),
            repo: None,
            cover: None,
            updated_at: datetime!(2025-01-01 0:00 UTC),
            popularity: 0.0,
            featured: false,
        }
    }

    #[test]
    fn universe_is_distinct_and_sorted_with_all_first() {
        let universe = TagUniverse::from_entries(&[
            tagged(&["puzzle", "arcade"]),
            tagged(&["rpg", "arcade"]),
            tagged(&[]),
        ]);

        assert_eq!(universe.tags(), ["arcade", "puzzle", "rpg"]);
        assert_eq!(
            universe.options(),
            vec![
                TagFilter::All,
                TagFilter::Only("arcade".to_owned()),
                TagFilter::Only("puzzle".to_owned()),
                TagFilter::Only("rpg".to_owned()),
            ]
        );
    }

    #[test]
    fn empty_catalog_only_offers_all() {
        let universe = TagUniverse::from_entries(&[]);
        assert_eq!(universe.options(), vec![TagFilter::All]);
        assert_eq!(universe.rotate(&TagFilter::All, 1), TagFilter::All);
    }

    #[test]
    fn normalize_drops_unknown_tags() {
        let universe = TagUniverse::from_entries(&[tagged(&["arcade"])]);
        assert_eq!(
            universe.normalize(TagFilter::Only("arcade".to_owned())),
            TagFilter::Only("arcade".to_owned())
        );
        assert_eq!(
            universe.normalize(TagFilter::Only("rpg".to_owned())),
            TagFilter::All
        );
    }

    #[test]
    fn rotate_wraps_in_both_directions() {
        let universe = TagUniverse::from_entries(&[tagged(&["arcade", "rpg"])]);
        assert_eq!(
            universe.rotate(&TagFilter::All, 1),
            TagFilter::Only("arcade".to_owned())
        );
        assert_eq!(
            universe.rotate(&TagFilter::All, -1),
            TagFilter::Only("rpg".to_owned())
        );
        assert_eq!(
            universe.rotate(&TagFilter::Only("rpg".to_owned()), 1),
            TagFilter::All
        );
    }
}
