// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Entry, TagUniverse};

/// The full list of entries for a session. There are no mutators; a new load
/// replaces the whole value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    entries: Vec<Entry>,
    tags: TagUniverse,
}

impl Catalog {
    pub fn new(entries: Vec<Entry>) -> Self {
        let tags = TagUniverse::from_entries(&entries);
        Self { entries, tags }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn tags(&self) -> &TagUniverse {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry flagged as featured, falling back to the first entry.
    pub fn featured(&self) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.featured)
            .or_else(|| self.entries.first())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedEntry {
    pub index: usize,
    pub reason: String,
}

/// A decoded catalog plus the payload elements that failed validation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub dropped: Vec<DroppedEntry>,
}
