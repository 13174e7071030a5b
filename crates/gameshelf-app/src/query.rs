// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Entry, SortMode, ViewState};
use std::cmp::Ordering;
use std::ops::Range;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub const PAGE_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub total_pages: usize,
}

impl Pagination {
    pub fn label(self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }

    pub const fn can_prev(self) -> bool {
        self.page > 1
    }

    pub const fn can_next(self) -> bool {
        self.page < self.total_pages
    }
}

/// Filtered, sorted and paginated projection of a catalog. Never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a> {
    pub filtered: Vec<&'a Entry>,
    pub pagination: Pagination,
    page_range: Range<usize>,
}

impl<'a> DerivedView<'a> {
    pub fn page_items(&self) -> &[&'a Entry] {
        &self.filtered[self.page_range.clone()]
    }

    pub const fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    pub const fn page(&self) -> usize {
        self.pagination.page
    }

    /// Absolute position of a page item inside `filtered`.
    pub fn page_offset(&self) -> usize {
        self.page_range.start
    }
}

pub fn total_pages(filtered_len: usize) -> usize {
    filtered_len.div_ceil(PAGE_SIZE).max(1)
}

/// Entries matching both the text query and the tag filter, in catalog order.
pub fn filter_entries<'a>(entries: &'a [Entry], view: &ViewState) -> Vec<&'a Entry> {
    let needle = view.query.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.matches_text(&needle) && view.tag.matches(entry))
        .collect()
}

/// Stable sort; ties keep catalog order.
pub fn sort_entries(entries: &mut [&Entry], mode: SortMode) {
    match mode {
        SortMode::Updated => entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortMode::Popular => entries.sort_by(|a, b| b.popularity.total_cmp(&a.popularity)),
        SortMode::Alphabetical => entries.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
}

/// Orders titles the way a reader expects: letters first with accents and
/// case ignored, then accents (`Eclair` before `Éclair`), then lowercase
/// before uppercase, then raw code points so the order stays total.
pub fn compare_titles(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(base_letters(right))
        .then_with(|| {
            left.chars()
                .flat_map(char::to_lowercase)
                .cmp(right.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| {
            left.chars()
                .map(char::is_uppercase)
                .cmp(right.chars().map(char::is_uppercase))
        })
        .then_with(|| left.cmp(right))
}

/// Canonical decomposition with combining marks removed, lowercased.
fn base_letters(title: &str) -> impl Iterator<Item = char> + '_ {
    title
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
}

/// Pure derivation. A page past the end is read as the last page, but `view`
/// is left untouched; use [`compute`] to persist the clamp.
pub fn derive<'a>(entries: &'a [Entry], view: &ViewState) -> DerivedView<'a> {
    let mut filtered = filter_entries(entries, view);
    sort_entries(&mut filtered, view.sort);

    let total_pages = total_pages(filtered.len());
    let page = view.page.clamp(1, total_pages);
    let start = ((page - 1) * PAGE_SIZE).min(filtered.len());
    let end = (start + PAGE_SIZE).min(filtered.len());

    DerivedView {
        filtered,
        pagination: Pagination { page, total_pages },
        page_range: start..end,
    }
}

/// Derives the view and writes the clamped page back into `view`.
pub fn compute<'a>(entries: &'a [Entry], view: &mut ViewState) -> DerivedView<'a> {
    let derived = derive(entries, view);
    if view.page != derived.page() {
        tracing::debug!(
            requested = view.page,
            page = derived.page(),
            "page clamped to available range"
        );
        view.page = derived.page();
    }
    derived
}
