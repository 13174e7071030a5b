// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;

pub const ALL_TAGS: &str = "all";

/// One game in the catalog. Immutable once decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub url: String,
    pub repo: Option<String>,
    pub cover: Option<String>,
    pub updated_at: OffsetDateTime,
    pub popularity: f64,
    pub featured: bool,
}

impl Entry {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }

    /// `needle` must already be lowercased; an empty needle matches everything.
    pub fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Updated,
    Popular,
    Alphabetical,
}

impl SortMode {
    pub const ALL: [Self; 3] = [Self::Updated, Self::Popular, Self::Alphabetical];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Popular => "popular",
            Self::Alphabetical => "alphabetical",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Updated => "recently updated",
            Self::Popular => "most popular",
            Self::Alphabetical => "a-z",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "updated" => Some(Self::Updated),
            "popular" => Some(Self::Popular),
            "alphabetical" => Some(Self::Alphabetical),
            _ => None,
        }
    }

    pub fn rotate(self, delta: isize) -> Self {
        let modes = Self::ALL;
        let current = modes.iter().position(|mode| *mode == self).unwrap_or(0) as isize;
        let len = modes.len() as isize;
        modes[(current + delta).rem_euclid(len) as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Only(String),
}

impl TagFilter {
    /// Empty input and the `all` sentinel both mean "no tag filter".
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_TAGS {
            Self::All
        } else {
            Self::Only(value.to_owned())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_TAGS,
            Self::Only(tag) => tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Only(tag) => tag,
        }
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            Self::All => true,
            Self::Only(tag) => entry.has_tag(tag),
        }
    }
}

/// What the grid shows. `page` is 1-based and never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub query: String,
    pub tag: TagFilter,
    pub sort: SortMode,
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            query: String::new(),
            tag: TagFilter::All,
            sort: SortMode::Updated,
            page: 1,
        }
    }
}
