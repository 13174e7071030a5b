// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Mapping between [`ViewState`] and address query parameters.
//!
//! Reading accepts `?q=..`, `q=..` or an absolute URL. Writing always emits
//! `q` (even when empty) and omits `tag`, `sort` and `page` when they hold
//! their defaults, so a written address reads back to the same state.

use crate::{SortMode, TagFilter, ViewState};
use url::{Url, form_urlencoded};

pub const PARAM_QUERY: &str = "q";
pub const PARAM_TAG: &str = "tag";
pub const PARAM_SORT: &str = "sort";
pub const PARAM_PAGE: &str = "page";

/// Parses an address into a view state. The tag is taken verbatim; callers
/// normalize it against the catalog's tag universe.
pub fn parse_address(address: &str) -> ViewState {
    let query = address_query(address);

    let mut q = None;
    let mut tag = None;
    let mut sort = None;
    let mut page = None;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match key.as_ref() {
            PARAM_QUERY => &mut q,
            PARAM_TAG => &mut tag,
            PARAM_SORT => &mut sort,
            PARAM_PAGE => &mut page,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    ViewState {
        query: q.unwrap_or_default(),
        tag: tag.as_deref().map(TagFilter::parse).unwrap_or_default(),
        sort: sort
            .as_deref()
            .and_then(SortMode::parse)
            .unwrap_or_default(),
        page: page.as_deref().map_or(1, parse_page),
    }
}

pub fn format_address(view: &ViewState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair(PARAM_QUERY, &view.query);
    if view.tag != TagFilter::All {
        serializer.append_pair(PARAM_TAG, view.tag.as_str());
    }
    if view.sort != SortMode::Updated {
        serializer.append_pair(PARAM_SORT, view.sort.as_str());
    }
    if view.page != 1 {
        serializer.append_pair(PARAM_PAGE, &view.page.to_string());
    }
    format!("?{}", serializer.finish())
}

fn address_query(address: &str) -> String {
    let trimmed = address.trim();
    if let Ok(url) = Url::parse(trimmed)
        && url.has_host()
    {
        return url.query().unwrap_or_default().to_owned();
    }
    let without_path = trimmed
        .split_once('?')
        .map_or(trimmed, |(_, query)| query);
    without_path
        .split_once('#')
        .map_or(without_path, |(query, _)| query)
        .to_owned()
}

/// Leading digits only, like a lenient integer parse; anything that does not
/// yield a positive number reads as page 1. Digit runs too long for `usize`
/// saturate and are clamped to the last page later.
fn parse_page(raw: &str) -> usize {
    let digits = raw
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect::<String>();
    if digits.is_empty() {
        return 1;
    }
    match digits.parse::<usize>() {
        Ok(0) => 1,
        Ok(page) => page,
        Err(_) => usize::MAX,
    }
}
