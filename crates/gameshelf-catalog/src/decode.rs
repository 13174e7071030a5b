// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use gameshelf_app::{Catalog, CatalogLoad, DroppedEntry, Entry};
use serde::Deserialize;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    title: String,
    description: String,
    tags: Vec<String>,
    url: String,
    #[serde(default)]
    repo: Option<String>,
    #[serde(default)]
    cover: Option<String>,
    updated_at: String,
    popularity: f64,
    #[serde(default)]
    featured: Option<bool>,
}

/// Decodes a catalog payload. A payload that is not a JSON array fails the
/// whole load; individual invalid elements are dropped and reported.
pub fn decode_catalog(bytes: &[u8]) -> Result<CatalogLoad> {
    let payload: Value = serde_json::from_slice(bytes).context("decode catalog JSON")?;
    let Value::Array(items) = payload else {
        bail!(
            "catalog payload must be a JSON array of entries, got {}",
            value_kind(&payload)
        );
    };

    let mut entries = Vec::with_capacity(items.len());
    let mut dropped = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        match decode_entry(item) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                tracing::warn!(index, %reason, "skipping invalid catalog entry");
                dropped.push(DroppedEntry { index, reason });
            }
        }
    }

    Ok(CatalogLoad {
        catalog: Catalog::new(entries),
        dropped,
    })
}

fn decode_entry(value: Value) -> std::result::Result<Entry, String> {
    let raw: RawEntry = serde_json::from_value(value).map_err(|error| error.to_string())?;

    if raw.title.trim().is_empty() {
        return Err("title must not be empty".to_owned());
    }
    if raw.url.trim().is_empty() {
        return Err(format!("{:?} has an empty url", raw.title));
    }
    if !raw.popularity.is_finite() {
        return Err(format!("{:?} has a non-finite popularity", raw.title));
    }
    let updated_at = parse_timestamp(&raw.updated_at).ok_or_else(|| {
        format!(
            "{:?} has invalid updatedAt {:?}; use RFC 3339 or YYYY-MM-DD",
            raw.title, raw.updated_at
        )
    })?;

    let mut tags: Vec<String> = Vec::with_capacity(raw.tags.len());
    for tag in raw.tags {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    Ok(Entry {
        title: raw.title,
        description: raw.description,
        tags,
        url: raw.url,
        repo: non_empty(raw.repo),
        cover: non_empty(raw.cover),
        updated_at,
        popularity: raw.popularity,
        featured: raw.featured.unwrap_or(false),
    })
}

/// RFC 3339, a bare `YYYY-MM-DDTHH:MM:SS` (read as UTC), or a bare date
/// (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    let local = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    if let Ok(parsed) = PrimitiveDateTime::parse(raw, local) {
        return Some(parsed.assume_utc());
    }
    let date = format_description!("[year]-[month]-[day]");
    Date::parse(raw, date)
        .ok()
        .map(|date| date.midnight().assume_utc())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
