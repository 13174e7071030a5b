// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use gameshelf_app::{Catalog, Entry};
use time::{Duration, OffsetDateTime, macros::datetime};

const TITLE_ADJECTIVES: [&str; 16] = [
    "Pixel", "Neon", "Tiny", "Lost", "Hollow", "Crimson", "Quiet", "Rapid", "Cosmic", "Paper",
    "Frozen", "Golden", "Broken", "Lucky", "Silent", "Wild",
];
const TITLE_NOUNS: [&str; 16] = [
    "Dungeon", "Runner", "Garden", "Orbit", "Kingdom", "Harbor", "Circuit", "Forest", "Tower",
    "Voyage", "Arcade", "Lantern", "Meadow", "Citadel", "Reactor", "Maze",
];
const TAGS: [&str; 10] = [
    "arcade",
    "platformer",
    "puzzle",
    "racing",
    "retro",
    "roguelike",
    "shooter",
    "simulation",
    "strategy",
    "co-op",
];
const PITCHES: [&str; 8] = [
    "A short jam game about",
    "A browser experiment in",
    "A tiny prototype exploring",
    "An endless challenge built around",
    "A cozy weekend project about",
    "A fast-paced take on",
    "A hand-drawn adventure through",
    "A one-button game about",
];
const THEMES: [&str; 8] = [
    "gravity and timing",
    "stacking falling blocks",
    "dodging neon traffic",
    "growing a quiet garden",
    "escaping a shifting maze",
    "defending a tiny planet",
    "racing against the tide",
    "mapping a hollow cave",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn chance(&mut self, percent: u64) -> bool {
        self.next_u64() % 100 < percent
    }
}

/// Deterministic catalog generator. The same seed always yields the same
/// entries, so tests and `--demo` can rely on stable output.
#[derive(Debug, Clone)]
pub struct GameFaker {
    rng: DeterministicRng,
    serial: usize,
}

impl GameFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            serial: 0,
        }
    }

    pub fn entry(&mut self) -> Entry {
        self.serial += 1;
        let title = format!(
            "{} {} {}",
            self.pick(&TITLE_ADJECTIVES),
            self.pick(&TITLE_NOUNS),
            self.serial
        );
        let slug = title.to_lowercase().replace(' ', "-");

        let mut tags = Vec::new();
        for _ in 0..=self.rng.int_n(3) {
            let tag = self.pick(&TAGS).to_owned();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let repo = self
            .rng
            .chance(60)
            .then(|| format!("https://github.com/gameshelf/{slug}"));
        let cover = self
            .rng
            .chance(70)
            .then(|| format!("assets/covers/{slug}.png"));
        let minutes_ago = self.rng.int_n(60 * 24 * 365) as i64;

        Entry {
            description: format!("{} {}.", self.pick(&PITCHES), self.pick(&THEMES)),
            tags,
            url: format!("https://play.gameshelf.dev/{slug}/"),
            repo,
            cover,
            updated_at: reference_now() - Duration::minutes(minutes_ago),
            popularity: self.rng.int_n(5_000) as f64,
            featured: false,
            title,
        }
    }

    pub fn entries(&mut self, count: usize) -> Vec<Entry> {
        (0..count).map(|_| self.entry()).collect()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

pub fn reference_now() -> OffsetDateTime {
    datetime!(2026-01-15 09:30 UTC)
}

/// Catalog used by `--demo`: 24 generated games, the fifth one featured.
pub fn demo_catalog() -> Catalog {
    let mut entries = GameFaker::new(7).entries(24);
    if let Some(entry) = entries.get_mut(4) {
        entry.featured = true;
    }
    Catalog::new(entries)
}

/// Minimal entry with predictable fields, for hand-built fixtures.
pub fn entry(title: &str, tags: &[&str], days_ago: i64, popularity: f64) -> Entry {
    Entry {
        title: title.to_owned(),
        description: format!("About {title}"),
        tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
        url: format!("https://play.gameshelf.dev/{}/", title.to_lowercase()),
        repo: None,
        cover: None,
        updated_at: reference_now() - Duration::days(days_ago),
        popularity,
        featured: false,
    }
}

#[cfg(test)]
mod tests {
    use super::{GameFaker, demo_catalog, entry, reference_now};
    use std::collections::BTreeSet;

    #[test]
    fn same_seed_same_entries() {
        let left = GameFaker::new(42).entries(5);
        let right = GameFaker::new(42).entries(5);
        assert_eq!(left, right);
    }

    #[test]
    fn titles_are_unique() {
        let entries = GameFaker::new(3).entries(50);
        let titles = entries
            .iter()
            .map(|entry| entry.title.clone())
            .collect::<BTreeSet<String>>();
        assert_eq!(titles.len(), 50);
    }

    #[test]
    fn generated_entries_are_well_formed() {
        for game in GameFaker::new(9).entries(30) {
            assert!(!game.title.is_empty());
            assert!(!game.tags.is_empty());
            assert!(game.url.starts_with("https://"));
            assert!(game.updated_at <= reference_now());
            assert!(game.popularity >= 0.0);
            let distinct = game.tags.iter().collect::<BTreeSet<&String>>();
            assert_eq!(distinct.len(), game.tags.len());
        }
    }

    #[test]
    fn demo_catalog_has_one_featured_entry() {
        let catalog = demo_catalog();
        assert_eq!(catalog.len(), 24);
        assert_eq!(
            catalog.entries().iter().filter(|entry| entry.featured).count(),
            1
        );
        assert_eq!(
            catalog.featured().map(|entry| entry.title.as_str()),
            Some(catalog.entries()[4].title.as_str())
        );
    }

    #[test]
    fn fixture_entry_uses_reference_clock() {
        let game = entry("Kart", &["racing"], 2, 10.0);
        assert_eq!(game.updated_at, reference_now() - time::Duration::days(2));
        assert!(game.has_tag("racing"));
    }
}
