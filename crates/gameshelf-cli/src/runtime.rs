// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use gameshelf_app::CatalogLoad;
use gameshelf_catalog::Client;

pub enum CatalogFeed {
    Remote(Client),
    Demo,
}

/// Terminal host for the controller. The address lives in memory and is
/// printed on exit so a session can be resumed with `--address`.
pub struct ShelfRuntime {
    feed: CatalogFeed,
    address: String,
}

impl ShelfRuntime {
    pub fn new(feed: CatalogFeed, address: impl Into<String>) -> Self {
        Self {
            feed,
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl gameshelf_tui::AppRuntime for ShelfRuntime {
    fn fetch_catalog(&mut self) -> Result<CatalogLoad> {
        match &self.feed {
            CatalogFeed::Remote(client) => client.load(),
            CatalogFeed::Demo => Ok(CatalogLoad {
                catalog: gameshelf_testkit::demo_catalog(),
                dropped: Vec::new(),
            }),
        }
    }

    fn current_address(&self) -> String {
        self.address.clone()
    }

    fn replace_address(&mut self, address: &str) -> Result<()> {
        address.clone_into(&mut self.address);
        Ok(())
    }

    fn open_link(&mut self, url: &str) -> Result<()> {
        tracing::info!(%url, "opening link");
        open::that(url).with_context(|| format!("open {url} in the system browser"))
    }
}
