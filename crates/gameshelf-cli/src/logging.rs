// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::config::APP_NAME;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "gameshelf=info";

/// Resolves the log file. The terminal belongs to the UI, so logs always go
/// to disk.
pub fn log_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os("GAMESHELF_LOG_FILE") {
        return Ok(PathBuf::from(path));
    }
    let cache_root = dirs::cache_dir().ok_or_else(|| {
        anyhow!("cannot resolve cache directory; set GAMESHELF_LOG_FILE to a writable path")
    })?;
    Ok(cache_root.join(APP_NAME).join("gameshelf.log"))
}

pub fn init_tracing() -> Result<PathBuf> {
    let path = log_path()?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env("GAMESHELF_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let format = env::var("GAMESHELF_LOG_FORMAT").unwrap_or_else(|_| "compact".to_owned());
    let writer = Mutex::new(file);

    let registry = tracing_subscriber::registry().with(filter);
    match format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(writer))
            .try_init(),
        _ => registry
            .with(fmt::layer().compact().with_ansi(false).with_writer(writer))
            .try_init(),
    }
    .context("install tracing subscriber")?;

    Ok(path)
}
