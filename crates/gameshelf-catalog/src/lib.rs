// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod decode;

pub use decode::{decode_catalog, parse_timestamp};

use anyhow::{Context, Result, anyhow, bail};
use gameshelf_app::CatalogLoad;
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SOURCE: &str = "./data/games.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Http(Url),
    File(PathBuf),
}

impl CatalogSource {
    /// `http://` and `https://` become remote sources; anything else is a path.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            bail!("catalog source must not be empty; set [catalog].source or pass --source");
        }

        let lowered = trimmed.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            let url = Url::parse(trimmed)
                .with_context(|| format!("invalid catalog URL {trimmed:?}"))?;
            return Ok(Self::Http(url));
        }
        if let Some(path) = trimmed.strip_prefix("file://") {
            return Ok(Self::File(PathBuf::from(path)));
        }
        if lowered.contains("://") {
            bail!("unsupported catalog source {trimmed:?}; use an http(s) URL or a file path");
        }

        Ok(Self::File(PathBuf::from(trimmed)))
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    source: CatalogSource,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(source: CatalogSource, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            bail!("catalog timeout must be positive");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            source,
            timeout,
            http,
        })
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches and decodes the whole catalog in one request.
    pub fn load(&self) -> Result<CatalogLoad> {
        tracing::info!(source = %self.source, "loading catalog");
        let bytes = self.fetch_bytes()?;
        let load =
            decode_catalog(&bytes).with_context(|| format!("read catalog from {}", self.source))?;
        tracing::info!(
            entries = load.catalog.len(),
            dropped = load.dropped.len(),
            "catalog decoded"
        );
        Ok(load)
    }

    fn fetch_bytes(&self) -> Result<Vec<u8>> {
        match &self.source {
            CatalogSource::Http(url) => {
                let response = self
                    .http
                    .get(url.clone())
                    .send()
                    .map_err(|error| connection_error(url, error))?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().unwrap_or_default();
                    return Err(clean_error_response(status, &body));
                }

                let bytes = response.bytes().context("read catalog response body")?;
                Ok(bytes.to_vec())
            }
            CatalogSource::File(path) => fs::read(path).with_context(|| {
                format!(
                    "read catalog file {}; check [catalog].source or pass --source",
                    path.display()
                )
            }),
        }
    }
}

fn connection_error(url: &Url, error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        return anyhow!("timed out fetching catalog from {url}; raise [catalog].timeout");
    }
    anyhow!("cannot reach catalog at {url} ({error})")
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    message: Option<String>,
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(message) = parsed.error.or(parsed.message)
        && !message.is_empty()
    {
        return anyhow!("catalog server error ({}): {}", status.as_u16(), message);
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('<') {
        return anyhow!("catalog server error ({}): {}", status.as_u16(), trimmed);
    }

    anyhow!("catalog server returned {}", status.as_u16())
}
