// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Where a dataset comes from: a remote URL or a local file.

use std::fmt;
use std::path::PathBuf;

/// Location of a dataset. Anything that isn't an `http(s)://` URL is
/// treated as a local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::File(PathBuf::from(raw))
        }
    }

    /// Fetch the raw bytes, once, with no retry.
    pub async fn fetch_bytes(&self, http: &reqwest::Client) -> Result<Vec<u8>, SourceError> {
        match self {
            DataSource::Url(url) => {
                let response = http
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| SourceError::Request(e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Status(status.as_u16()));
                }

                let body = response
                    .bytes()
                    .await
                    .map_err(|e| SourceError::Request(e.to_string()))?;
                Ok(body.to_vec())
            }
            DataSource::File(path) => tokio::fs::read(path)
                .await
                .map_err(|e| SourceError::Io(e.to_string())),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Transport-level failures shared by both dataset loaders.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Failed to read file: {0}")]
    Io(String),
}
