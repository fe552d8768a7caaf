//! Conference schedule feed loading.
//!
//! The feed is a JSON array of session records, served over HTTP or kept
//! as a local file. Loading either succeeds with every well-formed record
//! or fails outright; there is no retry.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sched_core::RawEvent;
use thiserror::Error;

/// Default request timeout for feed downloads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Feed loading errors. Any of these ends the session.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("feed unavailable: {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    /// Reading a local feed file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document is not a JSON array.
    #[error("invalid feed: {0}")]
    InvalidFeed(String),
}

/// Where the feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    Path(PathBuf),
}

impl FromStr for FeedSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Feed loader.
///
/// Safe to clone; clones share the underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    /// Creates a client whose HTTP requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FeedError::ClientBuild)?;
        Ok(Self { http })
    }

    /// Loads and parses the feed.
    pub async fn load(&self, source: &FeedSource) -> Result<Vec<RawEvent>, FeedError> {
        let body = match source {
            FeedSource::Url(url) => self.fetch(url).await?,
            FeedSource::Path(path) => read_file(path).await?,
        };
        let events = parse_feed(&body)?;
        tracing::info!(source = %source, events = events.len(), "loaded schedule feed");
        Ok(events)
    }

    async fn fetch(&self, url: &str) -> Result<String, FeedError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.text().await?)
    }
}

async fn read_file(path: &Path) -> Result<String, FeedError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FeedError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Parses a feed document.
///
/// The root must be an array. Elements that are not valid session records
/// are logged and dropped so one malformed record does not sink the load.
pub fn parse_feed(body: &str) -> Result<Vec<RawEvent>, FeedError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|err| FeedError::InvalidFeed(err.to_string()))?;

    let mut events = Vec::with_capacity(values.len());
    for (position, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawEvent>(value) {
            Ok(event) => events.push(event),
            Err(err) => {
                tracing::warn!(position, error = %err, "skipping malformed feed record");
            }
        }
    }
    Ok(events)
}
