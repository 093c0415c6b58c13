//! # Problem Sources
//!
//! Where the service gets its problem definitions from.
//!
//! - [`HttpProblemSource`] talks to the upstream problem store
//!   (`GET {url}/api/v1/problems`, `GET {url}/health`).
//! - [`FileProblemSource`] reads the same JSON payload from a local file,
//!   which is handy for offline use and pairs with file watching in
//!   [`crate::hot_reload`].
//!
//! Both report failures as [`FetchError`]. Callers log the error at the
//! boundary and keep serving whatever the registry already holds.

mod file;
mod http;

pub use file::FileProblemSource;
pub use http::HttpProblemSource;

use crate::problem::Problem;
use std::fmt;
use std::path::PathBuf;

/// Upstream could not be reached or its payload could not be used
#[derive(Debug)]
pub enum FetchError {
    /// The configured problems URL is not a valid absolute URL
    InvalidUrl {
        /// Offending URL as configured
        url: String,
        /// Parser error
        source: url::ParseError,
    },
    /// The request never produced a response (connect error, timeout, ...)
    Transport {
        /// Requested URL
        url: String,
        /// Client error
        source: reqwest::Error,
    },
    /// The upstream answered with a non-2xx status
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },
    /// The payload is not a valid problem list
    Decode {
        /// URL or path the payload came from
        origin: String,
        /// JSON error
        source: serde_json::Error,
    },
    /// A problems file could not be read
    Io {
        /// File path
        path: PathBuf,
        /// I/O error
        source: std::io::Error,
    },
    /// An earlier refresh panicked while holding the refresh lock
    RefreshPoisoned {
        /// Source the refresh was reading from
        origin: String,
    },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidUrl { url, source } => {
                write!(f, "invalid problems url '{url}': {source}")
            }
            FetchError::Transport { url, source } => write!(f, "GET {url} failed: {source}"),
            FetchError::Status { url, status } => {
                write!(f, "GET {url} returned status {status}")
            }
            FetchError::Decode { origin, source } => {
                write!(f, "cannot decode problems from {origin}: {source}")
            }
            FetchError::Io { path, source } => {
                write!(f, "cannot read problems file {}: {source}", path.display())
            }
            FetchError::RefreshPoisoned { origin } => {
                write!(f, "refresh from {origin} skipped: previous refresh panicked")
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::InvalidUrl { source, .. } => Some(source),
            FetchError::Transport { source, .. } => Some(source),
            FetchError::Status { .. } => None,
            FetchError::Decode { source, .. } => Some(source),
            FetchError::Io { source, .. } => Some(source),
            FetchError::RefreshPoisoned { .. } => None,
        }
    }
}

/// A provider of problem definitions
///
/// Implementations may block (network, disk). They are called from the
/// startup path, the refresh thread, the file watcher and the `/health`
/// handler, so they must be shareable across threads.
pub trait ProblemSource: Send + Sync {
    /// Fetch the complete problem list.
    fn fetch_all(&self) -> Result<Vec<Problem>, FetchError>;

    /// Check that the source is reachable.
    fn check_health(&self) -> Result<(), FetchError>;

    /// Human-readable location (URL or path) used in logs and health output.
    fn describe(&self) -> &str;
}
