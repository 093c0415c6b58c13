use super::{FetchError, ProblemSource};
use crate::problem::{read_problems, Problem};
use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

const PROBLEMS_PATH: &str = "api/v1/problems";
const HEALTH_PATH: &str = "health";

/// Problem store reached over HTTP
pub struct HttpProblemSource {
    base: String,
    problems_url: Url,
    health_url: Url,
    client: Client,
}

impl HttpProblemSource {
    /// Create a source for the store at `base_url` (e.g. `http://localhost:8080`).
    ///
    /// Every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if `base_url` does not parse, or
    /// [`FetchError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let invalid = |source| FetchError::InvalidUrl {
            url: base_url.to_string(),
            source,
        };
        let mut base = Url::parse(base_url).map_err(invalid)?;
        // Url::join replaces the last segment unless the base ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let problems_url = base.join(PROBLEMS_PATH).map_err(invalid)?;
        let health_url = base.join(HEALTH_PATH).map_err(invalid)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Transport {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            problems_url,
            health_url,
            client,
        })
    }

    /// Full URL of the problem list endpoint.
    pub fn problems_url(&self) -> &Url {
        &self.problems_url
    }

    /// Full URL of the upstream health endpoint.
    pub fn health_url(&self) -> &Url {
        &self.health_url
    }

    fn get(&self, url: &Url) -> Result<reqwest::blocking::Response, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl ProblemSource for HttpProblemSource {
    fn fetch_all(&self) -> Result<Vec<Problem>, FetchError> {
        let start = Instant::now();
        let response = self.get(&self.problems_url)?;
        let problems = read_problems(response).map_err(|source| FetchError::Decode {
            origin: self.problems_url.to_string(),
            source,
        })?;
        info!(
            url = %self.problems_url,
            count = problems.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "problems downloaded"
        );
        Ok(problems)
    }

    fn check_health(&self) -> Result<(), FetchError> {
        self.get(&self.health_url)?;
        debug!(url = %self.health_url, "problem store healthy");
        Ok(())
    }

    fn describe(&self) -> &str {
        &self.base
    }
}
