//! Cached upstream health probe.
//!
//! `/health` is served on may coroutines while [`ProblemSource::check_health`]
//! blocks on network I/O. The cache keeps the last probe result for a short
//! TTL and lets at most one caller probe at a time; concurrent callers get the
//! previous result instead of waiting on the store.

use crate::source::ProblemSource;
use arc_swap::ArcSwapOption;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Outcome of one health probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    /// When the probe finished
    pub checked_at: Instant,
    /// Failure description, `None` when the source answered
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

/// Last known health of the problem source
pub struct HealthCache {
    ttl: Duration,
    last: ArcSwapOption<HealthStatus>,
    probing: AtomicBool,
}

/// Clears the in-flight flag even if the probe panics.
struct ProbeGuard<'a>(&'a AtomicBool);

impl Drop for ProbeGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl HealthCache {
    /// A cache that reuses a probe result for `ttl`. A zero TTL probes on
    /// every call that is not racing another probe.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            last: ArcSwapOption::empty(),
            probing: AtomicBool::new(false),
        }
    }

    /// Health of `source`, probing it only when the cached result is stale
    /// and no other probe is running.
    pub fn check(&self, source: &dyn ProblemSource) -> Arc<HealthStatus> {
        let last = self.last.load_full();
        if let Some(status) = &last {
            if status.checked_at.elapsed() < self.ttl {
                return Arc::clone(status);
            }
        }

        if self
            .probing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            match last {
                Some(status) => return status,
                // Nothing to fall back on before the very first probe lands.
                None => return self.probe(source),
            }
        }
        let _guard = ProbeGuard(&self.probing);
        self.probe(source)
    }

    /// Most recent probe result without probing.
    pub fn last(&self) -> Option<Arc<HealthStatus>> {
        self.last.load_full()
    }

    fn probe(&self, source: &dyn ProblemSource) -> Arc<HealthStatus> {
        let error = match source.check_health() {
            Ok(()) => None,
            Err(e) => {
                warn!(source = %source.describe(), error = %e, "health check failed");
                Some(e.to_string())
            }
        };
        let status = Arc::new(HealthStatus {
            checked_at: Instant::now(),
            error,
        });
        self.last.store(Some(Arc::clone(&status)));
        status
    }
}
