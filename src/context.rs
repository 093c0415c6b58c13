use crate::error::SkeletonError;
use crate::generator::render_problem;
use crate::health::{HealthCache, HealthStatus};
use crate::metrics::SkeletonMetrics;
use crate::registry::{LookupError, ProblemRegistry};
use crate::source::{FetchError, ProblemSource};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Everything a request handler needs, shared by reference count
///
/// Built once at startup and handed to the HTTP service, the refresh thread
/// and the file watcher. There is no global state: two contexts are fully
/// independent, which is what the integration tests rely on.
pub struct AppContext {
    pub registry: ProblemRegistry,
    pub source: Arc<dyn ProblemSource>,
    pub metrics: SkeletonMetrics,
    health: HealthCache,
    /// Held across fetch and swap so populators cannot overwrite a newer
    /// snapshot with an older fetch.
    refresh_lock: Mutex<()>,
}

/// How long a health probe result is reused unless configured otherwise.
pub const DEFAULT_HEALTH_TTL: Duration = Duration::from_secs(2);

impl AppContext {
    /// A context with an empty registry; call [`AppContext::refresh`] to load.
    pub fn new(source: Arc<dyn ProblemSource>) -> Self {
        Self {
            registry: ProblemRegistry::new(),
            source,
            metrics: SkeletonMetrics::new(),
            health: HealthCache::new(DEFAULT_HEALTH_TTL),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Reuse health probe results for `ttl` instead of [`DEFAULT_HEALTH_TTL`].
    pub fn with_health_ttl(mut self, ttl: Duration) -> Self {
        self.health = HealthCache::new(ttl);
        self
    }

    /// Health of the problem source, probed at most once per TTL.
    pub fn check_health(&self) -> Arc<HealthStatus> {
        self.health.check(self.source.as_ref())
    }

    /// Fetch the full problem list and swap it into the registry.
    ///
    /// Refreshes are serialized: a second caller waits for the running one
    /// and then fetches again. On failure the previous snapshot stays in place.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] reported by the source, or
    /// [`FetchError::RefreshPoisoned`] if an earlier refresh panicked. The
    /// poison is cleared so the next refresh runs normally.
    pub fn refresh(&self) -> Result<usize, FetchError> {
        let _guard = match self.refresh_lock.lock() {
            Ok(guard) => guard,
            Err(_) => {
                self.refresh_lock.clear_poison();
                return Err(FetchError::RefreshPoisoned {
                    origin: self.source.describe().to_string(),
                });
            }
        };
        let problems = self.source.fetch_all()?;
        let count = self.registry.replace(problems);
        info!(source = %self.source.describe(), count, "problems loaded");
        Ok(count)
    }

    /// Like [`AppContext::refresh`] but logs failures instead of returning them.
    ///
    /// Used at startup, where an unreachable store must not stop the service.
    pub fn refresh_or_log(&self) -> bool {
        match self.refresh() {
            Ok(_) => true,
            Err(e) => {
                error!(source = %self.source.describe(), error = %e, "could not load problems");
                false
            }
        }
    }

    /// Render the Java skeleton for `problem_id`.
    ///
    /// # Errors
    ///
    /// - [`SkeletonError::ProblemNotFound`] when the registry is empty or has
    ///   no such id
    /// - [`SkeletonError::RenderingFailed`] when the definition is malformed
    pub fn render_skeleton(&self, problem_id: &str) -> Result<String, SkeletonError> {
        let problem = self.registry.lookup(problem_id).map_err(|reason| {
            self.metrics.record_not_found();
            if reason == LookupError::NotReady {
                warn!(problem_id, "skeleton requested before problems were loaded");
            }
            SkeletonError::ProblemNotFound {
                id: problem_id.to_string(),
                reason,
            }
        })?;

        let start = Instant::now();
        match render_problem(&problem) {
            Ok(source) => {
                self.metrics.record_rendered(start.elapsed());
                Ok(source)
            }
            Err(source) => {
                self.metrics.record_render_failure();
                error!(problem_id, error = %source, "cannot render skeleton");
                Err(SkeletonError::RenderingFailed {
                    id: problem_id.to_string(),
                    source,
                })
            }
        }
    }
}
