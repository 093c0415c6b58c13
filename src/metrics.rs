use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Counters exported at `/metrics`
///
/// All counters are plain atomics updated without locks from the request
/// coroutines.
#[derive(Default)]
pub struct SkeletonMetrics {
    requests: AtomicUsize,
    rendered: AtomicUsize,
    not_found: AtomicUsize,
    render_failures: AtomicUsize,
    render_latency_ns: AtomicU64,
}

impl SkeletonMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count any HTTP request, including `/health` and `/metrics`.
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a successful render and its duration.
    pub fn record_rendered(&self, elapsed: Duration) {
        self.rendered.fetch_add(1, Ordering::Relaxed);
        self.render_latency_ns
            .fetch_add(elapsed.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn record_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_render_failure(&self) {
        self.render_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn rendered_count(&self) -> usize {
        self.rendered.load(Ordering::Relaxed)
    }

    pub fn not_found_count(&self) -> usize {
        self.not_found.load(Ordering::Relaxed)
    }

    pub fn render_failure_count(&self) -> usize {
        self.render_failures.load(Ordering::Relaxed)
    }

    /// Mean render time over successful renders, zero before the first one.
    pub fn average_render_latency(&self) -> Duration {
        let count = self.rendered.load(Ordering::Relaxed) as u64;
        if count == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(self.render_latency_ns.load(Ordering::Relaxed) / count)
        }
    }

    /// Prometheus text exposition; `problems_loaded` comes from the registry.
    pub fn render_prometheus(&self, problems_loaded: usize) -> String {
        format!(
            "# HELP skeleton_requests_total Total number of handled requests\n\
             # TYPE skeleton_requests_total counter\n\
             skeleton_requests_total {}\n\
             # HELP skeleton_rendered_total Skeletons rendered successfully\n\
             # TYPE skeleton_rendered_total counter\n\
             skeleton_rendered_total {}\n\
             # HELP skeleton_not_found_total Requests for unknown or unavailable problems\n\
             # TYPE skeleton_not_found_total counter\n\
             skeleton_not_found_total {}\n\
             # HELP skeleton_render_failures_total Problems that could not be rendered\n\
             # TYPE skeleton_render_failures_total counter\n\
             skeleton_render_failures_total {}\n\
             # HELP skeleton_problems_loaded Problems in the current registry snapshot\n\
             # TYPE skeleton_problems_loaded gauge\n\
             skeleton_problems_loaded {}\n\
             # HELP skeleton_render_latency_seconds Average render latency in seconds\n\
             # TYPE skeleton_render_latency_seconds gauge\n\
             skeleton_render_latency_seconds {}\n",
            self.request_count(),
            self.rendered_count(),
            self.not_found_count(),
            self.render_failure_count(),
            problems_loaded,
            self.average_render_latency().as_secs_f64(),
        )
    }
}
