use super::request::{resolve_route, Route};
use super::response::{write_json, write_metrics, write_text};
use crate::context::AppContext;
use crate::error::SkeletonError;
use crate::registry::LookupError;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::io;
use std::sync::Arc;
use std::time::{Instant, UNIX_EPOCH};
use tracing::info;

/// HTTP front end of the skeleton generator
///
/// Cheap to clone: every clone shares the same [`AppContext`].
#[derive(Clone)]
pub struct SkeletonService {
    ctx: Arc<AppContext>,
}

impl SkeletonService {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }
}

/// `GET /health`: reports the (cached) probe of the problem source.
///
/// Answers `200 {"status":"ok","lang":"java","problems":N,"loaded_at":T}` when
/// the source is reachable and `503` with the failing source otherwise.
/// `loaded_at` is the Unix time in seconds of the current snapshot, `null`
/// before the first load.
pub fn health_endpoint(res: &mut Response, ctx: &AppContext) -> u16 {
    if ctx.check_health().is_healthy() {
        let snapshot = ctx.registry.snapshot();
        let loaded_at = snapshot
            .loaded_at()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs());
        write_json(
            res,
            200,
            &json!({
                "status": "ok",
                "lang": "java",
                "problems": snapshot.len(),
                "loaded_at": loaded_at,
            }),
        );
        200
    } else {
        write_json(
            res,
            503,
            &json!({
                "status": "fail",
                "reason": format!("problems service unavailable: {}", ctx.source.describe()),
            }),
        );
        503
    }
}

/// `GET /api/v1/code/java/{problemId}`: the rendered skeleton as plain text.
///
/// `target` is the raw request target and is echoed in error messages.
pub fn skeleton_endpoint(
    res: &mut Response,
    ctx: &AppContext,
    target: &str,
    problem_id: &str,
) -> u16 {
    let (status, body) = match ctx.render_skeleton(problem_id) {
        Ok(source) => (200, source),
        Err(SkeletonError::ProblemNotFound {
            reason: LookupError::NotReady,
            ..
        }) => (500, format!("[err] {target}: problems could not be downloaded")),
        Err(SkeletonError::ProblemNotFound {
            reason: LookupError::UnknownProblem,
            id,
        }) => (404, format!("[err] {target}: problem {id} not found")),
        Err(e @ SkeletonError::RenderingFailed { .. }) => (500, e.to_string()),
    };
    write_text(res, status, body);
    status
}

impl HttpService for SkeletonService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let start = Instant::now();
        let method = req.method().to_string();
        let target = req.path().to_string();
        self.ctx.metrics.record_request();

        let status = match resolve_route(&method, &target) {
            Route::Health => health_endpoint(res, &self.ctx),
            Route::Metrics => {
                write_metrics(res, self.ctx.metrics.render_prometheus(self.ctx.registry.len()));
                200
            }
            Route::Skeleton(problem_id) => skeleton_endpoint(res, &self.ctx, &target, &problem_id),
            Route::NotFound => {
                write_json(
                    res,
                    404,
                    &json!({ "error": "Not Found", "method": method, "path": target }),
                );
                404
            }
        };

        info!(
            method = %method,
            path = %target,
            status,
            latency_us = start.elapsed().as_micros() as u64,
            "request handled"
        );
        Ok(())
    }
}
