use http::StatusCode;
use may_minihttp::Response;
use serde_json::Value;

fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

/// Write a `text/plain` response; used for skeletons and error messages.
pub fn write_text(res: &mut Response, status: u16, body: String) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: text/plain; charset=utf-8");
    res.body_vec(body.into_bytes());
}

/// Write a JSON response.
pub fn write_json(res: &mut Response, status: u16, body: &Value) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: application/json");
    res.body_vec(body.to_string().into_bytes());
}

/// Write the Prometheus text exposition format.
pub fn write_metrics(res: &mut Response, body: String) {
    res.status_code(200, status_reason(200));
    res.header("Content-Type: text/plain; version=0.0.4");
    res.body_vec(body.into_bytes());
}
