use axum::{
    body::{to_bytes, Body},
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

const MAX_BUFFERED_BODY_BYTES: usize = 64 * 1024;
const MAX_LOGGED_BODY_BYTES: usize = 1024;

/// Records diagnostics whenever a handler returns a 4xx/5xx. The response
/// body is buffered so the same payload can still reach the caller.
pub async fn log_error_responses(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let uri = req.uri().to_string();
    let start = Instant::now();

    let response = next.run(req).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let latency_ms = start.elapsed().as_millis() as u64;
    let (parts, body) = response.into_parts();
    match to_bytes(body, MAX_BUFFERED_BODY_BYTES).await {
        Ok(bytes) => {
            let preview_len = bytes.len().min(MAX_LOGGED_BODY_BYTES);
            let preview = String::from_utf8_lossy(&bytes[..preview_len]);
            tracing::warn!(
                status = status.as_u16(),
                %method,
                %uri,
                latency_ms,
                body = %preview,
                "Request failed"
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(err) => {
            tracing::warn!(
                status = status.as_u16(),
                %method,
                %uri,
                latency_ms,
                error = %err,
                "Request failed (body not captured)"
            );
            Response::from_parts(parts, Body::empty())
        }
    }
}
