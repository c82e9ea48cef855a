use axum::{extract::Request, middleware::Next, response::Response};
use log::info;
use std::time::Instant;

/// Logs `METHOD path -> status (elapsed)` for every request
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{method} {path} -> {} ({:?})",
        response.status().as_u16(),
        started.elapsed()
    );
    response
}
