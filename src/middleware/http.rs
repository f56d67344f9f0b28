//! Transport layers wrapped around the whole edge, assets included.
//!
//! - `x-request-id`: generated here if the browser did not send one, forwarded to the
//!   renderer with the identity headers and echoed on the response, so one storefront page
//!   load can be followed through the edge log and the renderer log.
//! - Body limit: request bodies are buffered before forwarding (checkout and admin forms
//!   are small), so the cap bounds per-request memory on the edge.
//! - Timeout: covers the whole upstream round trip. A renderer that stops answering
//!   becomes a 504 instead of a hung browser tab; the edge is a gateway, hence not 408.
//! - TraceLayer: one span per request with method, path and status.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

/// Largest request body forwarded to the renderer.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn apply(router: Router) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let layers = ServiceBuilder::new()
        // TimeoutLayer errors are turned into responses here; the router must stay Infallible.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                StatusCode::GATEWAY_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}
