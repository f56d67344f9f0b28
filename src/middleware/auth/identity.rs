//! `token` cookie verification → identity headers + `AuthState` in extensions.
//!
//! Never rejects: a missing, invalid or unrepresentable credential just means the request
//! continues as anonymous. Allow/deny is the guard's job.

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};

use crate::services::auth::propagate::strip_identity_headers;
use crate::services::path_filter;
use crate::state::AppState;

/// Attach identity propagation to every route of `router`.
///
/// Apply it *after* (outside of) the guard so the guard sees the rewritten headers:
/// ```ignore
/// let router = middleware::auth::guard::apply(router);
/// let router = middleware::auth::identity::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, identity_middleware))
}

async fn identity_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if !path_filter::applies(req.uri().path()) {
        // Assets skip verification, but client-sent identity headers still never reach upstream.
        let (mut parts, body) = req.into_parts();
        parts.headers = strip_identity_headers(&parts.headers);
        return next.run(Request::from_parts(parts, body)).await;
    }

    let req = state.propagator.propagate(req);
    next.run(req).await
}
