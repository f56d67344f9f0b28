//! Rewrites the request URI to its canonical path before identity and the guard run.
//!
//! Outermost of the auth layers: filter, classifier and upstream URL all read the rewritten
//! URI, so a path cannot be classified one way here and routed another way upstream.

use std::str::FromStr;

use axum::{
    Router,
    extract::Request,
    http::{Uri, uri::PathAndQuery},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::request_path;

pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(request_path_middleware))
}

async fn request_path_middleware(mut req: Request, next: Next) -> Result<Response, AppError> {
    let path = req.uri().path();
    let canonical = request_path::canonicalize(path).map_err(|err| {
        tracing::debug!(error = %err, path = %path, "rejected request path");
        AppError::InvalidRequest(err.to_string())
    })?;

    if canonical != path {
        tracing::debug!(from = %path, to = %canonical, "canonicalized request path");
        let uri = with_path(req.uri(), &canonical)?;
        *req.uri_mut() = uri;
    }

    Ok(next.run(req).await)
}

fn with_path(uri: &Uri, path: &str) -> Result<Uri, AppError> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query =
        Some(PathAndQuery::from_str(&path_and_query).map_err(|_| AppError::Internal)?);
    Uri::from_parts(parts).map_err(|_| AppError::Internal)
}
