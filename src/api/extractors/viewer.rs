use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::services::auth::AuthState;

/// `AuthState` that the identity middleware stored in request extensions.
///
/// Never rejects: if the middleware did not run (e.g. a filtered path), the viewer is anonymous.
pub struct Viewer(pub AuthState);

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Viewer(
            parts.extensions.get::<AuthState>().cloned().unwrap_or_default(),
        ))
    }
}
