//! Identity propagation: verified claims → request headers for the renderer.
//!
//! Header contract (downstream reads these by name):
//! - `x-authenticated`: `"true"` / `"false"`, always set
//! - `x-user-id`, `x-user-email`, `x-user-role`, `x-user-data`: only when authenticated
//!
//! Inbound copies of these headers are always dropped first, so a client cannot
//! pose as someone else and a second pass overwrites rather than appends.

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue, Request};
use thiserror::Error;

use crate::services::auth::credential::{CookieCredential, CredentialSource};
use crate::services::auth::identity::{AuthState, Identity};
use crate::services::auth::token_verifier::TokenVerifier;

pub const X_AUTHENTICATED: &str = "x-authenticated";
pub const X_USER_DATA: &str = "x-user-data";
pub const X_USER_ID: &str = "x-user-id";
pub const X_USER_EMAIL: &str = "x-user-email";
pub const X_USER_ROLE: &str = "x-user-role";

pub const IDENTITY_HEADERS: [&str; 5] =
    [X_AUTHENTICATED, X_USER_DATA, X_USER_ID, X_USER_EMAIL, X_USER_ROLE];

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("claim '{header}' cannot be sent as a header value")]
    InvalidHeaderValue { header: &'static str },
}

/// Copy of `headers` with every identity header removed.
pub fn strip_identity_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    for name in IDENTITY_HEADERS {
        out.remove(name);
    }
    out
}

/// Copy of `headers` marked unauthenticated. Cannot fail.
pub fn anonymous_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = strip_identity_headers(headers);
    out.insert(X_AUTHENTICATED, HeaderValue::from_static("false"));
    out
}

/// Copy of `headers` carrying `state`.
pub fn identity_headers(
    headers: &HeaderMap,
    state: &AuthState,
) -> Result<HeaderMap, PropagationError> {
    let identity = match state {
        AuthState::Authenticated(identity) => identity,
        AuthState::Anonymous => return Ok(anonymous_headers(headers)),
    };

    let mut out = strip_identity_headers(headers);
    out.insert(X_AUTHENTICATED, HeaderValue::from_static("true"));
    out.insert(X_USER_ID, header_value(X_USER_ID, &identity.id())?);
    out.insert(X_USER_EMAIL, header_value(X_USER_EMAIL, &identity.email())?);
    out.insert(X_USER_ROLE, header_value(X_USER_ROLE, &identity.role())?);
    out.insert(X_USER_DATA, header_value(X_USER_DATA, &identity.to_json())?);
    Ok(out)
}

// from_bytes keeps UTF-8 (obs-text) but rejects control characters
fn header_value(header: &'static str, value: &str) -> Result<HeaderValue, PropagationError> {
    HeaderValue::from_bytes(value.as_bytes())
        .map_err(|_| PropagationError::InvalidHeaderValue { header })
}

/// Verifies the request's credential once and rewrites its identity headers.
#[derive(Clone, Debug)]
pub struct IdentityPropagator {
    verifier: Arc<TokenVerifier>,
}

impl IdentityPropagator {
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Header map for `headers` given an explicit credential source.
    ///
    /// Returns the state that was actually propagated: a header failure downgrades it
    /// to `Anonymous` so extensions and headers never disagree.
    pub fn propagate_headers(
        &self,
        headers: &HeaderMap,
        source: &dyn CredentialSource,
    ) -> (HeaderMap, AuthState) {
        let credential = source.credential();
        let state = self.verifier.verify(credential.as_deref());

        match identity_headers(headers, &state) {
            Ok(out) => (out, state),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    user_id = %state.identity().map(Identity::id).unwrap_or_default(),
                    "identity propagation failed; forwarding as anonymous"
                );
                (anonymous_headers(headers), AuthState::Anonymous)
            }
        }
    }

    /// Augmented request: new header map from the `token` cookie, `AuthState` in extensions.
    pub fn propagate<B>(&self, req: Request<B>) -> Request<B> {
        let (mut parts, body) = req.into_parts();

        let (headers, state) =
            self.propagate_headers(&parts.headers, &CookieCredential::new(&parts.headers));

        parts.headers = headers;
        parts.extensions.insert(state);
        Request::from_parts(parts, body)
    }
}
