//! Where the session credential comes from.
//!
//! The propagator asks a `CredentialSource` for the token instead of reaching into the
//! request itself, so tests can hand it a fixed value.

use axum::http::{HeaderMap, header};

/// Cookie that carries the session JWT.
pub const TOKEN_COOKIE: &str = "token";

pub trait CredentialSource {
    /// The credential, if one is present and non-empty.
    fn credential(&self) -> Option<String>;
}

/// Reads `token` from the `Cookie` header(s) of a request.
pub struct CookieCredential<'a> {
    headers: &'a HeaderMap,
}

impl<'a> CookieCredential<'a> {
    pub fn new(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }
}

impl CredentialSource for CookieCredential<'_> {
    fn credential(&self) -> Option<String> {
        find_cookie(self.headers, TOKEN_COOKIE)
    }
}

/// A credential known up front (or known to be absent).
pub struct StaticCredential(pub Option<String>);

impl CredentialSource for StaticCredential {
    fn credential(&self) -> Option<String> {
        self.0.clone().filter(|v| !v.is_empty())
    }
}

/// First non-empty cookie named `name` across every `Cookie` header.
pub fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| key.trim() == name && !value.trim().is_empty())
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
}
