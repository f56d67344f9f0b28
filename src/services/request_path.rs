//! Canonical form of the request path.
//!
//! The path filter, the route classifier and the upstream URL must all see the same path the
//! renderer will route on. `Url::set_path` (and most servers) resolve `..` and decode
//! `%61`-style escapes, so `/x/../admin` or `/%61dmin` would otherwise be classified as
//! public here and served as `/admin` upstream.
//!
//! Rules:
//! - empty segments collapse (`//admin` → `/admin`)
//! - `.` segments drop, `..` segments pop, percent-encoded forms included (`%2e%2e`)
//! - escapes of unreserved characters are decoded (`%61dmin` → `admin`)
//! - an encoded `/` or `\` inside a segment is rejected
//! - a trailing slash is kept

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path segment is not valid percent-encoded UTF-8")]
    InvalidEncoding,
    #[error("encoded path separator in segment")]
    EncodedSeparator,
}

pub fn canonicalize(path: &str) -> Result<String, PathError> {
    let mut segments: Vec<String> = Vec::new();

    for raw in path.split('/') {
        let decoded = urlencoding::decode(raw).map_err(|_| PathError::InvalidEncoding)?;
        if decoded.contains(['/', '\\']) {
            return Err(PathError::EncodedSeparator);
        }

        match decoded.as_ref() {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ if decoded.chars().all(is_unreserved) => segments.push(decoded.into_owned()),
            _ => segments.push(raw.to_string()),
        }
    }

    let mut out = format!("/{}", segments.join("/"));
    let trailing = path.len() > 1 && path.ends_with('/');
    if trailing && out.len() > 1 {
        out.push('/');
    }
    Ok(out)
}

// RFC 3986 2.3
fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}
