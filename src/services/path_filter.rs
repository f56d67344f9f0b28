//! Which paths go through identity propagation and the route guard.
//!
//! Static build output, the image optimizer, the favicon and image files are served
//! straight through; everything else is a page or data request.

const EXCLUDED_PREFIXES: &[&str] = &["_next/static", "_next/image", "favicon.ico"];
const IMAGE_EXTENSIONS: &[&str] = &[".svg", ".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// `true` if identity should be attached to a request for `path`. Case-sensitive.
pub fn applies(path: &str) -> bool {
    let relative = path.strip_prefix('/').unwrap_or(path);

    if EXCLUDED_PREFIXES.iter().any(|p| relative.starts_with(p)) {
        return false;
    }

    !IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
