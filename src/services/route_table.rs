/*
 * Responsibility
 * - ストアフロントの URL をクラス (auth / admin / protected / public) に分類する
 * - リダイレクト先の定数
 *
 * Notes
 * - 判定はセグメント単位の前方一致: `/admin/orders/123` は admin、`/administrator` は public
 * - 許可/拒否の判断は middleware::auth::guard 側の責務
 */

pub const AUTH_ROUTES: &[&str] = &["/login", "/signup", "/forgot-password"];
pub const ADMIN_ROUTES: &[&str] = &["/admin", "/admin/product/create", "/admin/orders"];
pub const PROTECTED_ROUTES: &[&str] = &["/account", "/track"];

/// Where unauthenticated visitors of guarded pages are sent.
pub const DEFAULT_LOGIN_REDIRECT: &str = "/login";
/// Landing page for admins entering the auth pages.
pub const ADMIN_REDIRECT: &str = "/admin";
/// Landing page for signed-in non-admins.
pub const HOME: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Auth,
    Admin,
    Protected,
    Public,
}

pub fn classify(path: &str) -> RouteClass {
    if is_auth_route(path) {
        RouteClass::Auth
    } else if is_admin_route(path) {
        RouteClass::Admin
    } else if is_protected_route(path) {
        RouteClass::Protected
    } else {
        RouteClass::Public
    }
}

pub fn is_auth_route(path: &str) -> bool {
    matches_any(AUTH_ROUTES, path)
}

pub fn is_admin_route(path: &str) -> bool {
    matches_any(ADMIN_ROUTES, path)
}

pub fn is_protected_route(path: &str) -> bool {
    matches_any(PROTECTED_ROUTES, path)
}

fn matches_any(table: &[&str], path: &str) -> bool {
    let path = normalize(path);
    table.iter().any(|entry| matches_prefix(entry, path))
}

fn matches_prefix(entry: &str, path: &str) -> bool {
    match path.strip_prefix(entry) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

// "/account/" -> "/account", "/" stays "/"
fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
