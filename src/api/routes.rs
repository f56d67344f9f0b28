/*
 * Responsibility
 * - edge の URL 構造を定義
 * - /_edge/health, /_edge/session 以外はすべて上流 (ページレンダラー) へ転送
 */
use axum::{Router, extract::DefaultBodyLimit, routing::get};

use crate::api::handlers::{health::health, proxy::forward, session::session};
use crate::middleware::http::BODY_LIMIT_BYTES;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/_edge/health", get(health))
        .route("/_edge/session", get(session))
        .fallback(forward)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}
