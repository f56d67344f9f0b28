/*
 * Responsibility
 * - GET /_edge/session
 * - identity middleware が検証した結果を JSON で返す (クライアント側の表示切替用)
 */
use axum::Json;

use crate::api::dto::session::SessionResponse;
use crate::api::extractors::Viewer;

pub async fn session(Viewer(state): Viewer) -> Json<SessionResponse> {
    Json(SessionResponse::from(&state))
}
