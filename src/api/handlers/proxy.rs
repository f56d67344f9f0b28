/*
 * Responsibility
 * - fallback: edge が処理しないリクエストを上流へ転送する
 * - ここに来る時点でパスは正規化済み、ヘッダは identity middleware によって書き換え済み
 * - ボディ上限超過は Content-Length の有無に関わらず 413
 */
use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::InvalidRequest(rejection.body_text())
        }
    })?;

    state
        .upstream
        .forward(method, &uri, &headers, body)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, uri = %uri, "upstream request failed");
            AppError::from(err)
        })
}
