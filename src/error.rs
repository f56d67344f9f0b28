/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - 認証まわりの失敗はここまで上がってこない (anonymous に落とす)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::services::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("upstream unavailable")]
    BadGateway,

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            AppError::BadGateway => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY"),
            AppError::Config(_) | AppError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL")
            }
        };

        // Config details stay in the logs.
        let message = match &self {
            AppError::Config(_) => AppError::Internal.to_string(),
            _ => self.to_string(),
        };

        let body = ErrorResponseBody {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<UpstreamError> for AppError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::Client(_) => AppError::Internal,
            UpstreamError::Request(_) => AppError::BadGateway,
        }
    }
}
