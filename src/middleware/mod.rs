/*
 * Responsibility
 * - middleware の公開インターフェース
 * - request_path: パスの正規化 (identity / guard より外側)
 * - auth: identity 付加 → route guard
 * - http / security_headers: 全リクエスト共通の横断的関心事
 */
pub mod auth;
pub mod http;
pub mod request_path;
pub mod security_headers;
