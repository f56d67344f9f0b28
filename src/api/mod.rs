/*
 * Responsibility
 * - edge 自身が応答するエンドポイント (/_edge/ 以下) と、それ以外を上流へ流す fallback
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
