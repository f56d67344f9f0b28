/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - propagator: TokenVerifier を内包する IdentityPropagator
 *   - upstream: ページレンダラーへの転送クライアント
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::{auth::IdentityPropagator, upstream::UpstreamClient};

#[derive(Clone, Debug)]
pub struct AppState {
    pub propagator: IdentityPropagator,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(propagator: IdentityPropagator, upstream: Arc<UpstreamClient>) -> Self {
        Self {
            propagator,
            upstream,
        }
    }
}
