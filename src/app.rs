/*
 * Responsibility
 * - Config読み込み → 依存生成 (TokenVerifier, UpstreamClient) → Router 組み立て
 * - Middleware の適用順 (外側から):
 *   http → security headers → request_path → identity → guard → routes
 * - ログ: edge は全リクエストの入口なので、認証の降格 (anonymous 扱い) や上流障害は
 *   ここで初期化した tracing にしか残らない
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::{IdentityPropagator, TokenVerifier};
use crate::services::upstream::UpstreamClient;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Rejected tokens and guard redirects log at debug under `storefront_edge`:
    // RUST_LOG=info,storefront_edge=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,storefront_edge=info,tower_http=info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // A panic here takes a storefront request down with it. Development aborts so it
        // gets noticed; production keeps serving the rest of the shop.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<(), AppError> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting storefront edge in {:?} mode on {} -> {}",
        config.app_env,
        config.addr,
        config.upstream_url
    );

    let state = build_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, addr = %config.addr, "failed to bind");
            AppError::Internal
        })?;
    axum::serve(listener, app)
        .await
        .map_err(|_| AppError::Internal)?;

    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState, AppError> {
    let verifier = TokenVerifier::new(&config.jwt_secret, config.token_leeway_seconds);
    if !verifier.has_secret() {
        tracing::warn!("JWT_SECRET is not set; every visitor will be treated as anonymous");
    }

    let upstream = UpstreamClient::new(config.upstream_url.clone())?;

    Ok(AppState::new(
        IdentityPropagator::new(Arc::new(verifier)),
        Arc::new(upstream),
    ))
}

pub fn build_router(state: AppState) -> Router {
    let router = api::routes();
    // Last applied runs first: canonical path → identity headers → guard.
    let router = middleware::auth::guard::apply(router);
    let router = middleware::auth::identity::apply(router, state.clone());
    let router = middleware::request_path::apply(router);
    let router = router.with_state(state);

    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router)
}
