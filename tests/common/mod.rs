//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{
    Json, Router,
    body::Body,
    extract::Request,
    http::{HeaderMap, Response},
    response::Redirect,
    routing,
};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Map, Value, json};
use storefront_edge::config::{AppEnv, Config};
use storefront_edge::services::auth::propagate::IDENTITY_HEADERS;
use url::Url;

pub const SECRET: &str = "integration-secret";

pub fn sign(claims: Value, secret: &str) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("sign token")
}

pub fn exp_in(seconds: i64) -> i64 {
    chrono::Utc::now().timestamp() + seconds
}

pub fn customer_token() -> String {
    sign(
        json!({"id": 101, "email": "ana@shop.test", "role": "user", "exp": exp_in(3600)}),
        SECRET,
    )
}

pub fn admin_token() -> String {
    sign(
        json!({"id": 1, "email": "ops@shop.test", "role": "admin", "exp": exp_in(3600)}),
        SECRET,
    )
}

pub fn config(upstream: Url) -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        jwt_secret: SECRET.to_string(),
        token_leeway_seconds: 0,
        upstream_url: upstream,
    }
}

pub fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = axum::http::Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header("cookie", format!("theme=light; token={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Identity headers as a JSON object; every value of a repeated header is kept.
pub fn identity_json(headers: &HeaderMap) -> Value {
    let mut out = Map::new();
    for name in IDENTITY_HEADERS {
        let values: Vec<Value> = headers
            .get_all(name)
            .iter()
            .map(|v| Value::String(String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        if !values.is_empty() {
            out.insert(name.to_string(), Value::Array(values));
        }
    }
    Value::Object(out)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

async fn echo(req: Request) -> Json<Value> {
    Json(json!({
        "method": req.method().as_str(),
        "path": req.uri().path_and_query().map(|p| p.as_str()).unwrap_or("/"),
        "identity": identity_json(req.headers()),
        "cookie": req.headers().get("cookie").and_then(|v| v.to_str().ok()),
        "request_id": req.headers().get("x-request-id").is_some(),
    }))
}

/// Size of the `/large` upstream body; several times the request body limit.
pub const LARGE_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Fake page renderer: echoes what it received, `/moved` redirects, `/large` is a big asset.
pub async fn spawn_upstream() -> Url {
    let app = Router::new()
        .route("/moved", routing::get(|| async { Redirect::temporary("/elsewhere") }))
        .route("/large", routing::get(|| async { vec![b'a'; LARGE_BODY_BYTES] }))
        .fallback(echo);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://{addr}")).unwrap()
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
