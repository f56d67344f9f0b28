/*
 * Responsibility
 * - 付加済みリクエストを上流 (ページレンダラー) に転送し、レスポンスをそのまま返す
 * - レスポンスボディはバッファせずストリームで中継する (画像など大きなアセットもここを通る)
 * - hop-by-hop ヘッダは転送しない
 * - 上流のリダイレクトは追わずにクライアントへ返す
 */
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Uri},
    response::Response,
};
use thiserror::Error;
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

// RFC 9110 7.6.1, plus host (reqwest sets it from the upstream URL)
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
];

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Clone, Debug)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base: Url,
}

impl UpstreamClient {
    pub fn new(base: Url) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self { client, base })
    }

    /// Upstream URL for an inbound URI: base path + request path, request query.
    pub fn target_url(&self, uri: &Uri) -> Url {
        let mut url = self.base.clone();
        let path = format!("{}{}", self.base.path().trim_end_matches('/'), uri.path());
        url.set_path(&path);
        url.set_query(uri.query());
        url
    }

    pub async fn forward(
        &self,
        method: Method,
        uri: &Uri,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<Response, UpstreamError> {
        let url = self.target_url(uri);

        tracing::debug!(%method, %url, "forwarding to upstream");

        let upstream = self
            .client
            .request(method, url)
            .headers(end_to_end(headers))
            .body(body)
            .send()
            .await?;

        let status = upstream.status();
        // Content-Length stays: the body is relayed byte for byte.
        let response_headers = end_to_end(upstream.headers());

        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;
        Ok(response)
    }
}

fn end_to_end(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    for name in HOP_BY_HOP {
        out.remove(*name);
    }
    out
}
