/*
 * Responsibility
 * - 環境変数の読み込み (PORT, APP_ENV, JWT_SECRET, UPSTREAM_URL など)
 * - 設定値のバリデーション (UPSTREAM_URL が無ければ起動失敗)
 * - JWT_SECRET は空でも起動する (全トークンが検証失敗になる)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Shared HMAC secret for the `token` cookie. Empty means "reject everything".
    pub jwt_secret: String,
    pub token_leeway_seconds: u64,

    pub upstream_url: Url,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("jwt_secret_set", &!self.jwt_secret.is_empty())
            .field("token_leeway_seconds", &self.token_leeway_seconds)
            .field("upstream_url", &self.upstream_url.as_str())
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_default();

        let token_leeway_seconds = std::env::var("TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let upstream_url =
            std::env::var("UPSTREAM_URL").map_err(|_| ConfigError::Missing("UPSTREAM_URL"))?;
        let upstream_url = parse_upstream_url(&upstream_url)?;

        Ok(Self {
            addr,
            app_env,
            jwt_secret,
            token_leeway_seconds,
            upstream_url,
        })
    }
}

fn parse_upstream_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid("UPSTREAM_URL"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::Invalid("UPSTREAM_URL")),
    }
}
