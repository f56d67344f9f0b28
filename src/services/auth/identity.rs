use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Role applied when the token carries no usable `role` claim.
pub const DEFAULT_ROLE: &str = "user";
pub const ADMIN_ROLE: &str = "admin";

/// Verified claim set of the current user.
///
/// - All decoded claims are kept as-is so `x-user-data` can pass them through verbatim.
/// - Only `TokenVerifier` builds this from a token; tests may build it from a map directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    claims: Map<String, Value>,
}

impl Identity {
    pub fn from_claims(claims: Map<String, Value>) -> Self {
        Self { claims }
    }

    /// `id` claim stringified (numbers are common here). Empty when absent.
    pub fn id(&self) -> String {
        self.claims.get("id").map(stringify).unwrap_or_default()
    }

    pub fn email(&self) -> String {
        self.claims.get("email").map(stringify).unwrap_or_default()
    }

    pub fn role(&self) -> String {
        match self.claims.get("role").map(stringify) {
            Some(role) if !role.is_empty() => role,
            _ => DEFAULT_ROLE.to_string(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == ADMIN_ROLE
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.claims.get("exp")?.as_i64()?;
        DateTime::from_timestamp(exp, 0)
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    /// JSON text of every claim, as carried in `x-user-data`.
    pub fn to_json(&self) -> String {
        Value::Object(self.claims.clone()).to_string()
    }
}

// null -> "", string -> as-is, anything else -> its JSON text
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Outcome of credential verification.
///
/// Call sites decide what "anonymous" means for them; verification itself never errors out.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    Authenticated(Identity),
    #[default]
    Anonymous,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Anonymous => None,
        }
    }
}
