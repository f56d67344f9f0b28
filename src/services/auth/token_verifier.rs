use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::services::auth::identity::{AuthState, Identity};

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("no verification secret configured")]
    MissingSecret,
    #[error("empty token")]
    EmptyToken,
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// HMAC (HS256/384/512) verifier for the session cookie.
///
/// - The secret is injected at construction; an empty secret builds a verifier that rejects
///   every token instead of accepting them vacuously.
/// - Key material is not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("has_key", &self.decoding_key.is_some())
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let decoding_key = if secret.is_empty() {
            None
        } else {
            Some(DecodingKey::from_secret(secret.as_bytes()))
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = leeway_seconds;
        validation.validate_nbf = true;
        // Tokens are minted by the storefront API without an audience.
        validation.validate_aud = false;

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn has_secret(&self) -> bool {
        self.decoding_key.is_some()
    }

    /// Verify signature + `exp`/`nbf` and return every claim.
    pub fn try_verify(&self, token: &str) -> Result<Identity, VerifyError> {
        let key = self.decoding_key.as_ref().ok_or(VerifyError::MissingSecret)?;

        let token = token.trim();
        if token.is_empty() {
            return Err(VerifyError::EmptyToken);
        }

        let data = jsonwebtoken::decode::<Map<String, Value>>(token, key, &self.validation)?;
        Ok(Identity::from_claims(data.claims))
    }

    /// Entry point for middleware: absent or invalid credentials both end up `Anonymous`.
    pub fn verify(&self, credential: Option<&str>) -> AuthState {
        let Some(token) = credential else {
            return AuthState::Anonymous;
        };

        match self.try_verify(token) {
            Ok(identity) => AuthState::Authenticated(identity),
            Err(err) => {
                tracing::debug!(error = %err, "session token rejected");
                AuthState::Anonymous
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "test-secret";

    fn sign(claims: Value, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("sign token")
    }

    fn in_an_hour() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn valid_token_yields_identity() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let token = sign(
            json!({"id": 7, "email": "kim@shop.test", "role": "admin", "exp": in_an_hour()}),
            SECRET,
        );

        let identity = verifier.try_verify(&token).expect("verify");
        assert_eq!(identity.id(), "7");
        assert_eq!(identity.email(), "kim@shop.test");
        assert!(identity.is_admin());
    }

    #[test]
    fn hs512_is_accepted() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &json!({"id": "u1", "exp": in_an_hour()}),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(verifier.verify(Some(&token)).is_authenticated());
    }

    #[test]
    fn wrong_secret_is_anonymous() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let token = sign(json!({"id": 1, "exp": in_an_hour()}), "other-secret");

        assert!(matches!(verifier.try_verify(&token), Err(VerifyError::Jwt(_))));
        assert_eq!(verifier.verify(Some(&token)), AuthState::Anonymous);
    }

    #[test]
    fn expired_token_is_anonymous() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let exp = chrono::Utc::now().timestamp() - 3600;
        let token = sign(json!({"id": 1, "exp": exp}), SECRET);

        assert_eq!(verifier.verify(Some(&token)), AuthState::Anonymous);
    }

    #[test]
    fn leeway_tolerates_small_skew() {
        let verifier = TokenVerifier::new(SECRET, 120);
        let exp = chrono::Utc::now().timestamp() - 30;
        let token = sign(json!({"id": 1, "exp": exp}), SECRET);

        assert!(verifier.verify(Some(&token)).is_authenticated());
    }

    #[test]
    fn token_without_exp_is_rejected() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let token = sign(json!({"id": 1}), SECRET);

        assert!(verifier.try_verify(&token).is_err());
    }

    #[test]
    fn not_yet_valid_token_is_rejected() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let nbf = chrono::Utc::now().timestamp() + 600;
        let token = sign(json!({"id": 1, "nbf": nbf, "exp": in_an_hour()}), SECRET);

        assert!(!verifier.verify(Some(&token)).is_authenticated());
    }

    #[test]
    fn empty_secret_fails_closed() {
        let verifier = TokenVerifier::new("", 0);
        let token = sign(json!({"id": 1, "exp": in_an_hour()}), SECRET);

        assert!(!verifier.has_secret());
        assert!(matches!(
            verifier.try_verify(&token),
            Err(VerifyError::MissingSecret)
        ));
        assert_eq!(verifier.verify(Some(&token)), AuthState::Anonymous);
    }

    #[test]
    fn garbage_and_absent_are_anonymous() {
        let verifier = TokenVerifier::new(SECRET, 0);

        assert_eq!(verifier.verify(None), AuthState::Anonymous);
        assert_eq!(verifier.verify(Some("")), AuthState::Anonymous);
        assert_eq!(verifier.verify(Some("not.a.jwt")), AuthState::Anonymous);
        assert!(matches!(
            verifier.try_verify("   "),
            Err(VerifyError::EmptyToken)
        ));
    }
}
