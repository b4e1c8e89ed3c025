//! Bearer-token verification against the Firebase identity provider.
//!
//! Provides the `TokenVerifier` capability used by the authentication
//! middleware, plus the production implementation that validates Firebase ID
//! tokens (RS256) against Google's published securetoken signing keys.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{ServiceError, ServiceResult};

const JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Verified identity claims attached to a request after authentication.
///
/// Tokens without an email claim are rejected outright; every ownership
/// decision in this service keys on the email.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (Firebase user id)
    pub sub: String,
    /// Verified email address
    pub email: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// Capability for turning a bearer token into verified claims.
///
/// Injected as a trait object so tests can substitute a deterministic
/// verifier without reaching Google.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify_token(&self, token: &str) -> ServiceResult<Claims>;
}

/// Shared handle passed to the router via an `Extension` layer.
pub type SharedVerifier = Arc<dyn TokenVerifier>;

/// One RSA signing key from the securetoken JWK set.
#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// Validates Firebase ID tokens against Google's securetoken JWKS.
///
/// Keys are fetched lazily and cached by `kid`; an unknown `kid` triggers one
/// refresh before the token is rejected, which covers Google's key rotation.
pub struct FirebaseTokenVerifier {
    project_id: String,
    http: reqwest::Client,
    keys: RwLock<HashMap<String, Jwk>>,
}

impl FirebaseTokenVerifier {
    pub fn new(project_id: impl Into<String>) -> Self {
        FirebaseTokenVerifier {
            project_id: project_id.into(),
            http: reqwest::Client::new(),
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// Looks up the signing key for `kid`, refreshing the cache on a miss.
    async fn signing_key(&self, kid: &str) -> ServiceResult<Jwk> {
        if let Some(key) = self.keys.read().await.get(kid) {
            return Ok(key.clone());
        }

        self.refresh_keys().await?;

        self.keys
            .read()
            .await
            .get(kid)
            .cloned()
            .ok_or_else(|| ServiceError::unauthorized("unauthorized access"))
    }

    async fn refresh_keys(&self) -> ServiceResult<()> {
        let jwks: JwkSet = self
            .http
            .get(JWKS_URL)
            .send()
            .await
            .map_err(|_| ServiceError::unauthorized("unauthorized access"))?
            .json()
            .await
            .map_err(|_| ServiceError::unauthorized("unauthorized access"))?;

        let mut keys = self.keys.write().await;
        keys.clear();
        for key in jwks.keys {
            keys.insert(key.kid.clone(), key);
        }

        Ok(())
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[format!(
            "https://securetoken.google.com/{}",
            self.project_id
        )]);
        validation
    }
}

#[async_trait]
impl TokenVerifier for FirebaseTokenVerifier {
    async fn verify_token(&self, token: &str) -> ServiceResult<Claims> {
        // Every failure collapses to the same opaque 401; internal detail
        // must not leak to the caller.
        let unauthorized = || ServiceError::unauthorized("unauthorized access");

        let header = decode_header(token).map_err(|_| unauthorized())?;
        let kid = header.kid.ok_or_else(unauthorized)?;

        let jwk = self.signing_key(&kid).await?;
        let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e).map_err(|_| unauthorized())?;

        decode::<Claims>(token, &key, &self.validation())
            .map(|data| data.claims)
            .map_err(|_| unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwk_set_parses_google_payload_shape() {
        let jwks: JwkSet = serde_json::from_str(
            r#"{"keys":[
                {"kid":"abc","n":"modulus","e":"AQAB","alg":"RS256","kty":"RSA","use":"sig"},
                {"kid":"def","n":"modulus2","e":"AQAB","alg":"RS256","kty":"RSA","use":"sig"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(jwks.keys.len(), 2);
        assert_eq!(jwks.keys[0].kid, "abc");
        assert_eq!(jwks.keys[1].e, "AQAB");
    }

    #[test]
    fn validation_pins_issuer_and_audience() {
        let verifier = FirebaseTokenVerifier::new("athletix-dev");
        let validation = verifier.validation();

        assert!(
            validation
                .iss
                .as_ref()
                .unwrap()
                .contains("https://securetoken.google.com/athletix-dev")
        );
        assert!(validation.aud.as_ref().unwrap().contains("athletix-dev"));
    }

    #[test]
    fn claims_require_an_email() {
        let missing_email = serde_json::json!({
            "sub": "user-1",
            "exp": 2_000_000_000usize,
            "iat": 1_000_000_000usize
        });
        assert!(serde_json::from_value::<Claims>(missing_email).is_err());
    }
}
