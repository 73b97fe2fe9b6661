//! Service-account authentication for the Sheets API.
//!
//! The key file (`client_secret.json` by default) is loaded once at startup;
//! access tokens are minted on demand by signing an RS256 JWT assertion and
//! exchanging it at the token endpoint, then cached until shortly before
//! expiry.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use quotevend_quotations::{StoreError, StoreResult};

const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Subset of the service-account key file this adapter needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    /// Load and parse the key file. Errors here mean the store never comes
    /// up; the caller decides what to serve in that state.
    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Auth(format!("cannot read credentials {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            StoreError::Auth(format!("cannot parse credentials {}: {e}", path.display()))
        })
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Mints and caches service-account access tokens.
pub struct TokenProvider {
    client_email: String,
    token_uri: String,
    signing_key: EncodingKey,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    /// Validate the private key up front so a malformed key file surfaces at
    /// startup rather than on the first request.
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> StoreResult<Self> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| StoreError::Auth(format!("invalid service-account private key: {e}")))?;

        Ok(Self {
            client_email: key.client_email,
            token_uri: key.token_uri,
            signing_key,
            http,
            cached: Mutex::new(None),
        })
    }

    /// A valid access token, from cache or freshly exchanged.
    pub async fn access_token(&self) -> StoreResult<String> {
        let now = Utc::now();

        if let Ok(cache) = self.cached.lock() {
            if let Some(tok) = cache.as_ref() {
                if tok.expires_at > now {
                    return Ok(tok.value.clone());
                }
            }
        }

        let token = self.exchange(now).await?;

        if let Ok(mut cache) = self.cached.lock() {
            *cache = Some(token.clone());
        }

        Ok(token.value)
    }

    async fn exchange(&self, now: DateTime<Utc>) -> StoreResult<CachedToken> {
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: SCOPE,
            aud: &self.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(60)).timestamp(),
        };

        let assertion = jsonwebtoken::encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.signing_key,
        )
        .map_err(|e| StoreError::Auth(format!("cannot sign token assertion: {e}")))?;

        let response = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Auth(format!("token exchange failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Auth(format!("malformed token response: {e}")))?;

        tracing::debug!(expires_in = token.expires_in, "access token refreshed");

        // Renew 30s early so in-flight requests never carry an expired token.
        Ok(CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in.saturating_sub(30)),
        })
    }
}
