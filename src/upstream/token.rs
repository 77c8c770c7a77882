//! Token Manager
//!
//! Holds the single process-wide upstream access token and refreshes it
//! lazily through the OAuth2 client-credentials grant.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use crate::clock::Clock;
use crate::error::{GatewayError, Result};

/// Token handed out when running without credentials.
pub const DEV_TOKEN: &str = "dev-token";

/// Safety margin subtracted from the upstream-declared lifetime.
const EXPIRY_MARGIN_SECS: u64 = 300;

/// Lifetime assumed when the upstream omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: u64 = 1800;

const TOKEN_TIMEOUT: Duration = Duration::from_secs(10);

// == Token ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    /// Unix milliseconds after which the token must not be reused
    pub expires_at: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Clone)]
enum Credentials {
    Offline,
    Live {
        client: Client,
        token_url: String,
        client_id: String,
        client_secret: String,
        scope: String,
    },
}

// == Token Manager ==
/// Shared access-token slot.
///
/// Concurrent callers that all miss may each run an exchange; the last one
/// to finish wins the slot. Exchanges are idempotent, so this is accepted.
pub struct TokenManager {
    credentials: Credentials,
    slot: RwLock<Option<Token>>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
    exchanges: AtomicU64,
}

impl TokenManager {
    /// Manager that always returns [`DEV_TOKEN`] without network access.
    pub fn offline(clock: Arc<dyn Clock>) -> Self {
        Self {
            credentials: Credentials::Offline,
            slot: RwLock::new(None),
            clock,
            timeout: TOKEN_TIMEOUT,
            exchanges: AtomicU64::new(0),
        }
    }

    /// Manager that exchanges `client_id`/`client_secret` at
    /// `{api_base_url}/connect/oauth2/token`.
    pub fn live(
        client: Client,
        api_base_url: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials: Credentials::Live {
                client,
                token_url: format!("{}/connect/oauth2/token", api_base_url),
                client_id: client_id.into(),
                client_secret: client_secret.into(),
                scope: scope.into(),
            },
            slot: RwLock::new(None),
            clock,
            timeout: TOKEN_TIMEOUT,
            exchanges: AtomicU64::new(0),
        }
    }

    /// Overrides the exchange timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_offline(&self) -> bool {
        matches!(self.credentials, Credentials::Offline)
    }

    /// Number of credential exchanges performed so far.
    pub fn exchanges(&self) -> u64 {
        self.exchanges.load(Ordering::Relaxed)
    }

    /// Returns a valid access token, exchanging credentials only when the
    /// cached one is missing or expired.
    pub async fn get_token(&self) -> Result<String> {
        let Credentials::Live {
            client,
            token_url,
            client_id,
            client_secret,
            scope,
        } = &self.credentials
        else {
            return Ok(DEV_TOKEN.to_string());
        };

        if let Some(value) = self.cached() {
            return Ok(value);
        }

        self.exchanges.fetch_add(1, Ordering::Relaxed);
        let response = client
            .post(token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", scope.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                error!("Token exchange failed: {}", e);
                GatewayError::UpstreamAuth(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Failed to get token: {} - {}", status, body);
            return Err(GatewayError::UpstreamAuth(format!("{}: {}", status, body)));
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::UpstreamAuth(format!("Invalid token response: {}", e)))?;

        let lifetime = parsed
            .expires_in
            .unwrap_or(DEFAULT_EXPIRES_IN_SECS)
            .saturating_sub(EXPIRY_MARGIN_SECS);
        let token = Token {
            value: parsed.access_token,
            expires_at: expiry_ms(self.clock.now_ms(), lifetime),
        };
        info!("Obtained upstream token valid for {}s", lifetime);

        let value = token.value.clone();
        self.store(token);
        Ok(value)
    }

    fn cached(&self) -> Option<String> {
        let now = self.clock.now_ms();
        let slot = self.slot.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.as_ref()
            .filter(|token| now < token.expires_at)
            .map(|token| token.value.clone())
    }

    fn store(&self, token: Token) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(token);
    }

    /// Current cached token, expired or not.
    pub fn current(&self) -> Option<Token> {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

fn expiry_ms(now_ms: u64, lifetime_secs: u64) -> u64 {
    now_ms.saturating_add(lifetime_secs.saturating_mul(1000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[tokio::test]
    async fn test_offline_returns_sentinel() {
        let manager = TokenManager::offline(Arc::new(ManualClock::new(0)));

        assert!(manager.is_offline());
        assert_eq!(manager.get_token().await.unwrap(), DEV_TOKEN);
        assert_eq!(manager.exchanges(), 0);
        assert!(manager.current().is_none());
    }

    #[test]
    fn test_expiry_saturates_on_huge_lifetime() {
        assert_eq!(expiry_ms(10_000, 1_500), 1_510_000);
        assert_eq!(expiry_ms(10_000, u64::MAX), u64::MAX);
    }

    #[tokio::test]
    async fn test_cached_token_served_until_expiry() {
        let clock = Arc::new(ManualClock::new(10_000));
        let manager = TokenManager::live(
            Client::new(),
            "http://127.0.0.1:9",
            "id",
            "secret",
            "product.compact",
            clock.clone(),
        );
        manager.store(Token {
            value: "cached".to_string(),
            expires_at: 20_000,
        });

        assert_eq!(manager.get_token().await.unwrap(), "cached");
        clock.advance_ms(9_999);
        assert_eq!(manager.get_token().await.unwrap(), "cached");
        assert_eq!(manager.exchanges(), 0);
    }
}
