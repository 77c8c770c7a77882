//! Live upstream client
//!
//! Thin request executor over reqwest. No caching, filtering or retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use super::{Endpoint, Filters, Upstream};
use crate::error::{GatewayError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Value,
}

/// Client for the upstream REST API.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpUpstream {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        filters: &Filters,
        token: &str,
    ) -> Result<Vec<Value>> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(filters.pairs())
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} error: {} - {}", endpoint.path(), status, body);
            return Err(GatewayError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope = response.json().await?;
        Ok(match envelope.data {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            single => vec![single],
        })
    }
}
