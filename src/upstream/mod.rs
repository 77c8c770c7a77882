//! Upstream Module
//!
//! Access to the retail API: the token manager, the live HTTP client and the
//! fixture source used in dev mode. Both sources implement [`Upstream`], so
//! everything above this module is identical in either mode.

mod client;
pub mod fixtures;
mod token;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use client::HttpUpstream;
pub use fixtures::FixtureUpstream;
pub use token::{Token, TokenManager, DEV_TOKEN};

/// Largest page the upstream serves per request.
pub const MAX_PAGE_SIZE: usize = 50;

// == Endpoint ==
/// Data endpoints exposed by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Products,
    Locations,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Products => "/products",
            Endpoint::Locations => "/locations",
        }
    }
}

// == Filters ==
/// Ordered `filter.*` query parameters for one upstream call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pairs: Vec<(&'static str, String)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        self.pairs.push((name, value.to_string()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Parses a numeric filter, ignoring values that do not parse.
    pub fn get_number(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|v| v.parse().ok())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}

// == Upstream Trait ==
/// A source of raw upstream records.
///
/// Implementations map one request to one response; they never cache,
/// filter beyond what the request asks for, or deduplicate.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Fetches the `data` array of `endpoint` for the given filters.
    async fn fetch(&self, endpoint: Endpoint, filters: &Filters, token: &str)
        -> Result<Vec<Value>>;
}
