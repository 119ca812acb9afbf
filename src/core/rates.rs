//! Exchange rate abstractions and core types

use crate::core::currency::CurrencyCode;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Multipliers relative to a single base currency.
///
/// Keys are the provider's currency codes, which cover far more than the
/// supported [`CurrencyCode`] set. A table is only meaningful together with
/// the base it was fetched for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub base: CurrencyCode,
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(base: CurrencyCode, rates: HashMap<String, f64>) -> Self {
        Self { base, rates }
    }

    pub fn empty(base: CurrencyCode) -> Self {
        Self::new(base, HashMap::new())
    }

    pub fn get(&self, code: CurrencyCode) -> Option<f64> {
        self.rates.get(code.code()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// A fetched rate table plus the provider's last-update stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub table: RateTable,
    pub last_updated: Option<String>,
}

impl RateSnapshot {
    pub fn empty(base: CurrencyCode) -> Self {
        Self {
            table: RateTable::empty(base),
            last_updated: None,
        }
    }

    /// Provider stamp as a time, e.g. from `Sat, 17 Oct 2026 00:02:31 +0000`.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated.as_deref().and_then(parse_provider_timestamp)
    }
}

/// Parses an RFC 2822 provider stamp. The stamp is opaque, so failure is not an error.
pub fn parse_provider_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(stamp)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request error: {source} for base currency: {base}")]
    Request {
        base: CurrencyCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: {status} for base currency: {base}")]
    Status {
        base: CurrencyCode,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse JSON response for {base}: {source}")]
    Parse {
        base: CurrencyCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("Provider reported {result} for base currency {base}: {reason}")]
    Provider {
        base: CurrencyCode,
        result: String,
        reason: String,
    },
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, base: CurrencyCode) -> Result<RateSnapshot, FetchError>;
}
