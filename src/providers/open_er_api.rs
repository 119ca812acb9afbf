use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyCode;
use crate::core::rates::{FetchError, RateProvider, RateSnapshot, RateTable};

/// Rate source backed by the open access endpoint of exchangerate-api.com.
pub struct OpenErApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OpenErApiProvider {
    pub fn new(base_url: &str) -> reqwest::Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("fxpair/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(OpenErApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: String,
    #[serde(default)]
    rates: HashMap<String, f64>,
    time_last_update_utc: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

#[async_trait]
impl RateProvider for OpenErApiProvider {
    #[instrument(name = "OpenErApiFetch", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: CurrencyCode) -> Result<RateSnapshot, FetchError> {
        let url = format!("{}/v6/latest/{}", self.base_url, base.code());
        debug!("Requesting exchange rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request { base, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { base, status });
        }

        let text = response
            .text()
            .await
            .map_err(|source| FetchError::Request { base, source })?;

        let data: LatestRatesResponse =
            serde_json::from_str(&text).map_err(|source| FetchError::Parse { base, source })?;

        if data.result != "success" {
            return Err(FetchError::Provider {
                base,
                result: data.result,
                reason: data.error_type.unwrap_or_else(|| "unknown".to_string()),
            });
        }

        debug!(
            rates = data.rates.len(),
            updated = ?data.time_last_update_utc,
            "Received exchange rates"
        );

        Ok(RateSnapshot {
            table: RateTable::new(base, data.rates),
            last_updated: data.time_last_update_utc,
        })
    }
}
