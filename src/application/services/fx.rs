//! FX rate fetching and snapshotting
//!
//! Rates come from a configurable exchange-rate API and are snapshotted per
//! (base, quote, date). Conversions for historical transactions always go
//! through the snapshot taken for the transaction date, never the current
//! rate.

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::{AppError, AppResult};
use crate::model::fx::FxRate;
use crate::storage::fx_store::FxStore;
use chrono::{NaiveDate, Utc};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, Deserialize)]
struct RatesResponse {
    result: String,
    rates: HashMap<String, f64>,
}

/// Fetches FX rates and manages per-date snapshots
pub struct FxService {
    config: Arc<Config>,
    http: HttpClient,
}

impl FxService {
    /// Creates a new FX service
    pub fn new(config: Arc<Config>) -> AppResult<Self> {
        let http = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { config, http })
    }

    /// Fetches the current rate for a currency pair from the exchange-rate API
    pub async fn fetch_rate(&self, base: &str, quote: &str) -> AppResult<FxRate> {
        if base == quote {
            return Ok(FxRate {
                base: base.to_string(),
                quote: quote.to_string(),
                rate: 1.0,
                as_of: Utc::now().date_naive(),
                recorded_at: Utc::now(),
            });
        }

        let url = format!(
            "{}/latest/{}",
            self.config.fx_api_url.trim_end_matches('/'),
            base
        );

        debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            error!("FX API request failed with status {}", status);
            return Err(AppError::Unexpected(status));
        }

        let body: RatesResponse = response.json().await?;

        if body.result != "success" {
            error!("FX API returned result: {}", body.result);
            return Err(AppError::FxRateUnavailable {
                base: base.to_string(),
                quote: quote.to_string(),
            });
        }

        let rate = body
            .rates
            .get(quote)
            .copied()
            .ok_or_else(|| AppError::FxRateUnavailable {
                base: base.to_string(),
                quote: quote.to_string(),
            })?;

        Ok(FxRate {
            base: base.to_string(),
            quote: quote.to_string(),
            rate,
            as_of: Utc::now().date_naive(),
            recorded_at: Utc::now(),
        })
    }

    /// Ensures a snapshot exists for a pair on a date, fetching the current
    /// rate only when none was recorded yet
    ///
    /// Returns the snapshot that applies - the existing one when present, so
    /// replays keep their original rate.
    pub async fn snapshot_rate(
        &self,
        store: &FxStore,
        base: &str,
        quote: &str,
        as_of: NaiveDate,
    ) -> AppResult<FxRate> {
        if let Some(existing) = store.get_snapshot(base, quote, as_of).await? {
            debug!("FX snapshot {}/{} @ {} already recorded", base, quote, as_of);
            return Ok(existing);
        }

        let mut rate = self.fetch_rate(base, quote).await?;
        rate.as_of = as_of;
        store.insert_snapshot(&rate).await?;

        info!(
            "Recorded FX snapshot {}/{} @ {} = {}",
            base, quote, as_of, rate.rate
        );
        Ok(rate)
    }

    /// Converts an amount using the snapshot recorded for the transaction date
    ///
    /// Falls back to the most recent earlier snapshot; errors when the pair
    /// has never been snapshotted at or before the date.
    pub async fn convert_at(
        &self,
        store: &FxStore,
        amount: f64,
        base: &str,
        quote: &str,
        as_of: NaiveDate,
    ) -> AppResult<f64> {
        if base == quote {
            return Ok(amount);
        }

        let snapshot = store
            .get_snapshot_at_or_before(base, quote, as_of)
            .await?
            .ok_or_else(|| AppError::FxRateUnavailable {
                base: base.to_string(),
                quote: quote.to_string(),
            })?;

        Ok(snapshot.convert(amount))
    }
}
