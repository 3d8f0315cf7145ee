use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A currency-conversion rate captured at a point in time
///
/// Snapshots are keyed by (base, quote, as_of date) and are immutable once
/// written, so historical P/L keeps the rate that applied when the
/// transaction happened rather than whatever the rate is today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FxRate {
    /// Base currency (ISO 4217)
    pub base: String,
    /// Quote currency (ISO 4217)
    pub quote: String,
    /// Units of `quote` per unit of `base`
    pub rate: f64,
    /// Date the rate applies to
    pub as_of: NaiveDate,
    /// When the snapshot was recorded
    pub recorded_at: DateTime<Utc>,
}

impl FxRate {
    /// Converts an amount denominated in `base` into `quote` units
    #[must_use]
    pub fn convert(&self, amount: f64) -> f64 {
        amount * self.rate
    }
}
