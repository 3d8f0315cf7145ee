//! Financial calculation utilities

/// Calculates profit and loss from a cost basis and a current/realized value
///
/// # Arguments
/// * `cost_basis` - What was paid for the item (fees included)
/// * `value` - Current market value or realized net proceeds
///
/// # Returns
/// The absolute P/L (positive = profit)
#[must_use]
pub fn calculate_pnl(cost_basis: f64, value: f64) -> f64 {
    value - cost_basis
}

/// Calculates the percentage return over a cost basis
///
/// Returns 0.0 when the cost basis is zero or negative, since a percentage
/// return is meaningless for free or data-error items.
#[must_use]
pub fn calculate_percentage_return(cost_basis: f64, value: f64) -> f64 {
    if cost_basis <= 0.0 {
        return 0.0;
    }
    (value - cost_basis) / cost_basis * 100.0
}
