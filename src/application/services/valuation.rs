//! Inventory valuation and profit/loss reporting
//!
//! Marks in-stock inventory to the latest aggregated market price and
//! computes realized P/L from sales, converting foreign-currency proceeds
//! through the FX snapshot taken for the sale date.

use crate::application::services::fx::FxService;
use crate::application::services::pricing::aggregate_prices;
use crate::config::Config;
use crate::error::AppResult;
use crate::model::inventory::{InventoryItem, InventoryStatus, Sale};
use crate::model::market::{AggregatedPrice, PriceConfidence};
use crate::storage::fx_store::FxStore;
use crate::storage::inventory_store::InventoryStore;
use crate::storage::market_store::MarketStore;
use crate::utils::finance::{calculate_percentage_return, calculate_pnl};
use crate::utils::sku::normalize_sku_for_matching;
use chrono::Utc;
use prettytable::{Table, row};
use std::sync::Arc;
use tracing::{info, warn};

/// Mark-to-market view of one inventory item
#[derive(Debug, Clone)]
pub struct ItemValuation {
    /// Inventory item id
    pub inventory_id: String,
    /// Product name
    pub name: String,
    /// Canonical SKU used for pricing lookups
    pub sku: String,
    /// Acquisition cost
    pub cost_basis: f64,
    /// Current market value, when a price is available
    pub market_value: Option<f64>,
    /// Unrealized P/L against cost basis
    pub unrealized_pnl: Option<f64>,
    /// Unrealized return percentage
    pub return_pct: Option<f64>,
    /// Confidence of the underlying aggregated price
    pub confidence: Option<PriceConfidence>,
}

/// Realized P/L for one completed sale
#[derive(Debug, Clone)]
pub struct RealizedEntry {
    /// Inventory item id
    pub inventory_id: String,
    /// Marketplace the sale happened on
    pub platform: String,
    /// Net proceeds converted to the base currency
    pub net_proceeds: f64,
    /// Cost basis in the base currency
    pub cost_basis: f64,
    /// Realized P/L
    pub realized_pnl: f64,
}

/// Full valuation report
#[derive(Debug, Clone, Default)]
pub struct ValuationReport {
    /// Per-item mark-to-market rows
    pub items: Vec<ItemValuation>,
    /// Realized P/L rows
    pub realized: Vec<RealizedEntry>,
    /// Sum of cost bases for unsold items
    pub total_cost: f64,
    /// Sum of market values where available
    pub total_value: f64,
    /// Sum of unrealized P/L where available
    pub total_unrealized: f64,
    /// Sum of realized P/L
    pub total_realized: f64,
}

/// Marks one item to an aggregated price
///
/// Pure helper; `None` price produces a row with no value and no P/L.
#[must_use]
pub fn value_item(item: &InventoryItem, price: Option<&AggregatedPrice>) -> ItemValuation {
    let sku = normalize_sku_for_matching(&item.sku).unwrap_or_else(|| item.sku.clone());
    let market_value = price.map(|p| p.value);

    ItemValuation {
        inventory_id: item.id.clone(),
        name: item.name.clone(),
        sku,
        cost_basis: item.cost_basis,
        market_value,
        unrealized_pnl: market_value.map(|v| calculate_pnl(item.cost_basis, v)),
        return_pct: market_value.map(|v| calculate_percentage_return(item.cost_basis, v)),
        confidence: price.map(|p| p.confidence),
    }
}

/// Builds valuation and P/L reports from the stores
pub struct ValuationService {
    inventory: InventoryStore,
    market: MarketStore,
    fx_store: FxStore,
    fx: FxService,
    base_currency: String,
}

impl ValuationService {
    /// Creates a new valuation service
    pub fn new(
        config: Arc<Config>,
        inventory: InventoryStore,
        market: MarketStore,
        fx_store: FxStore,
        fx: FxService,
    ) -> Self {
        Self {
            inventory,
            market,
            fx_store,
            fx,
            base_currency: config.base_currency.clone(),
        }
    }

    /// Builds the full report: mark-to-market for unsold items plus realized
    /// P/L from sales
    pub async fn build_report(&self) -> AppResult<ValuationReport> {
        let mut report = ValuationReport::default();

        let mut unsold = self
            .inventory
            .list_items_by_status(InventoryStatus::InStock)
            .await?;
        unsold.extend(
            self.inventory
                .list_items_by_status(InventoryStatus::Listed)
                .await?,
        );

        for item in &unsold {
            let sku = normalize_sku_for_matching(&item.sku).unwrap_or_else(|| item.sku.clone());
            let quotes = self.market.latest_quotes(&sku).await?;
            let price = match aggregate_prices(&quotes, item.category) {
                Some(p) if p.currency != self.base_currency => {
                    match self.price_in_base(p).await {
                        Ok(p) => Some(p),
                        Err(e) => {
                            warn!("Dropping price for {} from valuation: {}", sku, e);
                            None
                        }
                    }
                }
                other => other,
            };
            let valuation = value_item(item, price.as_ref());

            report.total_cost += valuation.cost_basis;
            if let Some(v) = valuation.market_value {
                report.total_value += v;
            }
            if let Some(p) = valuation.unrealized_pnl {
                report.total_unrealized += p;
            }
            report.items.push(valuation);
        }

        let sales = self.inventory.list_sales().await?;
        for sale in &sales {
            match self.realized_entry(sale).await {
                Ok(entry) => {
                    report.total_realized += entry.realized_pnl;
                    report.realized.push(entry);
                }
                Err(e) => {
                    warn!("Skipping sale {} in realized P/L: {}", sale.id, e);
                }
            }
        }

        info!(
            "Valuation report: {} items marked, {} sales realized",
            report.items.len(),
            report.realized.len()
        );
        Ok(report)
    }

    /// Converts an aggregated price into the base reporting currency
    ///
    /// Uses (and records) today's FX snapshot, so the totals in one report
    /// are all denominated in `base_currency`.
    async fn price_in_base(&self, mut price: AggregatedPrice) -> AppResult<AggregatedPrice> {
        let rate = self
            .fx
            .snapshot_rate(
                &self.fx_store,
                &price.currency,
                &self.base_currency,
                Utc::now().date_naive(),
            )
            .await?;

        price.value = rate.convert(price.value);
        price.highest_bid = price.highest_bid.map(|b| rate.convert(b));
        price.currency = self.base_currency.clone();
        Ok(price)
    }

    /// Computes realized P/L for one sale in the base currency
    async fn realized_entry(&self, sale: &Sale) -> AppResult<RealizedEntry> {
        let item = self
            .inventory
            .get_item(&sale.inventory_id)
            .await?
            .ok_or_else(|| {
                crate::error::AppError::NotFound(format!("inventory item {}", sale.inventory_id))
            })?;

        let net_proceeds = self
            .fx
            .convert_at(
                &self.fx_store,
                sale.effective_net(),
                &sale.currency,
                &self.base_currency,
                sale.sold_at.date_naive(),
            )
            .await?;

        let cost_basis = self
            .fx
            .convert_at(
                &self.fx_store,
                item.cost_basis,
                &item.cost_currency,
                &self.base_currency,
                item.acquired_at.date_naive(),
            )
            .await?;

        Ok(RealizedEntry {
            inventory_id: item.id,
            platform: sale.platform.clone(),
            net_proceeds,
            cost_basis,
            realized_pnl: calculate_pnl(cost_basis, net_proceeds),
        })
    }
}

/// Renders a valuation report as a printable table
#[must_use]
pub fn render_report_table(report: &ValuationReport) -> Table {
    let mut table = Table::new();
    table.set_titles(row![
        "Item", "SKU", "Cost", "Value", "Unrealized", "Return %", "Confidence"
    ]);

    for item in &report.items {
        table.add_row(row![
            item.name,
            item.sku,
            format!("{:.2}", item.cost_basis),
            item.market_value
                .map_or_else(|| "-".to_string(), |v| format!("{v:.2}")),
            item.unrealized_pnl
                .map_or_else(|| "-".to_string(), |v| format!("{v:+.2}")),
            item.return_pct
                .map_or_else(|| "-".to_string(), |v| format!("{v:+.1}%")),
            match item.confidence {
                Some(PriceConfidence::High) => "high",
                Some(PriceConfidence::Low) => "low",
                None => "-",
            }
        ]);
    }

    table.add_row(row![
        "TOTAL",
        "",
        format!("{:.2}", report.total_cost),
        format!("{:.2}", report.total_value),
        format!("{:+.2}", report.total_unrealized),
        "",
        ""
    ]);

    table
}
