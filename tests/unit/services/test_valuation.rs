use crate::common::test_item;
use chrono::{TimeZone, Utc};
use resale_desk::application::services::valuation::{
    ValuationReport, render_report_table, value_item,
};
use resale_desk::model::market::{AggregatedPrice, PriceBasis, PriceConfidence, Provider};

fn agg(value: f64) -> AggregatedPrice {
    AggregatedPrice {
        value,
        highest_bid: Some(value - 10.0),
        currency: "USD".to_string(),
        basis: PriceBasis::Priority(Provider::Stockx),
        confidence: PriceConfidence::High,
        sample_size: 2,
        computed_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn values_item_against_aggregated_price() {
    let item = test_item("DD1391-100", "Dunk Low Black White");
    let price = agg(180.0);

    let v = value_item(&item, Some(&price));
    assert_eq!(v.sku, "DD1391-100");
    assert_eq!(v.market_value, Some(180.0));
    assert_eq!(v.unrealized_pnl, Some(60.0));
    assert!((v.return_pct.unwrap() - 50.0).abs() < 1e-9);
    assert_eq!(v.confidence, Some(PriceConfidence::High));
}

#[test]
fn unpriced_item_has_no_pnl() {
    let item = test_item("DD1391-100", "Dunk Low Black White");

    let v = value_item(&item, None);
    assert_eq!(v.market_value, None);
    assert_eq!(v.unrealized_pnl, None);
    assert_eq!(v.return_pct, None);
    assert_eq!(v.confidence, None);
}

#[test]
fn messy_sku_is_canonicalized_in_valuation() {
    let item = test_item("dd1391 100", "Dunk Low Black White");
    let v = value_item(&item, None);
    assert_eq!(v.sku, "DD1391-100");
}

#[test]
fn report_table_renders_rows_and_totals() {
    let item = test_item("DD1391-100", "Dunk Low Black White");
    let valuation = value_item(&item, Some(&agg(180.0)));

    let report = ValuationReport {
        total_cost: valuation.cost_basis,
        total_value: 180.0,
        total_unrealized: 60.0,
        total_realized: 0.0,
        items: vec![valuation],
        realized: vec![],
    };

    let rendered = render_report_table(&report).to_string();
    assert!(rendered.contains("Dunk Low Black White"));
    assert!(rendered.contains("DD1391-100"));
    assert!(rendered.contains("TOTAL"));
    assert!(rendered.contains("+60.00"));
    assert!(rendered.contains("high"));
}
