mod common;

mod model {
    mod test_market;
    mod test_retry;
}

mod services {
    mod test_fx;
    mod test_matching;
    mod test_pricing;
    mod test_valuation;
}

mod transport {
    mod test_alias;
    mod test_shopify;
    mod test_stockx;
    mod test_webhook;
}

mod utils {
    mod test_config;
    mod test_sku;
}
