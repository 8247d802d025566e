//! Tests against the live trade-data API. Opt in with:
//! `cargo test --features online`
#![cfg(feature = "online")]

use tradeflow_rs::{Client, YearRange};

#[test]
fn live_trade_evolution_fetch() {
    let client = Client::default();
    let payload = client
        .fetch_trade_evolution("CHE", "EU27", YearRange { start: 2010, end: 2020 })
        .expect("live evolution fetch");
    assert!(!payload.records.is_empty());
    assert!(payload.records.iter().any(|r| r.year >= 2010));
}

#[test]
fn live_goods_treemap_fetch() {
    let client = Client::default();
    let payload = client
        .fetch_goods_treemap("CHE", "EU27", 2020)
        .expect("live goods fetch");
    let root = payload.treemap.expect("treemap root");
    assert!(!root.children.is_empty());
}
