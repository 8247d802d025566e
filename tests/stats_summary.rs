use tradeflow_rs::models::TradeRecord;
use tradeflow_rs::stats::records_summary;

fn record(year: i32, exports: f64, imports: f64) -> TradeRecord {
    TradeRecord {
        year,
        exports,
        imports,
        balance: exports - imports,
    }
}

#[test]
fn summary_covers_both_flows_and_latest_balance() {
    // Unsorted on purpose: the summary sorts before picking "latest".
    let records = vec![
        record(2020, 400.0, 100.0),
        record(2018, 100.0, 300.0),
        record(2019, 250.0, 200.0),
    ];
    let summary = records_summary(&records).unwrap();

    assert_eq!(summary.exports.count, 3);
    assert_eq!(summary.exports.min, 100.0);
    assert_eq!(summary.exports.max, 400.0);
    assert!((summary.exports.mean - 250.0).abs() < 1e-9);
    assert_eq!(summary.exports.total, 750.0);

    assert_eq!(summary.imports.min, 100.0);
    assert_eq!(summary.imports.max, 300.0);

    assert_eq!(summary.latest_year, 2020);
    assert_eq!(summary.latest_balance, 300.0);
}

#[test]
fn empty_window_has_no_summary() {
    assert!(records_summary(&[]).is_none());
}
