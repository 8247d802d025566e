use crate::models::TradeRecord;

/// Summary statistics for one flow (exports or imports) over the fetched
/// window.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub total: f64,
}

/// Summary of both flows plus the latest year's balance.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub exports: FlowSummary,
    pub imports: FlowSummary,
    pub latest_year: i32,
    pub latest_balance: f64,
}

/// Compute summary statistics over the fetched records. Returns `None` for
/// an empty window.
pub fn records_summary(records: &[TradeRecord]) -> Option<SeriesSummary> {
    if records.is_empty() {
        return None;
    }
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.year);
    let latest = sorted.last()?;
    Some(SeriesSummary {
        exports: flow_summary(sorted.iter().map(|r| r.exports)),
        imports: flow_summary(sorted.iter().map(|r| r.imports)),
        latest_year: latest.year,
        latest_balance: latest.balance,
    })
}

fn flow_summary(values: impl Iterator<Item = f64>) -> FlowSummary {
    let mut count = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut total = 0.0;
    for v in values {
        count += 1;
        min = min.min(v);
        max = max.max(v);
        total += v;
    }
    FlowSummary {
        count,
        min,
        max,
        mean: if count > 0 { total / count as f64 } else { 0.0 },
        total,
    }
}
