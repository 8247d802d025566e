//! Trade evolution transform: raw records to a chart-ready time series.

use crate::models::EvolutionPayload;

/// Ordered time series for the evolution bar chart: three parallel
/// sequences, one slot per record, ascending by year.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionSeries {
    /// Year labels, as delivered by the API (not reformatted).
    pub labels: Vec<i32>,
    pub exports: Vec<f64>,
    pub imports: Vec<f64>,
}

impl EvolutionSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Normalize an evolution payload into a series.
///
/// Returns `None` when there are no records — "nothing to draw", not an
/// error. Records are stably sorted ascending by year (the API does not
/// guarantee order); output order matches the sorted input exactly.
pub fn to_series(payload: &EvolutionPayload) -> Option<EvolutionSeries> {
    if payload.records.is_empty() {
        return None;
    }
    let mut records = payload.records.clone();
    records.sort_by_key(|r| r.year);
    Some(EvolutionSeries {
        labels: records.iter().map(|r| r.year).collect(),
        exports: records.iter().map(|r| r.exports).collect(),
        imports: records.iter().map(|r| r.imports).collect(),
    })
}
