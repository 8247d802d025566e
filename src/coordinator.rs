//! Refresh orchestration: one selection change in, two chart surfaces out.

use crate::api::{Client, FetchError};
use crate::hierarchy::{self, GoodsTree};
use crate::models::{Selection, TradeRecord};
use crate::series::{self, EvolutionSeries};
use crate::viz::Placeholder;
use crate::viz::evolution::EvolutionView;
use crate::viz::hierarchy::HierarchyView;
use anyhow::{Result, anyhow};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

/// Per-dataset outcome of a committed refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    /// The chart was drawn from fresh data.
    Rendered,
    /// Fetch failed or the payload was empty; the surface shows the
    /// dataset's "no data" placeholder instead.
    NoData,
}

/// What a refresh cycle did.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Both surfaces were rebuilt.
    Committed(RefreshReport),
    /// A newer refresh was issued while this one was in flight; its results
    /// were discarded and no surface was touched.
    Superseded,
}

/// Details of a committed refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport {
    pub evolution: ChartState,
    pub goods: ChartState,
    /// The fetched evolution records, for export/summary by callers.
    /// Transient: the coordinator keeps nothing across refreshes.
    pub records: Vec<TradeRecord>,
}

/// Orchestrates one refresh cycle: loading placeholders, two concurrent
/// fetches joined (never raced), then an independent render-or-placeholder
/// decision per dataset.
///
/// Overlapping refreshes are guarded by a monotonically increasing token:
/// only the latest-issued refresh may commit its renders, so a slow stale
/// cycle can never overwrite the charts of a newer one.
pub struct Coordinator {
    pub client: Client,
    pub evolution: EvolutionView,
    pub hierarchy: HierarchyView,
    epoch: AtomicU64,
}

impl Coordinator {
    pub fn new(client: Client, evolution: EvolutionView, hierarchy: HierarchyView) -> Self {
        Self {
            client,
            evolution,
            hierarchy,
            epoch: AtomicU64::new(0),
        }
    }

    /// Run one refresh cycle for `selection`.
    ///
    /// Fetch failures and empty payloads are soft per dataset: the other
    /// chart still renders, and the affected surface gets its placeholder.
    /// Only render/IO errors — the truly unexpected — propagate as `Err`;
    /// callers are expected to fall back to [`Coordinator::render_error_both`].
    pub fn refresh(&self, selection: &Selection) -> Result<RefreshOutcome> {
        let token = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let range = selection.range();

        // Both surfaces flip to loading before any network traffic.
        self.evolution.render_placeholder(Placeholder::Loading)?;
        self.hierarchy.render_placeholder(Placeholder::Loading)?;

        // Two independent fetches; a join, not a race. One failing never
        // cancels the other.
        let (evolution_fetch, goods_fetch) = thread::scope(|s| {
            let evolution = s.spawn(|| {
                self.client
                    .fetch_trade_evolution(&selection.reporter, &selection.partner, range)
            });
            let goods = s.spawn(|| {
                self.client
                    .fetch_goods_treemap(&selection.reporter, &selection.partner, selection.year)
            });
            (evolution.join(), goods.join())
        });
        let evolution_fetch = evolution_fetch.map_err(|_| anyhow!("evolution fetch panicked"))?;
        let goods_fetch = goods_fetch.map_err(|_| anyhow!("goods fetch panicked"))?;

        let (records, evolution_series) = match soften(evolution_fetch, "trade evolution") {
            Some(payload) => {
                let series = series::to_series(&payload);
                (payload.records, series)
            }
            None => (Vec::new(), None),
        };
        let goods_tree: Option<GoodsTree> =
            soften(goods_fetch, "goods treemap").and_then(|p| hierarchy::to_hierarchy(&p));

        // Commit gate: a newer refresh owns the surfaces now.
        if self.epoch.load(Ordering::SeqCst) != token {
            return Ok(RefreshOutcome::Superseded);
        }

        let evolution = self.commit_evolution(evolution_series.as_ref())?;
        let goods = self.commit_goods(goods_tree.as_ref())?;
        Ok(RefreshOutcome::Committed(RefreshReport {
            evolution,
            goods,
            records,
        }))
    }

    fn commit_evolution(&self, series: Option<&EvolutionSeries>) -> Result<ChartState> {
        match series {
            Some(s) => {
                self.evolution.render(s)?;
                Ok(ChartState::Rendered)
            }
            None => {
                self.evolution.render_placeholder(Placeholder::NoTradeData)?;
                Ok(ChartState::NoData)
            }
        }
    }

    fn commit_goods(&self, tree: Option<&GoodsTree>) -> Result<ChartState> {
        match tree {
            Some(t) => {
                self.hierarchy.render(t, None)?;
                Ok(ChartState::Rendered)
            }
            None => {
                self.hierarchy.render_placeholder(Placeholder::NoGoodsData)?;
                Ok(ChartState::NoData)
            }
        }
    }

    /// Catch-all surface state for unexpected orchestration errors: both
    /// containers show the generic error card.
    pub fn render_error_both(&self) -> Result<()> {
        self.evolution.render_placeholder(Placeholder::Error)?;
        self.hierarchy.render_placeholder(Placeholder::Error)?;
        Ok(())
    }
}

/// Downgrade a fetch failure to "absent data", logging transport/decode
/// problems. Empty-but-well-formed payloads pass through and fall out as
/// `None` at the transform instead — those are not logged.
fn soften<T>(result: Result<T, FetchError>, what: &str) -> Option<T> {
    match result {
        Ok(payload) => Some(payload),
        Err(err) => {
            log::warn!("{what} fetch failed: {err}");
            None
        }
    }
}
