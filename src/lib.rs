//! tradeflow-rs
//!
//! A lightweight Rust library for retrieving, transforming, and visualizing
//! bilateral trade statistics. Pairs with the `tradeflow` CLI and the
//! `tradeflow-gui` desktop app.
//!
//! ### Features
//! - Fetch trade evolution (exports/imports per year) and HS2 goods
//!   composition for a reporter/partner pair
//! - Render a grouped bar chart of the 10-year trade evolution and a
//!   squarified treemap of the goods composition (SVG/PNG)
//! - Save fetched records as CSV or JSON; quick summary statistics
//! - Coordinated refresh with loading/error placeholders and independent
//!   per-chart failure handling
//!
//! ### Example
//! ```no_run
//! use tradeflow_rs::{Client, Coordinator, Selection};
//! use tradeflow_rs::viz::evolution::EvolutionView;
//! use tradeflow_rs::viz::hierarchy::HierarchyView;
//!
//! let coordinator = Coordinator::new(
//!     Client::default(),
//!     EvolutionView::new("trade_evolution.svg", 1000, 600),
//!     HierarchyView::new("goods_treemap.svg", 1000, 600),
//! );
//! let selection = Selection {
//!     reporter: "CHE".into(),
//!     partner: "EU27".into(),
//!     year: 2020,
//! };
//! let outcome = coordinator.refresh(&selection)?;
//! println!("{:?}", outcome);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod coordinator;
pub mod format;
pub mod hierarchy;
pub mod models;
pub mod series;
pub mod stats;
pub mod storage;
pub mod viz;

pub use api::Client;
pub use coordinator::{ChartState, Coordinator, RefreshOutcome};
pub use models::{Selection, TradeRecord, YearRange};
