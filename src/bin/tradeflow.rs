use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tradeflow_rs::viz::evolution::EvolutionView;
use tradeflow_rs::viz::hierarchy::HierarchyView;
use tradeflow_rs::{ChartState, Client, Coordinator, RefreshOutcome, Selection};
use tradeflow_rs::{format, stats, storage};

#[derive(Parser, Debug)]
#[command(
    name = "tradeflow",
    version,
    about = "Fetch & render bilateral trade statistics (evolution bars + goods treemap)"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch both datasets for a selection and render the two charts.
    Render(RenderArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Reporting economy code (e.g., CHE)
    #[arg(short, long)]
    reporter: String,
    /// Partner economy code (e.g., EU27)
    #[arg(short, long)]
    partner: String,
    /// Reference year; the evolution chart covers the 10 preceding years.
    #[arg(short, long)]
    year: i32,
    /// Output path for the evolution bar chart (.svg or .png).
    #[arg(long, default_value = "trade_evolution.svg")]
    evolution_out: PathBuf,
    /// Output path for the goods treemap (.svg or .png).
    #[arg(long, default_value = "goods_treemap.svg")]
    goods_out: PathBuf,
    /// Width of both charts (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of both charts (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Save the fetched evolution records (format by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Records format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print summary statistics for the fetched window.
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// Override the trade-data API base URL.
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let client = match args.base_url.as_deref() {
        Some(base) => Client::new(base),
        None => Client::default(),
    };
    let coordinator = Coordinator::new(
        client,
        EvolutionView::new(&args.evolution_out, args.width, args.height),
        HierarchyView::new(&args.goods_out, args.width, args.height),
    );

    let selection = Selection {
        reporter: args.reporter,
        partner: args.partner,
        year: args.year,
    };
    let report = match coordinator.refresh(&selection) {
        Ok(RefreshOutcome::Committed(report)) => report,
        Ok(RefreshOutcome::Superseded) => unreachable!("single refresh cannot be superseded"),
        Err(err) => {
            // Unexpected orchestration error: both surfaces show the
            // generic error card, then the error propagates.
            coordinator.render_error_both().ok();
            return Err(err);
        }
    };

    match report.evolution {
        ChartState::Rendered => {
            eprintln!("Wrote evolution chart to {}", args.evolution_out.display())
        }
        ChartState::NoData => eprintln!(
            "No trade data available; wrote placeholder to {}",
            args.evolution_out.display()
        ),
    }
    match report.goods {
        ChartState::Rendered => eprintln!("Wrote goods treemap to {}", args.goods_out.display()),
        ChartState::NoData => eprintln!(
            "No goods data available; wrote placeholder to {}",
            args.goods_out.display()
        ),
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&report.records, path)?,
            "json" => storage::save_json(&report.records, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} records to {}", report.records.len(), path.display());
    }

    if args.stats {
        match stats::records_summary(&report.records) {
            Some(summary) => print_summary(&summary),
            None => println!("no records in the fetched window"),
        }
    }

    Ok(())
}

fn print_summary(summary: &stats::SeriesSummary) {
    for (name, flow) in [("exports", &summary.exports), ("imports", &summary.imports)] {
        println!(
            "{name}  count={} min={} max={} mean={} total={}",
            flow.count,
            format::format_usd_exact(flow.min),
            format::format_usd_exact(flow.max),
            format::format_usd_exact(flow.mean),
            format::format_usd_exact(flow.total),
        );
    }
    println!(
        "balance {} ({})",
        format::format_usd_exact(summary.latest_balance),
        summary.latest_year
    );
}
