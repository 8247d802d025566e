/*!
 * GUI application for tradeflow-rs - bilateral trade statistics explorer
 *
 * A cross-platform desktop application providing an intuitive interface for:
 * - Selecting reporter, partner, and reference year
 * - Refreshing the trade evolution chart and the goods treemap on change
 * - Choosing where and in which format the chart files are written
 *
 * Platform support: Windows, macOS, Linux
 */

use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use tradeflow_rs::viz::evolution::EvolutionView;
use tradeflow_rs::viz::hierarchy::HierarchyView;
use tradeflow_rs::{ChartState, Client, Coordinator, RefreshOutcome, Selection};

const REPORTERS: [&str; 4] = ["CHE", "ISL", "NOR", "LIE"];
const PARTNERS: [&str; 6] = ["EU27", "USA", "CHN", "JPN", "GBR", "WORLD"];
const YEARS: std::ops::RangeInclusive<i32> = 2010..=2024;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 520.0])
            .with_min_inner_size([560.0, 400.0])
            .with_title("Trade Statistics - tradeflow-rs"),
        ..Default::default()
    };

    eframe::run_native(
        "Trade Statistics",
        options,
        Box::new(|_cc| Ok(Box::new(TradeflowApp::new()))),
    )
}

/// Main application state
struct TradeflowApp {
    // Selectors; any change triggers a refresh
    reporter: String,
    partner: String,
    year: i32,

    // Output options
    output_dir: String,
    chart_format: ChartFormat,
    chart_width: u32,
    chart_height: u32,

    // UI state
    is_loading: bool,
    status_message: String,
    error_message: String,

    // Background refresh plumbing
    last_refreshed: Option<(String, String, i32)>,
    coordinator: Option<Arc<Coordinator>>,
    coordinator_config: Option<(String, ChartFormat, u32, u32)>,
    operation_receiver: Option<mpsc::Receiver<OperationResult>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ChartFormat {
    Svg,
    Png,
}

impl ChartFormat {
    fn extension(self) -> &'static str {
        match self {
            ChartFormat::Svg => "svg",
            ChartFormat::Png => "png",
        }
    }
}

#[derive(Debug)]
enum OperationResult {
    Success(String),
    Error(String),
}

impl TradeflowApp {
    fn new() -> Self {
        let home_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .to_string_lossy()
            .to_string();

        Self {
            reporter: "CHE".to_string(),
            partner: "EU27".to_string(),
            year: 2020,

            output_dir: home_dir,
            chart_format: ChartFormat::Svg,
            chart_width: 1000,
            chart_height: 600,

            is_loading: false,
            status_message: String::new(),
            error_message: String::new(),

            last_refreshed: None,
            coordinator: None,
            coordinator_config: None,
            operation_receiver: None,
        }
    }

    fn validate_inputs(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("Please specify an output directory".to_string());
        }
        if !(200..=3000).contains(&self.chart_width) || !(200..=3000).contains(&self.chart_height) {
            return Err("Chart dimensions must be between 200 and 3000 pixels".to_string());
        }
        Ok(())
    }

    /// The coordinator is shared across overlapping refreshes so its token
    /// guard can discard stale completions; it is rebuilt only when the
    /// output configuration changes.
    fn coordinator(&mut self) -> Arc<Coordinator> {
        let config = (
            self.output_dir.clone(),
            self.chart_format,
            self.chart_width,
            self.chart_height,
        );
        if self.coordinator_config.as_ref() != Some(&config)
            || self.coordinator.is_none()
        {
            let dir = PathBuf::from(&self.output_dir);
            let ext = self.chart_format.extension();
            let coordinator = Coordinator::new(
                Client::default(),
                EvolutionView::new(
                    dir.join(format!("trade_evolution.{ext}")),
                    self.chart_width,
                    self.chart_height,
                ),
                HierarchyView::new(
                    dir.join(format!("goods_treemap.{ext}")),
                    self.chart_width,
                    self.chart_height,
                ),
            );
            self.coordinator = Some(Arc::new(coordinator));
            self.coordinator_config = Some(config);
        }
        Arc::clone(self.coordinator.as_ref().expect("coordinator built above"))
    }

    fn start_refresh(&mut self) {
        if let Err(err) = self.validate_inputs() {
            self.error_message = err;
            return;
        }

        self.is_loading = true;
        self.error_message.clear();
        self.status_message = "Fetching trade data...".to_string();
        self.last_refreshed = Some((self.reporter.clone(), self.partner.clone(), self.year));

        let (sender, receiver) = mpsc::channel();
        self.operation_receiver = Some(receiver);

        let coordinator = self.coordinator();
        let selection = Selection {
            reporter: self.reporter.clone(),
            partner: self.partner.clone(),
            year: self.year,
        };

        // Spawn background thread for the refresh; a stale one is discarded
        // by the coordinator's token guard.
        thread::spawn(move || {
            let result = perform_refresh(&coordinator, &selection);
            let _ = sender.send(result);
        });
    }

    fn check_operation_result(&mut self) {
        if let Some(receiver) = &self.operation_receiver
            && let Ok(result) = receiver.try_recv()
        {
            self.is_loading = false;
            self.operation_receiver = None;

            match result {
                OperationResult::Success(message) => {
                    self.status_message = message;
                    self.error_message.clear();
                }
                OperationResult::Error(error) => {
                    self.error_message = error;
                    self.status_message.clear();
                }
            }
        }
    }

    fn selection_changed(&self) -> bool {
        self.last_refreshed.as_ref()
            != Some(&(self.reporter.clone(), self.partner.clone(), self.year))
    }
}

impl eframe::App for TradeflowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background refreshes
        self.check_operation_result();

        // Request repaint if loading (for spinner animation)
        if self.is_loading {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Bilateral Trade Statistics");
                ui.add_space(10.0);

                ui.group(|ui| {
                    ui.label("Selection");
                    ui.add_space(5.0);

                    ui.horizontal(|ui| {
                        ui.label("Reporter:");
                        egui::ComboBox::from_id_salt("reporter")
                            .selected_text(&self.reporter)
                            .show_ui(ui, |ui| {
                                for code in REPORTERS {
                                    ui.selectable_value(&mut self.reporter, code.to_string(), code);
                                }
                            });

                        ui.label("Partner:");
                        egui::ComboBox::from_id_salt("partner")
                            .selected_text(&self.partner)
                            .show_ui(ui, |ui| {
                                for code in PARTNERS {
                                    ui.selectable_value(&mut self.partner, code.to_string(), code);
                                }
                            });

                        ui.label("Year:");
                        egui::ComboBox::from_id_salt("year")
                            .selected_text(self.year.to_string())
                            .show_ui(ui, |ui| {
                                for year in YEARS {
                                    ui.selectable_value(&mut self.year, year, year.to_string());
                                }
                            });
                    });
                });

                ui.add_space(10.0);

                ui.group(|ui| {
                    ui.label("Output");
                    ui.add_space(5.0);

                    ui.horizontal(|ui| {
                        ui.label("Folder:");
                        ui.text_edit_singleline(&mut self.output_dir);
                        if ui.button("Browse").clicked()
                            && let Some(path) = rfd::FileDialog::new().pick_folder()
                        {
                            self.output_dir = path.to_string_lossy().to_string();
                        }
                    });

                    ui.horizontal(|ui| {
                        ui.label("Chart format:");
                        ui.radio_value(&mut self.chart_format, ChartFormat::Svg, "SVG");
                        ui.radio_value(&mut self.chart_format, ChartFormat::Png, "PNG");
                    });

                    ui.horizontal(|ui| {
                        ui.label("Dimensions:");
                        ui.add(egui::DragValue::new(&mut self.chart_width).range(200..=3000));
                        ui.label("×");
                        ui.add(egui::DragValue::new(&mut self.chart_height).range(200..=3000));
                        ui.label("pixels");
                    });
                });

                ui.add_space(15.0);

                ui.horizontal(|ui| {
                    if ui.button("Refresh").clicked() {
                        self.start_refresh();
                    }

                    if self.is_loading {
                        ui.spinner();
                        ui.label("Loading data...");
                    }
                });

                // Selector changes refresh without an extra click. A refresh
                // already in flight is not cancelled; the newest one wins.
                if self.selection_changed() {
                    self.start_refresh();
                }

                ui.add_space(10.0);

                if !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }

                if !self.error_message.is_empty() {
                    ui.colored_label(egui::Color32::RED, &self.error_message);
                }
            });
        });
    }
}

fn perform_refresh(coordinator: &Coordinator, selection: &Selection) -> OperationResult {
    match coordinator.refresh(selection) {
        Ok(RefreshOutcome::Committed(report)) => {
            let evolution = match report.evolution {
                ChartState::Rendered => format!(
                    "evolution chart: {}",
                    coordinator.evolution.out_path.display()
                ),
                ChartState::NoData => "evolution chart: no trade data available".to_string(),
            };
            let goods = match report.goods {
                ChartState::Rendered => {
                    format!("goods treemap: {}", coordinator.hierarchy.out_path.display())
                }
                ChartState::NoData => "goods treemap: no goods data available".to_string(),
            };
            OperationResult::Success(format!(
                "Refreshed {}/{} {}\n{}\n{}",
                selection.reporter, selection.partner, selection.year, evolution, goods
            ))
        }
        Ok(RefreshOutcome::Superseded) => OperationResult::Success(
            "Refresh superseded by a newer selection; results discarded".to_string(),
        ),
        Err(err) => {
            coordinator.render_error_both().ok();
            OperationResult::Error(format!("Error loading data: {err}"))
        }
    }
}
