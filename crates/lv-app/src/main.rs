//! Main application entry point

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use egui::{Context, Ui};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lv_core::{EngineConfig, LinkedViews, PointerHub};
use lv_data::{HousingCsvSource, NullConfig};
use lv_views::{LinkedView, MatrixView, ScatterPlotView};

const DEFAULT_DATA_PATH: &str = "data/Housing.csv";

/// Command line arguments: `[csv path] [--config path] [--null pattern]...`
#[derive(Debug)]
struct Args {
    data: PathBuf,
    config: Option<PathBuf>,
    /// Extra cell contents to read as missing
    null_patterns: Vec<String>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut data = None;
        let mut config = None;
        let mut null_patterns = Vec::new();
        while let Some(arg) = args.next() {
            if arg == "--config" {
                let path = args.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            } else if arg == "--null" {
                null_patterns.push(args.next().context("--null needs a pattern")?);
            } else if data.is_none() {
                data = Some(PathBuf::from(arg));
            } else {
                anyhow::bail!("Unexpected argument: {}", arg);
            }
        }
        Ok(Self {
            data: data.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            config,
            null_patterns,
        })
    }

    fn null_config(&self) -> NullConfig {
        let mut nulls = NullConfig::default();
        for pattern in &self.null_patterns {
            nulls.add_pattern(pattern.as_str());
        }
        nulls
    }
}

/// Main application state
struct LinkedViewsApp {
    /// Selection, layout and history shared by both views
    engine: LinkedViews,

    /// Global pointer-up notifications
    pointer_hub: PointerHub,

    scatter: ScatterPlotView,
    matrix: MatrixView,
}

impl LinkedViewsApp {
    fn new(engine: LinkedViews) -> Self {
        let pointer_hub = PointerHub::new();
        let matrix = MatrixView::new(&pointer_hub);
        Self {
            engine,
            pointer_hub,
            scatter: ScatterPlotView::new(),
            matrix,
        }
    }

    fn show_toolbar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let history = self.engine.history();
            if ui
                .add_enabled(history.can_go_back(), egui::Button::new("< Back"))
                .clicked()
            {
                self.engine.go_back();
            }
            if ui
                .add_enabled(history.can_go_forward(), egui::Button::new("Forward >"))
                .clicked()
            {
                self.engine.go_forward();
            }

            ui.separator();
            ui.label(format!("{} houses", self.engine.current().len()));
            if self.engine.is_filtered() {
                ui.label(egui::RichText::new("filtered").weak());
            }
            let removed = self.engine.removed().len();
            if removed > 0 {
                ui.label(egui::RichText::new(format!("{} removed", removed)).weak());
            }
        });
    }

    fn show_view(engine: &mut LinkedViews, view: &mut dyn LinkedView, ui: &mut Ui) {
        ui.vertical(|ui| {
            ui.heading(view.title());
            view.ui(engine, ui);
        });
    }
}

impl eframe::App for LinkedViewsApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Releases anywhere in the window end a matrix drag
        if ctx.input(|i| i.pointer.primary_released()) {
            self.pointer_hub.dispatch_pointer_up();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.show_toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                Self::show_view(&mut self.engine, &mut self.scatter, &mut columns[0]);
                Self::show_view(&mut self.engine, &mut self.matrix, &mut columns[1]);
            });
        });
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let items = HousingCsvSource::with_null_config(args.null_config())
        .load(&args.data)
        .with_context(|| format!("Failed to load {}", args.data.display()))?;
    if items.is_empty() {
        warn!("{} contains no houses", args.data.display());
    }

    info!("Starting linked views with {} houses", items.len());
    let engine = LinkedViews::new(items, config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([900.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Linked Views",
        options,
        Box::new(move |_cc| Box::new(LinkedViewsApp::new(engine))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
