mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{load_settings, FormStateStore};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::PredictorApp;

#[derive(Parser, Debug)]
#[command(about = "Desktop form for the habits-vs-marks prediction service")]
struct Args {
    /// Prediction endpoint, overriding predictor.toml and the environment.
    #[arg(long)]
    endpoint: Option<String>,
    /// Request timeout in seconds; none is applied by default.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load predictor settings")?;
    settings.apply_overrides(args.endpoint, args.timeout_secs);
    tracing::info!(endpoint = %settings.endpoint, "starting predictor gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    let _worker = backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Habits vs Marks Predictor")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Habits vs Marks Predictor",
        options,
        Box::new(|_cc| {
            Ok(Box::new(PredictorApp::new(
                cmd_tx,
                ui_rx,
                FormStateStore::student_habits(),
            )))
        }),
    )
    .map_err(|err| anyhow!("predictor gui exited with error: {err}"))
}
