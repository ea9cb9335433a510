use std::path::PathBuf;

use clap::Parser;
use client_core::{config::load_settings_from, load_settings, Settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::TaximeterApp;

#[derive(Parser, Debug)]
#[command(about = "Desktop client for the taximeter trip service")]
struct Args {
    /// Trip service base URL, e.g. http://127.0.0.1:5000
    #[arg(long)]
    server_url: Option<String>,
    /// Interval between live fare polls
    #[arg(long)]
    poll_interval_ms: Option<u64>,
    /// Settings file to read instead of ./taximeter.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn resolve_settings(args: &Args) -> Settings {
    let mut settings = match &args.config {
        Some(path) => load_settings_from(path, |key| std::env::var(key).ok()),
        None => load_settings(),
    };
    if let Some(url) = &args.server_url {
        settings.server_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(interval) = args.poll_interval_ms.filter(|ms| *ms > 0) {
        settings.poll_interval_ms = interval;
    }
    settings
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = resolve_settings(&args);
    tracing::info!(?settings, "starting taximeter desktop client");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let server_url = settings.server_url.clone();
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Digital Taximeter")
            .with_inner_size([520.0, 720.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Digital Taximeter",
        options,
        Box::new(move |_cc| Ok(Box::new(TaximeterApp::new(cmd_tx, ui_rx, server_url)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop client exited with an error: {err}"))
}
