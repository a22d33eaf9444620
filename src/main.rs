mod app;
mod color;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use app::CourtviewApp;
use eframe::egui;

use courtview::config::Config;
use courtview::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    // Optional first argument: path to a JSON config file.
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::resolve(config_path.as_deref()).context("loading configuration")?;
    log::debug!("Using {config:?}");

    // The initial load is the one fatal error.
    let mut state = AppState::new(&config);
    state.load().context("loading datasets")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Courtview – NBA Stats Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(CourtviewApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
