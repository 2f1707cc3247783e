mod app;
mod color;
mod data;
mod export;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::PriceBoardApp;
use eframe::egui;
use state::AppState;

/// Environment variable consulted for the dataset path when no CLI
/// argument is given.
const DATA_PATH_ENV: &str = "PRICEBOARD_DATA";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Dataset path is configuration: first CLI argument, then environment.
    // Without either the dashboard starts empty and waits for File → Open.
    let source = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(DATA_PATH_ENV).map(PathBuf::from));

    let mut state = AppState::default();
    if let Some(path) = source {
        // A startup load failure is fatal: no partial dashboard.
        let dataset = data::cache::load_cached(&path)
            .with_context(|| format!("loading dataset {}", path.display()))?;
        state.set_dataset(path, dataset);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Priceboard – Model Prediction Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(PriceBoardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
