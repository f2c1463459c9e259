mod app;
mod config;
mod data;
mod error;
mod state;
mod ui;
mod worker;

use app::DataViewerApp;
use config::ViewerConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::default();
    log::info!(
        "starting; data file {}, calibration threshold {}",
        config.data_path.display(),
        config.calibration_threshold
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([600.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Data Viewer and Predictor",
        options,
        Box::new(|cc| Ok(Box::new(DataViewerApp::new(cc, config)))),
    )
}
