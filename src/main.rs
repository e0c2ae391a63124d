mod app;
mod color;
mod state;
mod ui;

use app::RustyDashApp;
use eframe::egui;
use rusty_dash::config::DashboardConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let data_dir = DashboardConfig::default_data_dir();
    log::info!("Reading datasets from {}", data_dir.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Dash – Dashboards",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyDashApp::new(data_dir)))),
    )
}
