use std::path::PathBuf;

use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyDashApp {
    pub state: AppState,
}

impl RustyDashApp {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            state: AppState::with_data_dir(data_dir),
        }
    }
}

impl eframe::App for RustyDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: chart list ----
        egui::SidePanel::left("chart_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the selected chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.state.view.title());
            ui.separator();
            match self.state.view {
                View::GraveyardTable | View::SalaryTable | View::WeatherTable => {
                    table::raw_table(ui, &self.state)
                }
                _ => plot::chart(ui, &self.state),
            }
        });
    }
}
