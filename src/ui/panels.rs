use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, Slot, View};

// ---------------------------------------------------------------------------
// Left side panel – chart list
// ---------------------------------------------------------------------------

fn slot_summary<T>(slot: &Slot<T>, rows: impl Fn(&T) -> (usize, usize)) -> RichText {
    match slot {
        Slot::Empty => RichText::new("not loaded").weak(),
        Slot::Loaded(s) => {
            let (loaded, skipped) = rows(s);
            if skipped > 0 {
                RichText::new(format!("{loaded} rows, {skipped} skipped"))
            } else {
                RichText::new(format!("{loaded} rows"))
            }
        }
        Slot::Failed(_) => RichText::new("failed to load").color(Color32::RED),
    }
}

/// Render the left panel: one group of views per dataset.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dashboards");
    ui.separator();

    let groups: [(&str, RichText, &[View]); 3] = [
        (
            "Google Graveyard",
            slot_summary(&state.graveyard, |s| (s.dataset.rows.len(), s.dataset.skipped)),
            &[
                View::DiscontinuedPerYear,
                View::KilledByCategory,
                View::Lifespans,
                View::GraveyardTable,
            ],
        ),
        (
            "Data Science Salaries",
            slot_summary(&state.salaries, |s| (s.dataset.rows.len(), s.dataset.skipped)),
            &[
                View::SalaryBoxes,
                View::MeanSalary,
                View::ExperienceMix,
                View::SalaryTable,
            ],
        ),
        (
            "Seattle Weather",
            slot_summary(&state.weather, |s| (s.dataset.rows.len(), s.dataset.skipped)),
            &[View::RecentWeather, View::WeatherTable],
        ),
    ];

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (title, summary, views) in groups {
                ui.strong(title);
                ui.label(summary);
                for &view in views {
                    ui.selectable_value(&mut state.view, view, view.title());
                }
                ui.separator();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                let dir = state.config.data_dir.clone();
                state.load_dir(&dir);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(format!("Data: {}", state.config.data_dir.display()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open data folder")
        .set_directory(&state.config.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("Switching data folder to {}", dir.display());
        state.load_dir(&dir);
    }
}
