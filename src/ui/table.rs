use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use rusty_dash::data::model::{parse_number, RawRecord, RawTable};
use rusty_dash::format;

use crate::ui::plot::with_slot;
use crate::state::{AppState, View};

const ROW_HEIGHT: f32 = 18.0;

/// Render the raw rows of the dataset behind the selected table view.
pub fn raw_table(ui: &mut Ui, state: &AppState) {
    match state.view {
        View::GraveyardTable => with_slot(ui, &state.graveyard, |ui, s| rows(ui, &s.dataset.table, plain)),
        View::SalaryTable => with_slot(ui, &state.salaries, |ui, s| rows(ui, &s.dataset.table, salary_cell)),
        View::WeatherTable => with_slot(ui, &state.weather, |ui, s| rows(ui, &s.dataset.table, plain)),
        _ => {}
    }
}

fn plain(field: &str, record: &RawRecord) -> String {
    record.get(field).cloned().unwrap_or_default()
}

/// Salary amounts in their own currency, `salary_in_usd` in dollars.
fn salary_cell(field: &str, record: &RawRecord) -> String {
    let raw = plain(field, record);
    let amount = parse_number(&raw);
    if amount.is_nan() {
        return raw;
    }
    match field {
        "salary" => {
            let code = record.get("salary_currency").map_or("", String::as_str);
            format::currency(amount, code)
        }
        "salary_in_usd" => format::usd(amount),
        _ => raw,
    }
}

fn rows(ui: &mut Ui, table: &RawTable, cell: fn(&str, &RawRecord) -> String) {
    ui.label(format!("{} rows", table.len()));

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(60.0), table.headers.len())
            .header(20.0, |mut header| {
                for name in &table.headers {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let record = &table.rows[row.index()];
                    for name in &table.headers {
                        row.col(|ui| {
                            ui.label(cell(name, record));
                        });
                    }
                });
            });
    });
}
