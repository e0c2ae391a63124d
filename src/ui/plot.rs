use std::collections::HashMap;
use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points,
    Polygon, Text,
};
use rusty_dash::charts::salaries::{percentage_tooltip, salary_point_tooltip};
use rusty_dash::charts::Tooltip;

use crate::color::generate_palette;
use crate::state::{AppState, GraveyardSeries, SalarySeries, Slot, View, WeatherSeries};

const BAR_COLOR: Color32 = Color32::from_rgb(0x36, 0xc3, 0xff);
const PROJECT_COLOR: Color32 = Color32::from_rgb(0x4e, 0x79, 0xa7);
const START_COLOR: Color32 = Color32::from_rgb(0x00, 0xcc, 0x66);
const END_COLOR: Color32 = Color32::from_rgb(0xff, 0x33, 0x00);
const BOX_COLOR: Color32 = Color32::from_rgb(0x2b, 0x8c, 0xbe);
const TEMP_COLOR: Color32 = Color32::from_rgb(0xad, 0xd8, 0xe6);

/// Inner radius of the radial chart, as a fraction of the outer one.
const RADIAL_INNER: f64 = 0.3;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Render the selected chart in the central panel.
pub fn chart(ui: &mut Ui, state: &AppState) {
    match state.view {
        View::DiscontinuedPerYear => with_slot(ui, &state.graveyard, discontinued_per_year),
        View::KilledByCategory => with_slot(ui, &state.graveyard, killed_by_category),
        View::Lifespans => with_slot(ui, &state.graveyard, lifespans),
        View::SalaryBoxes => with_slot(ui, &state.salaries, salary_boxes),
        View::MeanSalary => with_slot(ui, &state.salaries, mean_salary),
        View::ExperienceMix => with_slot(ui, &state.salaries, experience_mix),
        View::RecentWeather => with_slot(ui, &state.weather, recent_weather),
        View::GraveyardTable | View::SalaryTable | View::WeatherTable => {}
    }
}

/// Draw `draw` if the dataset is loaded, a placeholder otherwise.
pub fn with_slot<T>(ui: &mut Ui, slot: &Slot<T>, draw: fn(&mut Ui, &T)) {
    match slot {
        Slot::Loaded(series) => draw(ui, series),
        Slot::Empty => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a data folder to view this chart  (File → Open data folder…)");
            });
        }
        Slot::Failed(msg) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new(msg).color(Color32::RED));
            });
        }
    }
}

/// Axis formatter that prints `labels[i]` at integer position `i`.
fn index_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let i = mark.value.round();
        if (mark.value - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        labels.get(i as usize).cloned().unwrap_or_default()
    }
}

/// Deterministic vertical spread for overlapping points, in `-0.5..0.5`.
fn jitter(i: usize) -> f64 {
    (i as f64 * 0.618_034).fract() - 0.5
}

// ---------------------------------------------------------------------------
// Google Graveyard
// ---------------------------------------------------------------------------

fn discontinued_per_year(ui: &mut Ui, s: &GraveyardSeries) {
    let bars: Vec<Bar> = s
        .per_year
        .iter()
        .map(|c| Bar::new(c.key as f64, c.count as f64).name(c.tooltip()).width(0.8))
        .collect();

    let chart = BarChart::new(bars)
        .name("Casualties")
        .color(BAR_COLOR)
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| bar.name.clone()));

    Plot::new("discontinued_per_year")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Casualties")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

fn killed_by_category(ui: &mut Ui, s: &GraveyardSeries) {
    let timeline = &s.timeline;
    let legend = timeline.legend();

    // Hover text keyed by (legend entry, year).
    let tooltips: HashMap<(String, i32), String> = timeline
        .totals
        .iter()
        .zip(&legend)
        .flat_map(|(total, legend_name)| {
            timeline
                .points
                .iter()
                .filter(move |p| p.outer == total.key)
                .map(move |p| ((legend_name.clone(), p.inner), p.tooltip()))
        })
        .collect();

    let mut plot = Plot::new("killed_by_category");
    if let Some((first, last)) = timeline.year_range() {
        plot = plot.include_x(first as f64 - 1.0).include_x(last as f64 + 1.0);
    }

    plot.legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Projects Killed")
        .label_formatter(move |name: &str, value: &PlotPoint| {
            let year = value.x.round() as i32;
            tooltips
                .get(&(name.to_string(), year))
                .cloned()
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (total, legend_name) in timeline.totals.iter().zip(legend) {
                let points: Vec<[f64; 2]> = timeline
                    .points
                    .iter()
                    .filter(|p| p.outer == total.key)
                    .map(|p| [p.inner as f64, p.count as f64])
                    .collect();
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(legend_name)
                        .radius(8.0)
                        .color(s.category_colors.color_for(&total.key)),
                );
            }
        });
}

fn lifespans(ui: &mut Ui, s: &GraveyardSeries) {
    let n = s.lifespans.len();
    // First project on top: row i sits at y = n - 1 - i.
    let row_y = |i: usize| (n - 1 - i) as f64;
    let labels: Vec<String> = s.lifespans.iter().rev().map(|l| l.name.clone()).collect();
    let tooltips: Vec<String> = s.lifespans.iter().rev().map(|l| l.tooltip()).collect();

    Plot::new("lifespans")
        .x_axis_label("Year")
        .y_axis_formatter(index_formatter(labels))
        .label_formatter(move |_name: &str, value: &PlotPoint| {
            let i = value.y.round();
            if i < 0.0 {
                return String::new();
            }
            tooltips.get(i as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            let mut starts = Vec::with_capacity(n);
            let mut ends = Vec::with_capacity(n);
            for (i, span) in s.lifespans.iter().enumerate() {
                let y = row_y(i);
                let (x0, x1) = (span.start as f64, span.end as f64);
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[x0, y], [x1, y]]))
                        .color(PROJECT_COLOR)
                        .width(3.0),
                );
                starts.push([x0, y]);
                ends.push([x1, y]);
            }
            plot_ui.points(Points::new(PlotPoints::from(starts)).radius(5.0).color(START_COLOR));
            plot_ui.points(Points::new(PlotPoints::from(ends)).radius(5.0).color(END_COLOR));
        });
}

// ---------------------------------------------------------------------------
// Data Science Salaries
// ---------------------------------------------------------------------------

fn salary_boxes(ui: &mut Ui, s: &SalarySeries) {
    let labels: Vec<String> = s.boxes.iter().map(|b| b.job_title.clone()).collect();
    let palette = generate_palette(s.boxes.len());

    let elems: Vec<BoxElem> = s
        .boxes
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let st = &b.stat;
            BoxElem::new(
                i as f64,
                BoxSpread::new(st.whisker_min, st.q1, st.median, st.q3, st.whisker_max),
            )
            .name(b.tooltip())
            .box_width(0.6)
        })
        .collect();

    let boxes = BoxPlot::new(elems)
        .name("Salary (USD)")
        .color(BOX_COLOR)
        .horizontal()
        .element_formatter(Box::new(|elem: &BoxElem, _plot: &BoxPlot| elem.name.clone()));

    Plot::new("salary_boxes")
        .x_axis_label("Salary in USD")
        .y_axis_formatter(index_formatter(labels))
        .label_formatter(|name: &str, value: &PlotPoint| {
            if name.is_empty() {
                return String::new();
            }
            salary_point_tooltip(name, value.x)
        })
        .show(ui, |plot_ui| {
            plot_ui.box_plot(boxes);
            for (i, (b, color)) in s.boxes.iter().zip(palette).enumerate() {
                let points: Vec<[f64; 2]> = b
                    .salaries
                    .iter()
                    .enumerate()
                    .map(|(j, &salary)| [salary, i as f64 + 0.5 * jitter(j)])
                    .collect();
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(&b.job_title)
                        .radius(3.0)
                        .color(color),
                );
            }
        });
}

/// Outer radius of a bar, on a square-root scale so area tracks the value.
fn radial_scale(value: f64, max: f64) -> f64 {
    let inner2 = RADIAL_INNER * RADIAL_INNER;
    (inner2 + (1.0 - inner2) * (value / max).clamp(0.0, 1.0)).sqrt()
}

/// Point at `radius` and `angle` (clockwise from 12 o'clock).
fn polar(radius: f64, angle: f64) -> [f64; 2] {
    [radius * angle.sin(), radius * angle.cos()]
}

fn mean_salary(ui: &mut Ui, s: &SalarySeries) {
    let means: Vec<_> = s.means.iter().filter(|m| m.value.is_finite()).collect();
    let max = means.iter().map(|m| m.value).fold(0.0, f64::max);
    let band = TAU / means.len().max(1) as f64;
    let pad = band * 0.05;

    let tooltips: HashMap<String, String> = means.iter().map(|m| (m.key.clone(), m.tooltip())).collect();

    Plot::new("mean_salary")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .label_formatter(move |name: &str, _value: &PlotPoint| tooltips.get(name).cloned().unwrap_or_default())
        .show(ui, |plot_ui| {
            if max <= 0.0 {
                return;
            }
            for (i, m) in means.iter().enumerate() {
                let a0 = band * i as f64;
                let a1 = a0 + band - pad;
                let outer = radial_scale(m.value, max);

                const STEPS: usize = 8;
                let mut ring: Vec<[f64; 2]> = (0..=STEPS)
                    .map(|k| polar(outer, a0 + (a1 - a0) * k as f64 / STEPS as f64))
                    .collect();
                ring.extend((0..=STEPS).rev().map(|k| polar(RADIAL_INNER, a0 + (a1 - a0) * k as f64 / STEPS as f64)));

                let color = s.residence_colors.color_for(&m.key);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(ring))
                        .name(&m.key)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, color)),
                );

                let [x, y] = polar(outer + 0.05, (a0 + a1) / 2.0);
                plot_ui.text(Text::new(PlotPoint::new(x, y), RichText::new(&m.key).size(11.0)));
            }
        });
}

fn experience_mix(ui: &mut Ui, s: &SalarySeries) {
    let mix = &s.mix;
    let sizes: Vec<String> = mix.rows.iter().map(|r| r.outer.clone()).collect();
    let bands: Vec<_> = mix.rows.iter().map(|r| r.offsets()).collect();

    // One chart per level so each gets its own legend entry and colour.
    let charts: Vec<BarChart> = mix
        .levels
        .iter()
        .enumerate()
        .map(|(li, level)| {
            let bars: Vec<Bar> = bands
                .iter()
                .enumerate()
                .filter_map(|(i, row)| {
                    let band = row.get(li)?;
                    let f = band.upper - band.lower;
                    Some(
                        Bar::new(i as f64, f)
                            .base_offset(band.lower)
                            .name(percentage_tooltip(f))
                            .width(0.6),
                    )
                })
                .collect();
            BarChart::new(bars)
                .name(mix.label_for(&level.code))
                .color(s.level_colors.color_for(&level.code))
                .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| bar.name.clone()))
        })
        .collect();

    Plot::new("experience_mix")
        .legend(Legend::default())
        .x_axis_label("Company size")
        .x_axis_formatter(index_formatter(sizes))
        .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| format!("{:.0}%", mark.value * 100.0))
        .include_y(0.0)
        .include_y(1.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Seattle Weather
// ---------------------------------------------------------------------------

fn recent_weather(ui: &mut Ui, s: &WeatherSeries) {
    let recent = &s.recent;
    let dates: Vec<String> = recent
        .days
        .iter()
        .map(|d| d.date.format("%b %d, %Y").to_string())
        .collect();

    let bars: Vec<Bar> = recent
        .days
        .iter()
        .enumerate()
        .map(|(i, d)| Bar::new(i as f64, d.temp_max).name(d.tooltip()).width(0.8))
        .collect();
    let temps = BarChart::new(bars)
        .name("Max Temperature")
        .color(TEMP_COLOR)
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| bar.name.clone()));

    let precipitation: Vec<[f64; 2]> = recent
        .days
        .iter()
        .enumerate()
        .map(|(i, d)| [i as f64, recent.precipitation_on_temp_axis(d.precipitation)])
        .collect();
    let precipitation_max = recent.precipitation_axis_max;

    Plot::new("recent_weather")
        .legend(Legend::default())
        .x_axis_label("Day")
        .y_axis_label(format!("Max Temperature  (precipitation scaled, max {precipitation_max:.1})"))
        .x_axis_formatter(index_formatter(dates))
        .include_y(0.0)
        .include_y(recent.temp_axis_max)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(temps);
            plot_ui.line(
                Line::new(PlotPoints::from(precipitation))
                    .name("Precipitation")
                    .color(Color32::BLACK)
                    .width(1.5),
            );
        });
}
