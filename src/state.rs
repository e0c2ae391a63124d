use std::path::{Path, PathBuf};

use rusty_dash::aggregate::Aggregate;
use rusty_dash::charts::graveyard::{self, CategoryTimeline, Lifespan, YearCount};
use rusty_dash::charts::salaries::{self, ExperienceMix, SalaryBox};
use rusty_dash::charts::weather::{self, RecentWeather};
use rusty_dash::config::DashboardConfig;
use rusty_dash::datasets::{Dataset, GraveyardProject, SalaryRecord, TypedRow, WeatherDay};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Which chart is on screen
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    DiscontinuedPerYear,
    KilledByCategory,
    Lifespans,
    GraveyardTable,
    SalaryBoxes,
    MeanSalary,
    ExperienceMix,
    SalaryTable,
    RecentWeather,
    WeatherTable,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::DiscontinuedPerYear => "Discontinued per year",
            View::KilledByCategory => "Killed by category",
            View::Lifespans => "Lifespans",
            View::GraveyardTable => "Graveyard table",
            View::SalaryBoxes => "Salaries by job title",
            View::MeanSalary => "Average salary by country",
            View::ExperienceMix => "Experience by company size",
            View::SalaryTable => "Salary table",
            View::RecentWeather => "Recent weather",
            View::WeatherTable => "Weather table",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-dataset derived series
// ---------------------------------------------------------------------------

/// A dataset that loaded, failed, or was never asked for.
pub enum Slot<T> {
    Empty,
    Loaded(T),
    Failed(String),
}

impl<T> Slot<T> {
    fn from_load(file: &str, result: anyhow::Result<T>) -> Self {
        match result {
            Ok(v) => Slot::Loaded(v),
            Err(e) => {
                log::error!("Failed to load {file}: {e:#}");
                Slot::Failed(format!("Error: {e:#}"))
            }
        }
    }
}

pub struct GraveyardSeries {
    pub dataset: Dataset<GraveyardProject>,
    pub per_year: Vec<YearCount>,
    pub timeline: CategoryTimeline,
    pub lifespans: Vec<Lifespan>,
    pub category_colors: ColorMap,
}

impl GraveyardSeries {
    fn build(dataset: Dataset<GraveyardProject>) -> Self {
        let timeline = graveyard::killed_by_category(&dataset.rows);
        let category_colors = ColorMap::new(timeline.totals.iter().map(|t| t.key.as_str()));
        GraveyardSeries {
            per_year: graveyard::discontinued_per_year(&dataset.rows),
            lifespans: graveyard::lifespans(&dataset.rows),
            timeline,
            category_colors,
            dataset,
        }
    }
}

pub struct SalarySeries {
    pub dataset: Dataset<SalaryRecord>,
    pub boxes: Vec<SalaryBox>,
    pub means: Vec<Aggregate<String, f64>>,
    pub mix: ExperienceMix,
    pub residence_colors: ColorMap,
    pub level_colors: ColorMap,
}

impl SalarySeries {
    fn build(dataset: Dataset<SalaryRecord>, config: &DashboardConfig) -> Self {
        let means = salaries::mean_salary_by_residence(&dataset.rows);
        let mix = salaries::experience_mix(&dataset.rows, &config.experience_mix);
        SalarySeries {
            boxes: salaries::salary_boxes(&dataset.rows, &config.salary_boxes),
            residence_colors: ColorMap::new(means.iter().map(|m| m.key.as_str())),
            level_colors: ColorMap::new(config.level_codes()),
            means,
            mix,
            dataset,
        }
    }
}

pub struct WeatherSeries {
    pub dataset: Dataset<WeatherDay>,
    pub recent: RecentWeather,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,
    pub graveyard: Slot<GraveyardSeries>,
    pub salaries: Slot<SalarySeries>,
    pub weather: Slot<WeatherSeries>,
    pub view: View,
    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: DashboardConfig::default(),
            graveyard: Slot::Empty,
            salaries: Slot::Empty,
            weather: Slot::Empty,
            view: View::DiscontinuedPerYear,
            status_message: None,
        }
    }
}

impl AppState {
    /// State with every dataset in `dir` loaded.
    pub fn with_data_dir(dir: PathBuf) -> Self {
        let mut state = AppState::default();
        state.load_dir(&dir);
        state
    }

    /// (Re)load settings and all three datasets from `dir`.
    ///
    /// Datasets load independently: one failing leaves the others usable.
    pub fn load_dir(&mut self, dir: &Path) {
        self.status_message = None;
        self.config = match DashboardConfig::load(dir) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e:#}; using default settings");
                self.status_message = Some(format!("Settings ignored: {e}"));
                DashboardConfig {
                    data_dir: dir.to_path_buf(),
                    ..DashboardConfig::default()
                }
            }
        };

        self.graveyard = Slot::from_load(
            GraveyardProject::FILE_NAME,
            Dataset::load(dir).map(GraveyardSeries::build),
        );

        let config = &self.config;
        self.salaries = Slot::from_load(
            SalaryRecord::FILE_NAME,
            Dataset::load(dir).map(|ds| SalarySeries::build(ds, config)),
        );

        self.weather = Slot::from_load(
            WeatherDay::FILE_NAME,
            Dataset::load(dir).map(|dataset: Dataset<WeatherDay>| WeatherSeries {
                recent: weather::recent_days(&dataset.rows, &config.weather),
                dataset,
            }),
        );
    }
}
