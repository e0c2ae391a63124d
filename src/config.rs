use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Optional settings file inside the data directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "RUSTY_DASH_DATA";

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Per-chart settings
// ---------------------------------------------------------------------------

/// Row selection for the salary box plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryBoxConfig {
    /// Only employees residing here are plotted.
    pub residence: String,
    /// Job titles need strictly more rows than this to get a box.
    pub min_job_count: usize,
}

impl Default for SalaryBoxConfig {
    fn default() -> Self {
        Self {
            residence: "US".to_string(),
            min_job_count: 10,
        }
    }
}

/// A stacked sub-category: its code in the data and its legend text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLabel {
    pub code: String,
    pub label: String,
}

impl LevelLabel {
    fn new(code: &str, label: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
        }
    }
}

/// Axis and stack layout of the experience-level chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceMixConfig {
    /// Outer axis, left to right.
    pub company_sizes: Vec<String>,
    /// Stacked labels, bottom to top.
    pub levels: Vec<LevelLabel>,
}

impl Default for ExperienceMixConfig {
    fn default() -> Self {
        Self {
            company_sizes: ["S", "M", "L"].iter().map(|s| s.to_string()).collect(),
            levels: vec![
                LevelLabel::new("EN", "Entry Level"),
                LevelLabel::new("MI", "Mid Level"),
                LevelLabel::new("SE", "Senior Level"),
                LevelLabel::new("EX", "Executive Level"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// How many of the latest days to chart.
    pub recent_days: usize,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self { recent_days: 10 }
    }
}

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Everything the chart builders are parameterised with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory the datasets are read from. Not part of the settings file.
    #[serde(skip)]
    pub data_dir: PathBuf,
    pub salary_boxes: SalaryBoxConfig,
    pub experience_mix: ExperienceMixConfig,
    pub weather: WeatherConfig,
}

impl DashboardConfig {
    /// Data directory from `RUSTY_DASH_DATA`, falling back to `./data`.
    pub fn default_data_dir() -> PathBuf {
        std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Read `dashboard.json` from `data_dir` if it exists, defaults otherwise.
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join(CONFIG_FILE);
        let mut config = if path.is_file() {
            let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            let config: DashboardConfig =
                serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?;
            log::info!("Using settings from {}", path.display());
            config
        } else {
            log::debug!("No {} in {}, using defaults", CONFIG_FILE, data_dir.display());
            DashboardConfig::default()
        };
        config.data_dir = data_dir.to_path_buf();
        Ok(config)
    }

    /// Stacked level codes, in stacking order.
    pub fn level_codes(&self) -> Vec<String> {
        self.experience_mix
            .levels
            .iter()
            .map(|l| l.code.clone())
            .collect()
    }
}
