use serde::Serialize;

use super::{capitalize, Tooltip};
use crate::aggregate::recent_window;
use crate::config::WeatherConfig;
use crate::data::model::DATE_FORMAT;
use crate::datasets::WeatherDay;

/// The latest days, oldest first, with the headroom used for both y axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentWeather {
    pub days: Vec<WeatherDay>,
    /// Top of the temperature axis: highest `temp_max` plus one.
    pub temp_axis_max: f64,
    /// Top of the precipitation axis: highest `precipitation` plus one.
    pub precipitation_axis_max: f64,
}

impl RecentWeather {
    /// Precipitation rescaled onto the temperature axis, for drawing both
    /// series on one plot.
    pub fn precipitation_on_temp_axis(&self, precipitation: f64) -> f64 {
        if self.precipitation_axis_max <= 0.0 {
            return 0.0;
        }
        precipitation / self.precipitation_axis_max * self.temp_axis_max
    }
}

pub fn recent_days(days: &[WeatherDay], config: &WeatherConfig) -> RecentWeather {
    let days: Vec<WeatherDay> = recent_window(days, |d| d.date, config.recent_days)
        .into_iter()
        .cloned()
        .collect();

    // An empty or all-NaN window gets an axis top of 1, as if its maximum were 0.
    let axis_max = |f: fn(&WeatherDay) -> f64| {
        let max = days
            .iter()
            .map(f)
            .filter(|v| !v.is_nan())
            .fold(f64::NEG_INFINITY, f64::max);
        if max == f64::NEG_INFINITY {
            1.0
        } else {
            max + 1.0
        }
    };
    let temp_axis_max = axis_max(|d| d.temp_max);
    let precipitation_axis_max = axis_max(|d| d.precipitation);

    RecentWeather {
        days,
        temp_axis_max,
        precipitation_axis_max,
    }
}

impl Tooltip for WeatherDay {
    fn tooltip(&self) -> String {
        format!(
            "{}\nPrecipitation: {}\nMax Temp: {}\nMin Temp: {}\nWind: {}\nWeather: {}",
            self.date.format(DATE_FORMAT),
            self.precipitation,
            self.temp_max,
            self.temp_min,
            self.wind,
            capitalize(&self.weather)
        )
    }
}
