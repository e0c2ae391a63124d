use chrono::NaiveDate;
use serde::Serialize;

use super::TypedRow;
use crate::data::model::{FieldKind, Record, RecordError, Schema};

/// One day of `seattle-weather.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherDay {
    pub date: NaiveDate,
    pub precipitation: f64,
    pub temp_max: f64,
    pub temp_min: f64,
    pub wind: f64,
    pub weather: String,
}

impl TypedRow for WeatherDay {
    const FILE_NAME: &'static str = "seattle-weather.csv";

    fn schema() -> Schema {
        Schema::new(&[
            ("date", FieldKind::Date),
            ("precipitation", FieldKind::Number),
            ("temp_max", FieldKind::Number),
            ("temp_min", FieldKind::Number),
            ("wind", FieldKind::Number),
        ])
    }

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(WeatherDay {
            date: record.date("date")?,
            precipitation: record.number("precipitation")?,
            temp_max: record.number("temp_max")?,
            temp_min: record.number("temp_min")?,
            wind: record.number("wind")?,
            weather: record.text("weather")?,
        })
    }
}
