use serde::Serialize;

use super::TypedRow;
use crate::data::model::{FieldKind, Record, RecordError, Schema};

/// A discontinued product from `Google_graveyard.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraveyardProject {
    #[serde(rename = "Name")]
    pub name: String,
    /// Launch year.
    #[serde(rename = "Start")]
    pub start: i32,
    /// Shutdown year.
    #[serde(rename = "End")]
    pub end: i32,
    #[serde(rename = "Total years")]
    pub total_years: f64,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl TypedRow for GraveyardProject {
    const FILE_NAME: &'static str = "Google_graveyard.csv";

    fn schema() -> Schema {
        Schema::new(&[
            ("Start", FieldKind::Number),
            ("End", FieldKind::Number),
            ("Total years", FieldKind::Number),
        ])
    }

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(GraveyardProject {
            name: record.text("Name")?,
            start: record.integer("Start")?,
            end: record.integer("End")?,
            total_years: record.number("Total years").unwrap_or(f64::NAN),
            category: record.text("Category").unwrap_or_default(),
            description: record.text("Description").unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::Dataset;

    #[test]
    fn rows_with_bad_years_are_skipped() {
        let csv = "Name,Start,End,Total years,Category,Description\n\
                   Reader,2005,2013,8,Service,Feed reader\n\
                   Wave,2009,twenty,1,App,Realtime docs\n";
        let ds: Dataset<GraveyardProject> = Dataset::from_csv(csv).unwrap();

        assert_eq!(ds.table.len(), 2);
        assert_eq!(ds.rows.len(), 1);
        assert_eq!(ds.skipped, 1);
        assert_eq!(ds.rows[0].name, "Reader");
        assert_eq!((ds.rows[0].start, ds.rows[0].end), (2005, 2013));
    }

    #[test]
    fn optional_columns_default() {
        let csv = "Name,Start,End\nAllo,2016,2019\n";
        let ds: Dataset<GraveyardProject> = Dataset::from_csv(csv).unwrap();

        assert_eq!(ds.rows[0].category, "");
        assert!(ds.rows[0].total_years.is_nan());
    }
}
