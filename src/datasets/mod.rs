//! Typed views of the three dashboard datasets.
//!
//! Each dataset is a raw table plus typed rows projected from it once. Rows
//! that cannot be projected (missing field, bad year, bad date) are logged and
//! left out of the typed rows; the raw table keeps them for display.

use std::path::Path;

use anyhow::{Context, Result};

use crate::data::loader;
use crate::data::model::{RawTable, Record, RecordError, Schema};

pub mod graveyard;
pub mod salaries;
pub mod weather;

pub use graveyard::GraveyardProject;
pub use salaries::SalaryRecord;
pub use weather::WeatherDay;

/// A row type that can be projected out of a coerced [`Record`].
pub trait TypedRow: Sized {
    /// File name inside the data directory.
    const FILE_NAME: &'static str;

    fn schema() -> Schema;

    fn from_record(record: &Record) -> Result<Self, RecordError>;
}

/// A loaded dataset: the raw table and its typed rows.
#[derive(Debug, Clone)]
pub struct Dataset<T> {
    pub table: RawTable,
    pub rows: Vec<T>,
    /// Number of raw rows that failed projection.
    pub skipped: usize,
}

impl<T: TypedRow> Dataset<T> {
    /// Load `T::FILE_NAME` from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(T::FILE_NAME);
        let table = loader::load_file(&path)?;
        let dataset = Self::from_table(table);
        log::info!(
            "Loaded {} rows from {} ({} skipped)",
            dataset.rows.len(),
            path.display(),
            dataset.skipped
        );
        Ok(dataset)
    }

    /// Parse an in-memory CSV document.
    pub fn from_csv(text: &str) -> Result<Self> {
        let reader = csv::Reader::from_reader(text.as_bytes());
        let table = loader::read_csv(reader).with_context(|| format!("parsing {}", T::FILE_NAME))?;
        Ok(Self::from_table(table))
    }

    pub fn from_table(table: RawTable) -> Self {
        let schema = T::schema();
        let mut rows = Vec::with_capacity(table.len());
        let mut skipped = 0;

        for (row_no, record) in table.coerce(&schema).iter().enumerate() {
            match T::from_record(record) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    log::warn!("{}: skipping row {row_no}: {e}", T::FILE_NAME);
                    skipped += 1;
                }
            }
        }

        Dataset {
            table,
            rows,
            skipped,
        }
    }
}
