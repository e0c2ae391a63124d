use serde::Serialize;

use super::TypedRow;
use crate::data::model::{FieldKind, Record, RecordError, Schema};

/// One row of `ds_salaries.csv`. Numeric fields may be `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryRecord {
    pub work_year: f64,
    pub experience_level: String,
    pub employment_type: String,
    pub job_title: String,
    pub salary: f64,
    pub salary_currency: String,
    pub salary_in_usd: f64,
    pub employee_residence: String,
    pub remote_ratio: f64,
    pub company_location: String,
    pub company_size: String,
}

impl TypedRow for SalaryRecord {
    const FILE_NAME: &'static str = "ds_salaries.csv";

    fn schema() -> Schema {
        Schema::new(&[
            ("work_year", FieldKind::Number),
            ("salary", FieldKind::Number),
            ("salary_in_usd", FieldKind::Number),
            ("remote_ratio", FieldKind::Number),
        ])
    }

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(SalaryRecord {
            work_year: record.number("work_year")?,
            experience_level: record.text("experience_level")?,
            employment_type: record.text("employment_type")?,
            job_title: record.text("job_title")?,
            salary: record.number("salary")?,
            salary_currency: record.text("salary_currency")?,
            salary_in_usd: record.number("salary_in_usd")?,
            employee_residence: record.text("employee_residence")?,
            remote_ratio: record.number("remote_ratio")?,
            company_location: record.text("company_location")?,
            company_size: record.text("company_size")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::Dataset;

    const HEADER: &str = "work_year,experience_level,employment_type,job_title,salary,salary_currency,salary_in_usd,employee_residence,remote_ratio,company_location,company_size\n";

    #[test]
    fn malformed_salary_is_kept_as_nan() {
        let csv = format!(
            "{HEADER}2023,SE,FT,Data Scientist,80000,EUR,85847,ES,100,ES,L\n\
             2023,MI,CT,ML Engineer,n/a,USD,n/a,US,100,US,S\n"
        );
        let ds: Dataset<SalaryRecord> = Dataset::from_csv(&csv).unwrap();

        assert_eq!(ds.rows.len(), 2);
        assert_eq!(ds.rows[0].salary_in_usd, 85847.0);
        assert!(ds.rows[1].salary_in_usd.is_nan());
        assert_eq!(ds.rows[1].company_size, "S");
    }

    #[test]
    fn missing_column_skips_rows() {
        let csv = "work_year,job_title\n2023,Data Scientist\n";
        let ds: Dataset<SalaryRecord> = Dataset::from_csv(csv).unwrap();
        assert!(ds.rows.is_empty());
        assert_eq!(ds.skipped, 1);
    }
}
