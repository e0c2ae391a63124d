use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Date layout used by every dated column (`2012-01-01`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Raw rows, as the CSV/JSON reader hands them over
// ---------------------------------------------------------------------------

/// One parsed row: field name → raw string, keyed alphabetically. Use
/// [`RawTable::headers`] for column order.
pub type RawRecord = BTreeMap<String, String>;

/// A loaded table: header order plus the raw rows.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Field names in file order.
    pub headers: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Coerce every row against `schema`.
    pub fn coerce(&self, schema: &Schema) -> Vec<Record> {
        self.rows.iter().map(|row| coerce(row, schema)).collect()
    }
}

// ---------------------------------------------------------------------------
// FieldValue – a single typed cell
// ---------------------------------------------------------------------------

/// A typed cell. Numbers that fail to parse are kept as `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) if v.is_nan() => write!(f, "NaN"),
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Schema and coercion
// ---------------------------------------------------------------------------

/// How a raw string column is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    Text,
    Date,
}

/// Field name → kind. Fields not listed are kept as text.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    kinds: BTreeMap<String, FieldKind>,
}

impl Schema {
    pub fn new(fields: &[(&str, FieldKind)]) -> Self {
        Schema {
            kinds: fields
                .iter()
                .map(|(name, kind)| (name.to_string(), *kind))
                .collect(),
        }
    }

    pub fn kind_of(&self, field: &str) -> FieldKind {
        self.kinds.get(field).copied().unwrap_or(FieldKind::Text)
    }
}

/// Parse a numeric cell. Empty or malformed input yields `NaN`.
pub fn parse_number(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Build a typed [`Record`] from a raw row.
///
/// Numbers never fail: bad input becomes `NaN` and is left for the
/// aggregation step to handle. Dates that do not parse are stored as text so
/// the typed projections can report them.
pub fn coerce(raw: &RawRecord, schema: &Schema) -> Record {
    let fields = raw
        .iter()
        .map(|(name, value)| {
            let typed = match schema.kind_of(name) {
                FieldKind::Number => FieldValue::Number(parse_number(value)),
                FieldKind::Text => FieldValue::Text(value.clone()),
                FieldKind::Date => match NaiveDate::parse_from_str(value.trim(), DATE_FORMAT) {
                    Ok(d) => FieldValue::Date(d),
                    Err(_) => FieldValue::Text(value.clone()),
                },
            };
            (name.clone(), typed)
        })
        .collect();
    Record { fields }
}

// ---------------------------------------------------------------------------
// Record – one typed row
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("missing field '{0}'")]
    MissingField(String),
    #[error("field '{field}' is not a number: {value}")]
    InvalidNumber { field: String, value: String },
    #[error("field '{field}' is not a YYYY-MM-DD date: {value}")]
    InvalidDate { field: String, value: String },
}

/// A coerced row. Immutable once built.
///
/// Fields are keyed by name and iterate alphabetically; file column order
/// lives in [`RawTable::headers`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Numeric field; `NaN` when the cell did not parse.
    pub fn number(&self, field: &str) -> Result<f64, RecordError> {
        let value = self.require(field)?;
        Ok(value
            .as_f64()
            .unwrap_or_else(|| parse_number(&value.to_string())))
    }

    /// Numeric field that must hold a whole number, such as a year.
    pub fn integer(&self, field: &str) -> Result<i32, RecordError> {
        let v = self.number(field)?;
        if v.is_finite() && v.fract() == 0.0 && v.abs() <= i32::MAX as f64 {
            Ok(v as i32)
        } else {
            Err(RecordError::InvalidNumber {
                field: field.to_string(),
                value: self.text(field)?,
            })
        }
    }

    /// Any field as text; numbers and dates are formatted back.
    pub fn text(&self, field: &str) -> Result<String, RecordError> {
        let value = self.require(field)?;
        Ok(value.as_str().map_or_else(|| value.to_string(), str::to_string))
    }

    pub fn date(&self, field: &str) -> Result<NaiveDate, RecordError> {
        let value = self.require(field)?;
        value.as_date().ok_or_else(|| RecordError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    fn require(&self, field: &str) -> Result<&FieldValue, RecordError> {
        self.fields
            .get(field)
            .ok_or_else(|| RecordError::MissingField(field.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn coerces_by_schema() {
        let schema = Schema::new(&[("n", FieldKind::Number), ("d", FieldKind::Date)]);
        let rec = coerce(&raw(&[("n", " 42.5 "), ("d", "2015-12-31"), ("t", "x")]), &schema);

        assert_eq!(rec.number("n"), Ok(42.5));
        assert_eq!(rec.date("d"), Ok(NaiveDate::from_ymd_opt(2015, 12, 31).unwrap()));
        assert_eq!(rec.get("t"), Some(&FieldValue::Text("x".into())));
    }

    #[test]
    fn malformed_numbers_become_nan() {
        let schema = Schema::new(&[("a", FieldKind::Number), ("b", FieldKind::Number)]);
        let rec = coerce(&raw(&[("a", "abc"), ("b", "")]), &schema);

        assert!(rec.number("a").unwrap().is_nan());
        assert!(rec.number("b").unwrap().is_nan());
    }

    #[test]
    fn integer_rejects_nan_and_fractions() {
        let schema = Schema::new(&[("y", FieldKind::Number), ("z", FieldKind::Number)]);
        let rec = coerce(&raw(&[("y", "20x"), ("z", "2020.5")]), &schema);

        assert!(matches!(rec.integer("y"), Err(RecordError::InvalidNumber { .. })));
        assert!(matches!(rec.integer("z"), Err(RecordError::InvalidNumber { .. })));
        assert_eq!(rec.integer("missing"), Err(RecordError::MissingField("missing".into())));
    }

    #[test]
    fn text_reads_back_every_kind() {
        let schema = Schema::new(&[("n", FieldKind::Number), ("d", FieldKind::Date)]);
        let rec = coerce(&raw(&[("n", "7"), ("d", "2015-12-31"), ("t", "sun")]), &schema);

        assert_eq!(rec.text("t"), Ok("sun".to_string()));
        assert_eq!(rec.text("n"), Ok("7".to_string()));
        assert_eq!(rec.text("d"), Ok("2015-12-31".to_string()));
        assert_eq!(rec.get("t").and_then(FieldValue::as_str), Some("sun"));
        assert_eq!(rec.get("n").and_then(FieldValue::as_date), None);
    }

    #[test]
    fn bad_dates_are_reported() {
        let schema = Schema::new(&[("d", FieldKind::Date)]);
        let rec = coerce(&raw(&[("d", "31/12/2015")]), &schema);

        assert!(matches!(rec.date("d"), Err(RecordError::InvalidDate { .. })));
    }
}
