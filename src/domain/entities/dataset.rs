use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// One scalar cell. Serializes as a plain JSON scalar; integral numbers
/// serialize without a decimal point, matching `render_number`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Number(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    serializer.serialize_i64(*value as i64)
                } else {
                    serializer.serialize_f64(*value)
                }
            }
            CellValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl CellValue {
    pub fn render(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(value) => render_number(*value),
            CellValue::Text(text) => text.clone(),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Natural ordering within one runtime type. Mixed-type and null pairs
    /// compare equal, so ordering inside heterogeneous columns is unspecified.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

pub fn render_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

pub type Row = BTreeMap<String, CellValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    NoColumns,
    DuplicateColumn(String),
    UnknownRowKey { row: usize, key: String },
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::NoColumns => write!(f, "dataset has no columns"),
            DatasetError::DuplicateColumn(name) => {
                write!(f, "duplicate column name: {name}")
            }
            DatasetError::UnknownRowKey { row, key } => {
                write!(f, "row {row} holds key {key:?} that is not a column")
            }
        }
    }
}

impl std::error::Error for DatasetError {}

/// One query result: ordered columns plus rows keyed by column name.
/// Treated as immutable input for the lifetime of the result.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Fails fast on a malformed shape instead of rendering garbage:
    /// columns must be non-empty and unique, row keys must be columns.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self, DatasetError> {
        if columns.is_empty() {
            return Err(DatasetError::NoColumns);
        }
        for (idx, name) in columns.iter().enumerate() {
            if columns[..idx].contains(name) {
                return Err(DatasetError::DuplicateColumn(name.clone()));
            }
        }
        for (row_idx, row) in rows.iter().enumerate() {
            if let Some(key) = row.keys().find(|key| !columns.contains(key)) {
                return Err(DatasetError::UnknownRowKey {
                    row: row_idx,
                    key: key.clone(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell rendered for display; missing keys render empty.
    pub fn cell_text(row: &Row, column: &str) -> String {
        row.get(column).map(CellValue::render).unwrap_or_default()
    }
}
