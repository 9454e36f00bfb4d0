use crate::domain::entities::dataset::{CellValue, Dataset, Row};

/// Rows beyond this cap are never charted.
pub const CHART_ROW_CAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub column: String,
    pub hue: f64,
}

impl ChartSeries {
    /// Deterministic, evenly spaced series color.
    pub fn color(&self) -> String {
        format!("hsl({}, 70%, 50%)", self.hue)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub category: String,
    pub values: Vec<f64>,
}

/// Numeric-only view of a dataset for the bar/line chart. Derived per call,
/// never stored; both chart variants share one projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartProjection {
    pub category_column: String,
    pub series: Vec<ChartSeries>,
    pub points: Vec<ChartPoint>,
}

impl ChartProjection {
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.column.as_str()).collect()
    }
}

/// Category axis is always the first column. A column is chart-eligible iff
/// every row of the entire dataset holds a numeric value for it, so a
/// zero-row dataset projects no series. Points come from the first
/// CHART_ROW_CAP rows in original dataset order; sorting and pagination
/// never reach the chart.
pub fn project(dataset: &Dataset) -> ChartProjection {
    let category_column = dataset.columns()[0].clone();

    let numeric: Vec<String> = if dataset.rows().is_empty() {
        Vec::new()
    } else {
        dataset
            .columns()
            .iter()
            .filter(|column| {
                dataset
                    .rows()
                    .iter()
                    .all(|row| row.get(*column).is_some_and(CellValue::is_number))
            })
            .cloned()
            .collect()
    };

    let series: Vec<ChartSeries> = numeric
        .iter()
        .enumerate()
        .map(|(index, column)| ChartSeries {
            column: column.clone(),
            hue: index as f64 * 360.0 / numeric.len() as f64,
        })
        .collect();

    let points = dataset
        .rows()
        .iter()
        .take(CHART_ROW_CAP)
        .map(|row| chart_point(row, &category_column, &numeric))
        .collect();

    ChartProjection {
        category_column,
        series,
        points,
    }
}

fn chart_point(row: &Row, category_column: &str, numeric: &[String]) -> ChartPoint {
    ChartPoint {
        category: Dataset::cell_text(row, category_column),
        values: numeric
            .iter()
            .map(|column| {
                row.get(column)
                    .and_then(CellValue::as_number)
                    .unwrap_or(0.0)
            })
            .collect(),
    }
}
