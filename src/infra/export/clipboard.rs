use crate::domain::entities::dataset::{Dataset, Row};
use crate::domain::entities::view::Selection;

/// Tab-separated text for the selected rows of the currently rendered page.
/// Positions are page-local; values follow `columns` order.
pub fn selected_rows_tsv(columns: &[String], page_rows: &[Row], selection: &Selection) -> String {
    selection
        .iter()
        .filter_map(|position| page_rows.get(*position))
        .map(|row| {
            columns
                .iter()
                .map(|column| Dataset::cell_text(row, column))
                .collect::<Vec<String>>()
                .join("\t")
        })
        .collect::<Vec<String>>()
        .join("\n")
}
