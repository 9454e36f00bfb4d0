use crate::domain::entities::dataset::Dataset;

/// Header row is the plain column names; every data cell is wrapped in
/// literal double quotes. Embedded quote characters are written verbatim,
/// not escaped (see DESIGN.md for the recorded decision).
pub fn to_csv(dataset: &Dataset) -> String {
    let mut lines = Vec::with_capacity(dataset.row_count() + 1);
    lines.push(dataset.columns().join(","));
    for row in dataset.rows() {
        let cells: Vec<String> = dataset
            .columns()
            .iter()
            .map(|column| format!("\"{}\"", Dataset::cell_text(row, column)))
            .collect();
        lines.push(cells.join(","));
    }
    lines.join("\n")
}
