use crate::domain::entities::dataset::{Dataset, Row};

const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN_LEFT: f64 = 40.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 40.0;
// Top band kept free for a title area.
const MARGIN_TOP: f64 = 60.0;
const FONT_SIZE: f64 = 8.0;
const LINE_HEIGHT: f64 = 12.0;

/// Fixed-font tabular document, A4. Unlike the JSON and XLSX exports the
/// header and every body row follow `columns` order; the header repeats on
/// each page. The writer emits uncompressed content streams and a manual
/// xref table, which every PDF reader accepts.
pub fn to_pdf(dataset: &Dataset) -> Vec<u8> {
    let streams = page_streams(dataset);
    let page_count = streams.len();

    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets: Vec<usize> = Vec::new();

    let kids: Vec<String> = (0..page_count)
        .map(|page| format!("{} 0 R", 4 + 2 * page))
        .collect();
    push_object(
        &mut out,
        &mut offsets,
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
    );
    push_object(
        &mut out,
        &mut offsets,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        ),
    );
    push_object(
        &mut out,
        &mut offsets,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    );

    for (page, stream) in streams.iter().enumerate() {
        push_object(
            &mut out,
            &mut offsets,
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                5 + 2 * page
            ),
        );
        push_object(
            &mut out,
            &mut offsets,
            format!(
                "<< /Length {} >>\nstream\n{stream}\nendstream",
                stream.len()
            ),
        );
    }

    let xref_offset = out.len();
    let object_count = offsets.len();
    out.extend_from_slice(format!("xref\n0 {}\n", object_count + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            object_count + 1
        )
        .as_bytes(),
    );
    out
}

fn push_object(out: &mut Vec<u8>, offsets: &mut Vec<usize>, body: String) {
    offsets.push(out.len());
    let number = offsets.len();
    out.extend_from_slice(format!("{number} 0 obj\n{body}\nendobj\n").as_bytes());
}

fn page_streams(dataset: &Dataset) -> Vec<String> {
    let columns = dataset.columns();
    let usable_lines = ((PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) / LINE_HEIGHT) as usize;
    let rows_per_page = usable_lines.saturating_sub(1).max(1);

    let chunks: Vec<&[Row]> = if dataset.rows().is_empty() {
        vec![&[][..]]
    } else {
        dataset.rows().chunks(rows_per_page).collect()
    };

    chunks
        .iter()
        .map(|chunk| {
            let mut stream = format!("BT\n/F1 {FONT_SIZE} Tf\n");
            let mut y = PAGE_HEIGHT - MARGIN_TOP;
            write_line(&mut stream, y, &columns.to_vec());
            for row in *chunk {
                y -= LINE_HEIGHT;
                let cells: Vec<String> = columns
                    .iter()
                    .map(|column| Dataset::cell_text(row, column))
                    .collect();
                write_line(&mut stream, y, &cells);
            }
            stream.push_str("ET");
            stream
        })
        .collect()
}

fn write_line(stream: &mut String, y: f64, cells: &[String]) {
    let column_width = (PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT) / cells.len().max(1) as f64;
    for (index, cell) in cells.iter().enumerate() {
        let x = MARGIN_LEFT + index as f64 * column_width;
        stream.push_str(&format!(
            "1 0 0 1 {x:.2} {y:.2} Tm ({}) Tj\n",
            escape_text(cell)
        ));
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            '\n' | '\r' => escaped.push(' '),
            other => escaped.push(other),
        }
    }
    escaped
}
