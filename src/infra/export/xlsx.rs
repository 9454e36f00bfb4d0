use std::collections::BTreeSet;
use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::domain::entities::dataset::{render_number, CellValue, Dataset, Row};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Results" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Single-sheet workbook named "Results". Headers are derived from the row
/// keys, not from `columns` (same column-order caveat as the JSON export);
/// a dataset with no rows yields a workbook with an empty sheet.
pub fn to_xlsx(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", WORKBOOK.to_string()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(dataset.rows())),
    ];

    for (name, body) in parts {
        zip.start_file(name, options)
            .with_context(|| format!("failed to start workbook part {name}"))?;
        zip.write_all(body.as_bytes())
            .with_context(|| format!("failed to write workbook part {name}"))?;
    }

    let cursor = zip.finish().context("failed to finish workbook archive")?;
    Ok(cursor.into_inner())
}

fn sheet_xml(rows: &[Row]) -> String {
    let headers: Vec<String> = rows
        .iter()
        .flat_map(|row| row.keys().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    if !rows.is_empty() {
        xml.push_str("<row>");
        for header in &headers {
            xml.push_str(&text_cell(header));
        }
        xml.push_str("</row>");
        for row in rows {
            xml.push_str("<row>");
            for header in &headers {
                xml.push_str(&value_cell(row.get(header)));
            }
            xml.push_str("</row>");
        }
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn value_cell(value: Option<&CellValue>) -> String {
    match value {
        Some(CellValue::Number(number)) => format!("<c><v>{}</v></c>", render_number(*number)),
        Some(CellValue::Text(text)) => text_cell(text),
        // An empty cell still occupies its column so later cells stay aligned.
        Some(CellValue::Null) | None => "<c/>".to_string(),
    }
}

fn text_cell(text: &str) -> String {
    format!("<c t=\"inlineStr\"><is><t>{}</t></is></c>", escape(text))
}
