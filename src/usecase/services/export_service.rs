use std::sync::Arc;

use crate::domain::entities::dataset::{Dataset, Row};
use crate::domain::entities::view::Selection;
use crate::infra::export::{clipboard, csv, json, pdf, xlsx};
use crate::usecase::ports::sink::{ArtifactSink, SinkError, SinkReceipt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Csv,
        ExportFormat::Json,
        ExportFormat::Xlsx,
        ExportFormat::Pdf,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "query_results.csv",
            ExportFormat::Json => "query_results.json",
            ExportFormat::Xlsx => "query_results.xlsx",
            ExportFormat::Pdf => "query_results.pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
            ExportFormat::Xlsx => "Excel",
            ExportFormat::Pdf => "PDF",
        }
    }
}

/// Turns a dataset into one of the export artifacts and hands it to the
/// sink. Returns the confirmation line for the status bar; a delivery
/// failure comes back as a reported, non-fatal error.
pub struct ExportService {
    sink: Arc<dyn ArtifactSink>,
}

impl ExportService {
    pub fn new(sink: Arc<dyn ArtifactSink>) -> Self {
        Self { sink }
    }

    pub fn export(&self, dataset: &Dataset, format: ExportFormat) -> Result<String, SinkError> {
        let bytes = match format {
            ExportFormat::Csv => csv::to_csv(dataset).into_bytes(),
            ExportFormat::Json => json::to_json(dataset)
                .map_err(|err| SinkError::Message(err.to_string()))?
                .into_bytes(),
            ExportFormat::Xlsx => {
                xlsx::to_xlsx(dataset).map_err(|err| SinkError::Message(err.to_string()))?
            }
            ExportFormat::Pdf => pdf::to_pdf(dataset),
        };

        match self.sink.save_file(format.file_name(), &bytes)? {
            SinkReceipt::Written(_) => {
                Ok(format!("Results exported to {}!", format.label()))
            }
            SinkReceipt::Cancelled => Ok("Export cancelled".to_string()),
        }
    }

    pub fn copy_selected(
        &self,
        columns: &[String],
        page_rows: &[Row],
        selection: &Selection,
    ) -> Result<String, SinkError> {
        let text = clipboard::selected_rows_tsv(columns, page_rows, selection);
        self.sink.set_clipboard(&text)?;
        Ok("Selected rows copied to clipboard!".to_string())
    }

    pub fn copy_text(&self, text: &str) -> Result<String, SinkError> {
        self.sink.set_clipboard(text)?;
        Ok("Query copied to clipboard!".to_string())
    }
}
