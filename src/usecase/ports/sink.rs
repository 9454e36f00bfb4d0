#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    Message(String),
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for SinkError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkReceipt {
    Written(String),
    Cancelled,
}

/// Delivery side of an export. Formatting never depends on the destination,
/// so the formatters stay testable without a desktop environment.
pub trait ArtifactSink: Send + Sync {
    /// Offers `default_name` as the artifact file name. A declined dialog is
    /// a cancellation, not an error.
    fn save_file(&self, default_name: &str, bytes: &[u8]) -> Result<SinkReceipt, SinkError>;

    fn set_clipboard(&self, text: &str) -> Result<(), SinkError>;
}
