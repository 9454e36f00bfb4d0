use std::fs;
use std::sync::Mutex;

use rfd::FileDialog;

use crate::usecase::ports::sink::{ArtifactSink, SinkError, SinkReceipt};

/// Delivers artifacts through a native save dialog and the system clipboard.
pub struct DesktopSink {
    clipboard: Mutex<Option<arboard::Clipboard>>,
}

impl DesktopSink {
    pub fn new() -> Self {
        Self {
            clipboard: Mutex::new(None),
        }
    }
}

impl Default for DesktopSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactSink for DesktopSink {
    fn save_file(&self, default_name: &str, bytes: &[u8]) -> Result<SinkReceipt, SinkError> {
        let Some(path) = FileDialog::new().set_file_name(default_name).save_file() else {
            return Ok(SinkReceipt::Cancelled);
        };
        fs::write(&path, bytes)
            .map_err(|err| SinkError::Message(format!("failed to write {}: {err}", path.display())))?;
        Ok(SinkReceipt::Written(path.display().to_string()))
    }

    fn set_clipboard(&self, text: &str) -> Result<(), SinkError> {
        let mut guard = self
            .clipboard
            .lock()
            .map_err(|_| SinkError::Message("clipboard handle is poisoned".to_string()))?;
        if guard.is_none() {
            *guard = Some(
                arboard::Clipboard::new()
                    .map_err(|err| SinkError::Message(format!("clipboard unavailable: {err}")))?,
            );
        }
        guard
            .as_mut()
            .map(|clipboard| clipboard.set_text(text.to_string()))
            .transpose()
            .map_err(|err| SinkError::Message(format!("failed to set clipboard: {err}")))?;
        Ok(())
    }
}
