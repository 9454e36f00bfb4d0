use serde::{Deserialize, Serialize};

use crate::domain::entities::dataset::Dataset;

/// A canned query shipped with the app, paired with its mock result.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleQuery {
    pub name: String,
    pub description: String,
    pub query: String,
    pub results: Dataset,
}

/// A user-named query persisted across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub name: String,
    pub query: String,
    pub saved_at: String,
}

/// One sidebar entry, canned or saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub name: String,
    pub description: String,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub query: String,
    pub timestamp: String,
    pub row_count: usize,
}

/// Case-insensitive search over entry names and query bodies.
pub fn filter_entries(entries: &[LibraryEntry], term: &str) -> Vec<LibraryEntry> {
    let needle = term.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            entry.name.to_lowercase().contains(&needle)
                || entry.query.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
