use std::sync::Arc;

use crate::domain::entities::query::{LibraryEntry, SampleQuery, SavedQuery};
use crate::usecase::ports::store::{QueryStore, StoreError};

/// Sidebar library: canned samples merged with the user's saved queries.
pub struct LibraryService {
    store: Arc<dyn QueryStore>,
}

impl LibraryService {
    pub fn new(store: Arc<dyn QueryStore>) -> Self {
        Self { store }
    }

    pub fn entries(&self, samples: &[SampleQuery]) -> Result<Vec<LibraryEntry>, StoreError> {
        let mut entries: Vec<LibraryEntry> = samples
            .iter()
            .map(|sample| LibraryEntry {
                name: sample.name.clone(),
                description: sample.description.clone(),
                query: sample.query.clone(),
            })
            .collect();
        for saved in self.store.load()? {
            entries.push(LibraryEntry {
                name: saved.name,
                description: "Custom saved query".to_string(),
                query: saved.query,
            });
        }
        Ok(entries)
    }

    pub fn save_query(&self, name: &str, query: &str, saved_at: String) -> Result<(), StoreError> {
        let mut saved = self.store.load()?;
        saved.push(SavedQuery {
            name: name.to_string(),
            query: query.to_string(),
            saved_at,
        });
        self.store.save(&saved)
    }
}
