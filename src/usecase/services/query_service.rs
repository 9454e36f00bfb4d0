use crate::domain::entities::dataset::{CellValue, Dataset, Row};
use crate::domain::entities::query::SampleQuery;

const LARGE_DATASET_MARKER: &str = "--large-dataset";
const HUGE_DATASET_MARKER: &str = "--huge-dataset";
const LARGE_DATASET_ROWS: usize = 1_000;
const HUGE_DATASET_ROWS: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryRun {
    /// None only when the library itself holds no queries to fall back on.
    pub dataset: Option<Dataset>,
    pub matched: Option<String>,
}

/// Simulated execution: a whole-text, case-insensitive match against the
/// canned library. There is no SQL parsing; an unknown query falls back to
/// the first sample's result so the viewer always has data, and an empty
/// library degrades to no dataset at all.
pub struct QueryService {
    library: Vec<SampleQuery>,
}

impl QueryService {
    pub fn new(library: Vec<SampleQuery>) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &[SampleQuery] {
        &self.library
    }

    pub fn run_query(&self, query: &str) -> QueryRun {
        let normalized = query.trim().to_lowercase();
        let matched = self
            .library
            .iter()
            .find(|sample| sample.query.trim().to_lowercase() == normalized);

        let (dataset, name) = match matched {
            Some(sample) => (Some(sample.results.clone()), Some(sample.name.clone())),
            None => (
                self.library.first().map(|sample| sample.results.clone()),
                None,
            ),
        };

        let dataset = dataset.map(|dataset| {
            if query.contains(HUGE_DATASET_MARKER) {
                inflate(&dataset, HUGE_DATASET_ROWS)
            } else if query.contains(LARGE_DATASET_MARKER) {
                inflate(&dataset, LARGE_DATASET_ROWS)
            } else {
                dataset
            }
        });

        QueryRun {
            dataset,
            matched: name,
        }
    }
}

/// Cycles the base rows up to `target` rows. An existing `id` column is
/// rewritten 1..=target so the inflated rows stay distinguishable.
fn inflate(dataset: &Dataset, target: usize) -> Dataset {
    if dataset.rows().is_empty() {
        return dataset.clone();
    }
    let has_id = dataset.columns().iter().any(|column| column == "id");
    let rows: Vec<Row> = (0..target)
        .map(|index| {
            let mut row = dataset.rows()[index % dataset.row_count()].clone();
            if has_id {
                row.insert("id".to_string(), CellValue::from((index + 1) as i64));
            }
            row
        })
        .collect();
    Dataset::new(dataset.columns().to_vec(), rows)
        .unwrap_or_else(|_| dataset.clone())
}
