use anyhow::{Context, Result};

use crate::domain::entities::dataset::Dataset;

/// Pretty-printed row array, 2-space indentation. Object key order is
/// whatever the row map holds; `columns` order is not enforced here.
pub fn to_json(dataset: &Dataset) -> Result<String> {
    serde_json::to_string_pretty(dataset.rows()).context("failed to serialize rows to json")
}
