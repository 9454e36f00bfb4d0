use crate::domain::entities::query::SavedQuery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Message(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for StoreError {}

pub trait QueryStore: Send + Sync {
    fn load(&self) -> Result<Vec<SavedQuery>, StoreError>;
    fn save(&self, queries: &[SavedQuery]) -> Result<(), StoreError>;
}
