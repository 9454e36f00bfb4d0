pub mod export;
pub mod sink;
pub mod store;
