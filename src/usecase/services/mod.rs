pub mod export_service;
pub mod library_service;
pub mod query_service;
