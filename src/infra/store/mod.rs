pub mod saved_queries;
