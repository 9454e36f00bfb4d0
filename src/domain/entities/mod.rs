pub mod chart;
pub mod dataset;
pub mod query;
pub mod view;
