pub mod clipboard;
pub mod csv;
pub mod json;
pub mod pdf;
pub mod xlsx;
