//! Node-specific filters and typed records

pub mod process;

pub use process::{ProcessFilters, ProcessNode};
