//! CLI commands

pub mod check;
pub mod languages;
pub mod scan;
pub mod types;

pub use types::{Commands, FilterArgs, OutputFormat, ScanArgs};
