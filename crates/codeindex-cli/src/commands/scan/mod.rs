//! Scan command: Scan a repository and print its records

mod run;

pub use run::{run, write_report};
