//! Check command: Explain how individual paths are treated

mod run;

pub use run::{check_path, run, PathCheck};
