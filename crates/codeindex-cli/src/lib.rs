//! codeindex-cli library
//!
//! This module exposes the internal functionality of codeindex-cli for testing purposes.

#[doc(hidden)]
pub mod commands;

pub mod logging;

pub use commands::{Commands, OutputFormat};
