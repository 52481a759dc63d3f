//! Languages command: Print the extension table

use std::io::{self, Write};

use anyhow::Result;

use crate::commands::types::language_table;

/// Run the languages command
///
/// # Errors
/// Returns an error if an override is malformed or stdout cannot be written.
pub fn run(overrides: &[String]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_table(&mut out, overrides)
}

fn write_table<W: Write>(out: &mut W, overrides: &[String]) -> Result<()> {
    let table = language_table(overrides)?;
    for (ext, language) in table.entries() {
        writeln!(out, "{ext}\t{language}")?;
    }
    Ok(())
}
