//! Scan command implementation

use std::io::{self, Write};

use anyhow::{Context, Result};
use codeindex_core::scanner::{ScanReport, Scanner};
use tracing::info;

use crate::commands::{OutputFormat, ScanArgs};

/// Run the scan command
///
/// # Errors
/// Returns an error if the configuration is invalid, the root cannot be
/// walked or stdout cannot be written.
pub fn run(args: &ScanArgs) -> Result<()> {
    let config = args.to_config()?;
    let scanner = Scanner::from_config(config).context("Invalid scanner configuration")?;
    let report = scanner
        .scan()
        .with_context(|| format!("Failed to scan {}", args.path.display()))?;

    if !report.failures.is_empty() {
        info!("{} files could not be indexed", report.failures.len());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report, args.format)?;
    out.flush()?;
    Ok(())
}

/// Write a report in the requested format
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn write_report<W: Write>(out: &mut W, report: &ScanReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Jsonl => {
            for record in &report.records {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
        }
        OutputFormat::Summary => write_summary(out, report)?,
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    writeln!(out, "Root: {}", report.root)?;
    if let Some(sha) = &report.commit_sha {
        writeln!(
            out,
            "Commit: {} ({})",
            sha,
            report.branch.as_deref().unwrap_or("detached")
        )?;
    }
    writeln!(
        out,
        "Files: {} ({} bytes)",
        report.records.len(),
        report.total_bytes()
    )?;
    for (language, count) in report.language_counts() {
        writeln!(out, "  {language:<12} {count}")?;
    }
    if !report.failures.is_empty() {
        writeln!(out, "Failures: {}", report.failures.len())?;
        for failure in &report.failures {
            writeln!(out, "  {}: {}", failure.path, failure.message)?;
        }
    }
    Ok(())
}
