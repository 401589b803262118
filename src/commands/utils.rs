use crate::output::{read_report, write_text, ReportBody};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Validate a JSON report file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)
        .with_context(|| format!("Failed to read report {}", file_path.display()))?;

    if report.version != SCHEMA_VERSION {
        anyhow::bail!(
            "Unsupported report version {} (expected {})",
            report.version,
            SCHEMA_VERSION
        );
    }

    println!("✓ Valid {} report", report.kind());
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Sources: {}", report.source.join(", "));
    match &report.body {
        ReportBody::Summary(summary) => {
            println!("  Instructions: {}", summary.totals().instr);
            println!("  Symbols: {}", summary.instr().len());
        }
        ReportBody::Aggregate(aggregate) => {
            println!("  Runs: {}", aggregate.runs());
            println!("  Symbols: {}", aggregate.instr().len());
        }
        ReportBody::HotLines { function, lines } => {
            println!("  Function: {}", function);
            println!("  Lines: {}", lines.len());
        }
    }

    Ok(())
}

/// Print a rendered report, or write it to `path`
pub fn emit_text(text: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => write_text(text, path)
            .with_context(|| format!("Failed to write text report {}", path.display())),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

/// Display version information
pub fn display_version() {
    println!("exectrace v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Per-symbol instruction and memory statistics from simulator execution traces.");
}
