//! Summary command implementation.
//!
//! The summary command:
//! 1. Builds the symbol table (if an image was given)
//! 2. Parses the trace through SymbolIps and AccessedAddresses
//! 3. Builds the per-symbol summary
//! 4. Prints the text report and optionally writes JSON

use super::models::SummaryArgs;
use super::utils::emit_text;
use crate::aggregator::Summary;
use crate::analysis::{AccessedAddresses, SymbolIps};
use crate::output::{render_summary, write_report, Report, ReportBody};
use crate::parser::Parser;
use crate::symbols::SymbolTable;
use crate::utils::error::ParseError;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Parse one trace file and summarize it
///
/// **Public** - shared by the summary and aggregate commands
///
/// # Arguments
/// * `path` - Trace file
/// * `symbols` - Optional table resolving bare addresses
///
/// # Errors
/// Any `ParseError` of the pass; the file is abandoned at the first one
pub fn summarize_file(
    path: impl AsRef<Path>,
    symbols: Option<&SymbolTable>,
) -> Result<Summary, ParseError> {
    let mut ips = SymbolIps::new();
    let mut accesses = AccessedAddresses::new();

    let mut parser = Parser::new();
    if let Some(table) = symbols {
        parser = parser.with_symbols(table);
    }
    parser.add_analysis(&mut ips);
    parser.add_analysis(&mut accesses);
    let stats = parser.load(path)?;
    drop(parser);

    if stats.skipped_micro_ops > 0 {
        debug!("{} leading micro-ops skipped", stats.skipped_micro_ops);
    }

    Ok(Summary::new(&ips, &accesses))
}

/// Execute the summary command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The summary that was reported
pub fn execute_summary(args: SummaryArgs) -> Result<Summary> {
    let start_time = Instant::now();
    let table = args.symbols.table();

    let summary = summarize_file(&args.trace, table.as_ref())
        .with_context(|| format!("Failed to parse trace {}", args.trace.display()))?;

    if let Some(table) = &table {
        debug!("Resolved {} distinct addresses", table.cached());
    }

    emit_text(&render_summary(&summary), args.output_text.as_deref())?;

    if let Some(json_path) = &args.output_json {
        let report = Report::new(
            vec![args.trace.display().to_string()],
            ReportBody::Summary(summary.clone()),
        );
        write_report(&report, json_path).context("Failed to write summary JSON")?;
        info!("✓ Summary written to: {}", json_path.display());
    }

    info!(
        "Summary completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(summary)
}

/// Validate summary arguments
///
/// **Public** - can be called before execute_summary for early validation
pub fn validate_args(args: &SummaryArgs) -> Result<()> {
    if args.trace.as_os_str().is_empty() {
        anyhow::bail!("Trace file cannot be empty");
    }

    if !args.trace.is_file() {
        anyhow::bail!("Trace file not found: {}", args.trace.display());
    }

    if let Some(image) = &args.symbols.image {
        if !image.is_file() {
            anyhow::bail!("Symbol image not found: {}", image.display());
        }
    }

    Ok(())
}
