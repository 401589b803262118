//! Hot-lines command implementation.
//!
//! Lists the source lines of one function by execution count. Source lines
//! come from the symbol table, so without an image every address lands on
//! the `??` line.

use super::models::HotLinesArgs;
use crate::aggregator::{hot_lines, HotLine};
use crate::analysis::SourceLines;
use crate::output::{render_hot_lines, write_report, Report, ReportBody};
use crate::parser::Parser;
use anyhow::{Context, Result};
use log::{info, warn};

/// Execute the hotlines command
///
/// **Public** - main entry point called from main.rs
pub fn execute_hotlines(args: HotLinesArgs) -> Result<Vec<HotLine>> {
    let table = args.symbols.table();
    if table.is_none() {
        warn!("No symbol image given, source lines are unavailable");
    }

    let mut lines = SourceLines::for_function(args.function.as_str());
    let mut parser = Parser::new();
    if let Some(table) = &table {
        parser = parser.with_symbols(table);
    }
    parser.add_analysis(&mut lines);
    parser
        .load(&args.trace)
        .with_context(|| format!("Failed to parse trace {}", args.trace.display()))?;
    drop(parser);

    let hot = hot_lines(&lines);
    if hot.is_empty() {
        warn!("Function {} never executed", args.function);
    }

    print!("{}", render_hot_lines(&hot, args.symbols.base));

    if let Some(json_path) = &args.output_json {
        let report = Report::new(
            vec![args.trace.display().to_string()],
            ReportBody::HotLines {
                function: args.function.clone(),
                lines: hot.clone(),
            },
        );
        write_report(&report, json_path).context("Failed to write hot lines JSON")?;
        info!("✓ Hot lines written to: {}", json_path.display());
    }

    Ok(hot)
}

/// Validate hotlines arguments
pub fn validate_args(args: &HotLinesArgs) -> Result<()> {
    if args.function.trim().is_empty() {
        anyhow::bail!("Function name cannot be empty");
    }

    if !args.trace.is_file() {
        anyhow::bail!("Trace file not found: {}", args.trace.display());
    }

    Ok(())
}
