//! Aggregate command implementation.
//!
//! Summarizes the runs `PREFIX.1` to `PREFIX.N` independently and reduces
//! them to quartile bands. With `parallel`, each run is parsed on its own
//! scoped thread; the symbol table is the only shared state.

use super::models::AggregateArgs;
use super::summarize::summarize_file;
use super::utils::emit_text;
use crate::aggregator::{Aggregate, Summary};
use crate::output::{render_aggregate, write_report, Report, ReportBody};
use crate::symbols::SymbolTable;
use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

/// Paths of the numbered run files, `PREFIX.1` first
pub fn run_paths(prefix: &Path, runs: usize) -> Vec<PathBuf> {
    (1..=runs)
        .map(|i| {
            let mut name = prefix.as_os_str().to_owned();
            name.push(format!(".{}", i));
            PathBuf::from(name)
        })
        .collect()
}

/// Summarize every run, preserving run order
///
/// **Public** - used by execute_aggregate and tests
pub fn summarize_runs(
    paths: &[PathBuf],
    symbols: Option<&SymbolTable>,
    parallel: bool,
) -> Result<Vec<Summary>> {
    let summarize = |path: &PathBuf| {
        debug!("Summarizing run {}", path.display());
        summarize_file(path, symbols)
            .with_context(|| format!("Failed to parse trace {}", path.display()))
    };

    if !parallel {
        return paths.iter().map(summarize).collect();
    }

    thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|path| (path, scope.spawn(move || summarize(path))))
            .collect();

        handles
            .into_iter()
            .map(|(path, handle)| -> Result<Summary> {
                handle
                    .join()
                    .map_err(|_| anyhow!("Worker for {} panicked", path.display()))?
            })
            .collect()
    })
}

/// Execute the aggregate command
///
/// **Public** - main entry point called from main.rs
pub fn execute_aggregate(args: AggregateArgs) -> Result<Aggregate> {
    let start_time = Instant::now();
    let paths = run_paths(&args.prefix, args.runs);
    info!(
        "Aggregating {} runs of {}{}",
        paths.len(),
        args.prefix.display(),
        if args.parallel { " in parallel" } else { "" }
    );

    let table = args.symbols.table();
    let sums = summarize_runs(&paths, table.as_ref(), args.parallel)?;
    let aggregate = Aggregate::new(&sums).context("Failed to aggregate runs")?;

    emit_text(&render_aggregate(&aggregate), args.output_text.as_deref())?;

    if let Some(json_path) = &args.output_json {
        let report = Report::new(
            paths.iter().map(|p| p.display().to_string()).collect(),
            ReportBody::Aggregate(aggregate.clone()),
        );
        write_report(&report, json_path).context("Failed to write aggregate JSON")?;
        info!("✓ Aggregate written to: {}", json_path.display());
    }

    info!(
        "Aggregate completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(aggregate)
}

/// Validate aggregate arguments
pub fn validate_args(args: &AggregateArgs) -> Result<()> {
    if args.prefix.as_os_str().is_empty() {
        anyhow::bail!("Trace prefix cannot be empty");
    }

    if args.runs == 0 {
        anyhow::bail!("Number of runs must be greater than 0");
    }

    for path in run_paths(&args.prefix, args.runs) {
        if !path.is_file() {
            anyhow::bail!("Run file not found: {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_paths() {
        let paths = run_paths(Path::new("out/debug.log"), 3);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("out/debug.log.1"),
                PathBuf::from("out/debug.log.2"),
                PathBuf::from("out/debug.log.3"),
            ]
        );
    }

    #[test]
    fn test_validate_args_zero_runs() {
        let args = AggregateArgs {
            prefix: "trace".into(),
            runs: 0,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_missing_run() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("trace");
        std::fs::write(dir.path().join("trace.1"), "").unwrap();

        let mut args = AggregateArgs {
            prefix,
            runs: 1,
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());

        args.runs = 2;
        assert!(validate_args(&args).is_err());
    }
}
