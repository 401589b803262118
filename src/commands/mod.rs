//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod aggregate;
pub mod hotlines;
pub mod models;
pub mod summarize;
pub mod utils;

// Re-export main command functions
pub use aggregate::{execute_aggregate, run_paths, summarize_runs};
pub use hotlines::execute_hotlines;
pub use models::{AggregateArgs, HotLinesArgs, SummaryArgs, SymbolArgs};
pub use summarize::{execute_summary, summarize_file};
pub use utils::{display_version, validate_report_file};
