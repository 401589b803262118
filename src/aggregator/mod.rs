//! Reduction of analysis results into reports.
//!
//! This module transforms finished analyses into:
//! - Per-run symbol summaries (instruction, memory and address tables)
//! - Cross-run quartile aggregates
//! - Hot source lines of a single function

pub mod hot_lines;
pub mod quartiles;
pub mod summary;

// Re-export main types and functions
pub use hot_lines::{hot_lines, HotLine};
pub use quartiles::{Aggregate, AggregateAccess, AggregateInstr, AggregateTotals, Quartiles};
pub use summary::{percent, AccessStats, InstrStats, Summary, Totals};
