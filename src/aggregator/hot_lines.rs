//! Hot source lines of a single function.
//!
//! Groups the per-address counts of a [`SourceLines`] pass by source line,
//! hottest line first.

use crate::analysis::{Analysis, SourceLines};
use log::debug;
use serde::{Deserialize, Serialize};

/// Execution count of one source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotLine {
    /// `file:line`, `None` when the resolver had no line info
    pub line: Option<String>,
    pub count: u64,
    /// Instruction addresses attributed to the line, ascending
    pub addresses: Vec<u64>,
}

impl HotLine {
    /// Location with the directory part stripped (keeps the leading `/`)
    pub fn short_location(&self) -> &str {
        match self.line.as_deref() {
            Some(line) => line.rfind('/').map_or(line, |idx| &line[idx..]),
            None => "??",
        }
    }
}

/// Build the hot-line listing from a source line analysis
///
/// **Public** - main entry point for the hot-line report
pub fn hot_lines(lines: &SourceLines) -> Vec<HotLine> {
    let mut hot: Vec<HotLine> = lines
        .results()
        .iter()
        .map(|(line, addrs)| {
            let mut addresses: Vec<u64> = addrs.keys().flatten().copied().collect();
            addresses.sort_unstable();
            HotLine {
                line: line.clone(),
                count: addrs.values().sum(),
                addresses,
            }
        })
        .collect();

    hot.sort_by(|a, b| b.count.cmp(&a.count));
    debug!(
        "{} hot lines for {}",
        hot.len(),
        lines.function().unwrap_or("all symbols")
    );
    hot
}
