//! Output writers for report data.
//!
//! This module handles:
//! - Rendering summaries, aggregates and hot lines as fixed-column text
//! - Writing text reports to disk
//! - JSON reports (write and read back)

pub mod json;
pub mod report;
pub mod schema;
pub mod text;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

// Re-export main functions
pub use json::{read_report, write_report};
pub use report::{render_aggregate, render_hot_lines, render_summary};
pub use schema::{Report, ReportBody};
pub use text::write_text;

/// Validate that output path is writable
///
/// **Public** - shared by the JSON and text writers
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create missing parent directories of `path`
fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
