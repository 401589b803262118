//! Plain text report writer.

use super::{create_parent_dirs, validate_path};
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a rendered text report to a file
///
/// **Public** - main entry point for text output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_text(content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing text report to: {}", output_path.display());

    validate_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "Text report written successfully ({} bytes, {:.2} KB)",
        content.len(),
        content.len() as f64 / 1024.0
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_text() {
        let temp_file = NamedTempFile::new().unwrap();

        write_text("\n1 total instructions\n", temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "\n1 total instructions\n");
    }

    #[test]
    fn test_write_text_to_directory_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(write_text("x", temp_dir.path()).is_err());
    }
}
