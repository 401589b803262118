//! `addr2line` subprocess resolver.
//!
//! Runs `addr2line -f -e <image> <offset>` and reads the function name from
//! the first output line and `file:line` from the second.

use super::table::{Resolution, SymbolResolver};
use crate::utils::config::{ADDR2LINE_ENV, DEFAULT_ADDR2LINE};
use crate::utils::error::ResolveError;
use log::trace;
use std::path::Path;
use std::process::Command;

/// Resolver backed by the binutils `addr2line` tool
#[derive(Debug, Clone)]
pub struct Addr2Line {
    tool: String,
}

impl Default for Addr2Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Addr2Line {
    /// Use `$EXECTRACE_ADDR2LINE`, falling back to `addr2line` on `PATH`
    pub fn new() -> Self {
        let tool = std::env::var(ADDR2LINE_ENV).unwrap_or_else(|_| DEFAULT_ADDR2LINE.to_string());
        Self { tool }
    }

    pub fn with_tool(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }
}

impl SymbolResolver for Addr2Line {
    fn resolve(&self, image: &Path, offset: u64) -> Result<Resolution, ResolveError> {
        let output = Command::new(&self.tool)
            .arg("-f")
            .arg("-e")
            .arg(image)
            .arg(format!("{:#x}", offset))
            .output()
            .map_err(|source| ResolveError::Spawn {
                tool: self.tool.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ResolveError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        trace!("{} {:#x} -> {:?}", self.tool, offset, stdout);

        parse_output(offset, &stdout)
    }
}

/// Parse `addr2line -f` output for a single address
///
/// **Public** - exposed for testing without the external tool
pub fn parse_output(offset: u64, stdout: &str) -> Result<Resolution, ResolveError> {
    let mut lines = stdout.lines().map(str::trim);

    let symbol = match lines.next() {
        Some(line) if !line.is_empty() => line.to_string(),
        _ => return Err(ResolveError::EmptyOutput { offset }),
    };

    let source_line = lines
        .next()
        .filter(|line| !line.is_empty())
        .map(str::to_string);

    Ok(Resolution {
        symbol: Some(symbol),
        source_line,
    })
}
