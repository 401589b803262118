use crate::symbols::{Addr2Line, SymbolTable};
use crate::utils::config::DEFAULT_SYMBOL_BASE;
use std::path::PathBuf;

/// Where instruction addresses are resolved
///
/// **Public** - shared by every trace-reading command
#[derive(Debug, Clone)]
pub struct SymbolArgs {
    /// Debug image passed to addr2line (None = no resolution)
    pub image: Option<PathBuf>,

    /// Load address of the image
    pub base: u64,
}

impl Default for SymbolArgs {
    fn default() -> Self {
        Self {
            image: None,
            base: DEFAULT_SYMBOL_BASE,
        }
    }
}

impl SymbolArgs {
    /// Build an addr2line-backed table, if an image was given
    pub fn table(&self) -> Option<SymbolTable> {
        self.image
            .as_ref()
            .map(|image| SymbolTable::new(image.clone(), self.base, Addr2Line::new()))
    }
}

/// Arguments for the summary command
#[derive(Debug, Clone, Default)]
pub struct SummaryArgs {
    /// Trace file to summarize
    pub trace: PathBuf,

    pub symbols: SymbolArgs,

    /// Also write the summary as a JSON report
    pub output_json: Option<PathBuf>,

    /// Write the text report here instead of stdout
    pub output_text: Option<PathBuf>,
}

/// Arguments for the aggregate command
#[derive(Debug, Clone, Default)]
pub struct AggregateArgs {
    /// Run files are `PREFIX.1` to `PREFIX.runs`
    pub prefix: PathBuf,

    pub runs: usize,

    /// Parse runs on separate threads
    pub parallel: bool,

    pub symbols: SymbolArgs,

    pub output_json: Option<PathBuf>,

    pub output_text: Option<PathBuf>,
}

/// Arguments for the hotlines command
#[derive(Debug, Clone, Default)]
pub struct HotLinesArgs {
    pub trace: PathBuf,

    /// Function whose source lines are listed
    pub function: String,

    pub symbols: SymbolArgs,

    pub output_json: Option<PathBuf>,
}
