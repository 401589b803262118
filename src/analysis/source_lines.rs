//! Instruction addresses executed per source line.

use super::{Analysis, OrderedCounts};
use crate::parser::schema::Instruction;
use std::collections::HashMap;

/// Address occurrence counts keyed by source line
pub type LineCounts = OrderedCounts<Option<String>, HashMap<Option<u64>, u64>>;

/// Counts instruction addresses per source line, optionally for one symbol
#[derive(Debug, Clone, Default)]
pub struct SourceLines {
    function: Option<String>,
    lines: LineCounts,
}

impl SourceLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only count instructions whose symbol is `function`
    pub fn for_function(function: impl Into<String>) -> Self {
        Self {
            function: Some(function.into()),
            lines: LineCounts::default(),
        }
    }

    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }
}

impl Analysis for SourceLines {
    type Results = LineCounts;

    fn on_instruction(&mut self, instr: &Instruction) {
        if let Some(function) = &self.function {
            if instr.symbol.as_ref() != Some(function) {
                return;
            }
        }
        *self
            .lines
            .entry(&instr.source_line)
            .entry(instr.address)
            .or_insert(0) += 1;
    }

    fn results(&self) -> &LineCounts {
        &self.lines
    }
}
