//! Streaming parse pass over a trace file.
//!
//! The parser decodes one line at a time and hands each event to every
//! registered observer. Only the instruction currently receiving micro-ops
//! is kept in memory.

use super::line::{decode_instruction, decode_micro_op, SymbolExpr};
use super::schema::{Instruction, TraceEvent};
use crate::analysis::Observer;
use crate::symbols::SymbolTable;
use crate::utils::config::FIELD_DELIMITER;
use crate::utils::error::ParseError;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Counters for one completed pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Physical lines read, blank ones included
    pub lines: usize,
    pub instructions: usize,
    pub micro_ops: usize,

    /// Micro-ops seen before the first instruction of the file
    pub skipped_micro_ops: usize,
}

/// Trace parser fanning decoded events out to analyses
///
/// The symbol table and analyses are borrowed for the parser's lifetime;
/// drop the parser to read their results.
pub struct Parser<'a> {
    symbols: Option<&'a SymbolTable>,
    analyses: Vec<&'a mut dyn Observer>,
    current_symbol: Option<String>,
    line_no: usize,
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Parser<'a> {
    pub fn new() -> Self {
        Self {
            symbols: None,
            analyses: Vec::new(),
            current_symbol: None,
            line_no: 0,
        }
    }

    /// Resolve bare and symbolic addresses through `table`
    pub fn with_symbols(mut self, table: &'a SymbolTable) -> Self {
        self.symbols = Some(table);
        self
    }

    pub fn add_analysis(&mut self, analysis: &'a mut dyn Observer) {
        self.analyses.push(analysis);
    }

    /// Symbol of the most recent line that had one
    pub fn current_symbol(&self) -> Option<&str> {
        self.current_symbol.as_deref()
    }

    /// Parse a trace file from disk
    ///
    /// **Public** - main entry point for a single run
    ///
    /// # Errors
    /// * `ParseError::Io` - the file cannot be read
    /// * `ParseError::Format` / `MicroOpFormat` / `InvalidNumber` - malformed line
    /// * `ParseError::Symbol` - the symbol resolver failed
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<ParseStats, ParseError> {
        let path = path.as_ref();
        info!("Parsing trace: {}", path.display());

        let file = File::open(path)?;
        let stats = self.parse_reader(BufReader::new(file))?;

        info!(
            "Parsed {} instructions and {} micro-ops from {} lines",
            stats.instructions, stats.micro_ops, stats.lines
        );
        Ok(stats)
    }

    /// Parse every line of `reader`, stopping at the first malformed one
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<ParseStats, ParseError> {
        self.line_no = 0;
        let mut stats = ParseStats::default();
        let mut current: Option<Instruction> = None;

        for line in reader.lines() {
            let line = line?;
            stats.lines += 1;

            match self.parse_line(&line)? {
                None => {}
                Some(TraceEvent::Instruction(instr)) => {
                    stats.instructions += 1;
                    for analysis in self.analyses.iter_mut() {
                        analysis.instruction(&instr);
                    }
                    current = Some(instr);
                }
                Some(TraceEvent::MicroOp(op)) => {
                    let Some(owner) = current.as_mut() else {
                        warn!("Skipping micro-op before first instruction on line {}", self.line_no);
                        stats.skipped_micro_ops += 1;
                        continue;
                    };
                    stats.micro_ops += 1;
                    for analysis in self.analyses.iter_mut() {
                        analysis.micro_op(owner, &op);
                    }
                    owner.add_micro_op(op);
                }
            }
        }

        debug!("{:?}", stats);
        Ok(stats)
    }

    /// Decode one physical line; blank lines yield `None`
    ///
    /// Lines are numbered from 1 in the order they are passed in.
    pub fn parse_line(&mut self, line: &str) -> Result<Option<TraceEvent>, ParseError> {
        self.line_no += 1;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        let expr_field = fields.get(2).ok_or_else(|| ParseError::Format {
            line: self.line_no,
            text: line.to_string(),
        })?;
        let expr = SymbolExpr::parse(expr_field, self.line_no)?;

        let mut symbol = expr.symbol.clone();
        let mut source_line = None;
        match (expr.address, self.symbols) {
            (Some(address), Some(table)) => {
                let resolved = table.lookup(address)?;
                symbol = resolved.symbol;
                source_line = resolved.source_line;
                self.current_symbol = symbol.clone();
            }
            (Some(_), None) => symbol = self.current_symbol.clone(),
            (None, _) => {
                if symbol.is_some() {
                    self.current_symbol = symbol.clone();
                }
            }
        }

        if expr.is_micro_op() {
            return decode_micro_op(&fields, line, self.line_no)
                .map(|op| Some(TraceEvent::MicroOp(op)));
        }

        decode_instruction(&fields, &expr, symbol, source_line, self.line_no)
            .map(|instr| Some(TraceEvent::Instruction(instr)))
    }
}
