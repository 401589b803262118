//! Cross-run quartile aggregation.
//!
//! Every field of the per-run summaries is reduced to a
//! (lower quartile, median, upper quartile) triple using the
//! median-of-halves rule: the lower quartile is the median of the values
//! strictly below the midpoint, the upper quartile the median of the values
//! above it (the middle element is excluded for odd counts).

use super::summary::{AccessStats, InstrStats, Summary};
use crate::analysis::SymbolKey;
use crate::utils::error::AggregateError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Spread of one field across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub lower: f64,
    pub median: f64,
    pub upper: f64,
}

impl Quartiles {
    /// Quartiles of `values` in any order
    ///
    /// Returns `None` for an empty slice. A half with no elements (a single
    /// run) takes the median as its quartile.
    pub fn of(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let median = median(&sorted)?;
        let mid = sorted.len() / 2;
        let lower = &sorted[..mid];
        let upper = if sorted.len() % 2 == 0 {
            &sorted[mid..]
        } else {
            &sorted[mid + 1..]
        };

        Some(Self {
            lower: self::median(lower).unwrap_or(median),
            median,
            upper: self::median(upper).unwrap_or(median),
        })
    }
}

/// Median of an already sorted slice
pub fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    if n % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub instr: Quartiles,
    pub uniq: Quartiles,
    pub mem: Quartiles,
    pub addr: Quartiles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateInstr {
    pub symbol: SymbolKey,
    pub instr: Quartiles,
    pub percent: Quartiles,
    pub uniq: Quartiles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateAccess {
    pub symbol: SymbolKey,
    pub count: Quartiles,
    pub percent: Quartiles,
    pub read: Quartiles,
    pub read_percent: Quartiles,
    pub write: Quartiles,
    pub write_percent: Quartiles,
}

/// Immutable cross-run statistics snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    runs: usize,
    totals: AggregateTotals,
    instr: Vec<AggregateInstr>,
    mem: Vec<AggregateAccess>,
    addr: Vec<AggregateAccess>,
}

impl Aggregate {
    /// Reduce the summaries of independent runs
    ///
    /// **Public** - main entry point for multi-run jobs
    ///
    /// Symbols are taken from the first run. A symbol missing from a later
    /// run counts as zero for that run.
    ///
    /// # Errors
    /// * `AggregateError::NoRuns` - `sums` is empty
    pub fn new(sums: &[Summary]) -> Result<Self, AggregateError> {
        let first = sums.first().ok_or(AggregateError::NoRuns)?;
        debug!("Aggregating {} runs", sums.len());

        let totals = AggregateTotals {
            instr: quarts(sums, |s| s.totals().instr as f64),
            uniq: quarts(sums, |s| s.totals().uniq as f64),
            mem: quarts(sums, |s| s.totals().mem as f64),
            addr: quarts(sums, |s| s.totals().addr as f64),
        };

        let instr = first
            .instr()
            .iter()
            .map(|row| {
                let sym = &row.symbol;
                let field = |f: fn(&InstrStats) -> f64| {
                    quarts(sums, |s| s.instr_for(sym).map(f).unwrap_or_else(|| missing(sym)))
                };
                AggregateInstr {
                    symbol: sym.clone(),
                    instr: field(|r| r.instr as f64),
                    percent: field(|r| r.percent),
                    uniq: field(|r| r.uniq as f64),
                }
            })
            .collect();

        let mem = first
            .mem()
            .iter()
            .map(|row| aggregate_access(sums, &row.symbol, Summary::mem_for))
            .collect();
        let addr = first
            .addr()
            .iter()
            .map(|row| aggregate_access(sums, &row.symbol, Summary::addr_for))
            .collect();

        Ok(Self {
            runs: sums.len(),
            totals,
            instr,
            mem,
            addr,
        })
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn totals(&self) -> &AggregateTotals {
        &self.totals
    }

    pub fn instr(&self) -> &[AggregateInstr] {
        &self.instr
    }

    pub fn mem(&self) -> &[AggregateAccess] {
        &self.mem
    }

    pub fn addr(&self) -> &[AggregateAccess] {
        &self.addr
    }

    /// Instruction rows, highest median first
    pub fn instr_rows(&self) -> Vec<&AggregateInstr> {
        sorted_by_median(&self.instr, |row| row.instr)
    }

    pub fn mem_rows(&self) -> Vec<&AggregateAccess> {
        sorted_by_median(&self.mem, |row| row.count)
    }

    pub fn addr_rows(&self) -> Vec<&AggregateAccess> {
        sorted_by_median(&self.addr, |row| row.count)
    }
}

fn quarts(sums: &[Summary], value: impl Fn(&Summary) -> f64) -> Quartiles {
    let values: Vec<f64> = sums.iter().map(value).collect();
    Quartiles::of(&values).unwrap_or_default()
}

fn missing(symbol: &SymbolKey) -> f64 {
    warn!("Symbol {:?} missing from a run, counting it as 0", symbol);
    0.0
}

fn aggregate_access(
    sums: &[Summary],
    symbol: &SymbolKey,
    table: for<'a, 'b> fn(&'a Summary, &'b SymbolKey) -> Option<&'a AccessStats>,
) -> AggregateAccess {
    let field = |f: fn(&AccessStats) -> f64| {
        quarts(sums, |s| {
            table(s, symbol).map(f).unwrap_or_else(|| missing(symbol))
        })
    };
    AggregateAccess {
        symbol: symbol.clone(),
        count: field(|r| r.count as f64),
        percent: field(|r| r.percent),
        read: field(|r| r.read as f64),
        read_percent: field(|r| r.read_percent),
        write: field(|r| r.write as f64),
        write_percent: field(|r| r.write_percent),
    }
}

fn sorted_by_median<T>(rows: &[T], key: impl Fn(&T) -> Quartiles) -> Vec<&T> {
    let mut sorted: Vec<&T> = rows.iter().collect();
    sorted.sort_by(|a, b| key(b).median.total_cmp(&key(a).median));
    sorted
}
