//! Per-symbol summary of one completed pass.
//!
//! Built from the [`SymbolIps`] and [`AccessedAddresses`] analyses of the
//! same run. Every percentage with a zero denominator is 0.

use crate::analysis::{AccessedAddresses, SymbolIps, SymbolKey};
use log::debug;
use serde::{Deserialize, Serialize};

/// Run-wide totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Instructions executed
    pub instr: u64,
    /// Distinct instruction addresses, summed over symbols
    pub uniq: u64,
    /// Memory accesses
    pub mem: u64,
    /// Distinct data addresses, summed over symbols
    pub addr: u64,
}

/// One row of the instruction table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrStats {
    pub symbol: SymbolKey,
    pub instr: u64,
    /// Share of all instructions
    pub percent: f64,
    pub uniq: u64,
}

/// One row of the memory or address table
///
/// `percent` is relative to the run total, while the read and write
/// percentages are relative to this symbol's own `count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessStats {
    pub symbol: SymbolKey,
    pub count: u64,
    pub percent: f64,
    pub read: u64,
    pub read_percent: f64,
    pub write: u64,
    pub write_percent: f64,
}

/// Immutable per-symbol statistics snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    totals: Totals,
    instr: Vec<InstrStats>,
    mem: Vec<AccessStats>,
    addr: Vec<AccessStats>,
}

/// `part` as a percentage of `whole`, 0 when `whole` is 0
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

impl Summary {
    /// Build the summary of one run
    ///
    /// **Public** - main entry point for summary construction
    ///
    /// # Arguments
    /// * `ips` - SymbolIps analysis of the run
    /// * `accesses` - AccessedAddresses analysis of the same run
    pub fn new(ips: &SymbolIps, accesses: &AccessedAddresses) -> Self {
        let totals = Totals {
            instr: ips.total(),
            uniq: ips.symbol_unique_ips().map(|(_, n)| n).sum(),
            mem: accesses
                .symbols()
                .map(|sym| accesses.num_memory_accesses(sym))
                .sum(),
            addr: accesses
                .symbols()
                .map(|sym| accesses.num_addresses(sym))
                .sum(),
        };

        let instr = ips
            .symbol_ips()
            .map(|(sym, n)| InstrStats {
                symbol: sym.clone(),
                instr: n,
                percent: percent(n, totals.instr),
                uniq: ips.unique_ips(sym),
            })
            .collect();

        // Every executed symbol gets a memory row, accessed or not.
        let mut symbols: Vec<&SymbolKey> = ips.symbol_ips().map(|(sym, _)| sym).collect();
        for sym in accesses.symbols() {
            if !symbols.contains(&sym) {
                symbols.push(sym);
            }
        }

        let mut mem = Vec::new();
        let mut addr = Vec::new();
        for sym in symbols {
            let counts = accesses.counts(sym);
            mem.push(AccessStats {
                symbol: sym.clone(),
                count: counts.accesses,
                percent: percent(counts.accesses, totals.mem),
                read: counts.reads,
                read_percent: percent(counts.reads, counts.accesses),
                write: counts.writes,
                write_percent: percent(counts.writes, counts.accesses),
            });
            addr.push(AccessStats {
                symbol: sym.clone(),
                count: counts.addresses,
                percent: percent(counts.addresses, totals.addr),
                read: counts.read_addresses,
                read_percent: percent(counts.read_addresses, counts.addresses),
                write: counts.write_addresses,
                write_percent: percent(counts.write_addresses, counts.addresses),
            });
        }

        debug!(
            "Summary: {} instructions over {} symbols, {} memory accesses",
            totals.instr,
            ips.symbol_ips().count(),
            totals.mem
        );

        Self {
            totals,
            instr,
            mem,
            addr,
        }
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Instruction rows in first-seen order
    pub fn instr(&self) -> &[InstrStats] {
        &self.instr
    }

    /// Memory access rows in first-seen order
    pub fn mem(&self) -> &[AccessStats] {
        &self.mem
    }

    /// Distinct address rows in first-seen order
    pub fn addr(&self) -> &[AccessStats] {
        &self.addr
    }

    pub fn instr_for(&self, symbol: &SymbolKey) -> Option<&InstrStats> {
        self.instr.iter().find(|row| &row.symbol == symbol)
    }

    pub fn mem_for(&self, symbol: &SymbolKey) -> Option<&AccessStats> {
        self.mem.iter().find(|row| &row.symbol == symbol)
    }

    pub fn addr_for(&self, symbol: &SymbolKey) -> Option<&AccessStats> {
        self.addr.iter().find(|row| &row.symbol == symbol)
    }

    /// Instruction rows, most instructions first
    pub fn instr_rows(&self) -> Vec<&InstrStats> {
        sorted_desc(&self.instr, |row| row.instr)
    }

    /// Memory rows, most accesses first
    pub fn mem_rows(&self) -> Vec<&AccessStats> {
        sorted_desc(&self.mem, |row| row.count)
    }

    /// Address rows, most addresses first
    pub fn addr_rows(&self) -> Vec<&AccessStats> {
        sorted_desc(&self.addr, |row| row.count)
    }
}

// Stable: equal keys keep insertion order.
fn sorted_desc<T>(rows: &[T], key: impl Fn(&T) -> u64) -> Vec<&T> {
    let mut sorted: Vec<&T> = rows.iter().collect();
    sorted.sort_by(|a, b| key(b).cmp(&key(a)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analysis;
    use crate::parser::schema::{Instruction, MicroOp, OpClass};

    fn instr(symbol: &str, address: u64) -> Instruction {
        Instruction {
            tick: 0,
            cpu: "cpu0".to_string(),
            symbol: Some(symbol.to_string()),
            source_line: None,
            offset: None,
            address: Some(address),
            asm: "nop".to_string(),
            micro_ops: Vec::new(),
        }
    }

    fn access(kind: OpClass, address: u64) -> MicroOp {
        MicroOp {
            instruction: "mov".to_string(),
            asm: "ld".to_string(),
            kind,
            data: None,
            address: Some(address),
        }
    }

    #[test]
    fn test_percent_guard() {
        assert_eq!(percent(5, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }

    #[test]
    fn test_summary_percentages() {
        let mut ips = SymbolIps::new();
        let mut acc = AccessedAddresses::new();

        let a = instr("a", 0x10);
        for _ in 0..3 {
            ips.on_instruction(&a);
        }
        let b = instr("b", 0x20);
        ips.on_instruction(&b);

        acc.on_micro_op(&a, &access(OpClass::MemRead, 0x100));
        acc.on_micro_op(&a, &access(OpClass::MemWrite, 0x108));
        acc.on_micro_op(&a, &access(OpClass::MemWrite, 0x108));
        acc.on_micro_op(&b, &access(OpClass::MemRead, 0x200));

        let summary = Summary::new(&ips, &acc);
        assert_eq!(
            *summary.totals(),
            Totals {
                instr: 4,
                uniq: 2,
                mem: 4,
                addr: 3,
            }
        );

        let a_key = Some("a".to_string());
        let a_instr = summary.instr_for(&a_key).unwrap();
        assert_eq!(a_instr.percent, 75.0);

        let a_mem = summary.mem_for(&a_key).unwrap();
        assert_eq!(a_mem.count, 3);
        assert_eq!(a_mem.percent, 75.0);
        assert!((a_mem.read_percent - 100.0 / 3.0).abs() < 1e-9);
        assert!((a_mem.write_percent - 200.0 / 3.0).abs() < 1e-9);

        let a_addr = summary.addr_for(&a_key).unwrap();
        assert_eq!(a_addr.count, 2);
        assert_eq!(a_addr.read_percent, 50.0);
        assert_eq!(a_addr.write_percent, 50.0);
    }

    #[test]
    fn test_rows_sorted_with_stable_ties() {
        let mut ips = SymbolIps::new();
        ips.on_instruction(&instr("first", 1));
        ips.on_instruction(&instr("second", 2));
        ips.on_instruction(&instr("hot", 3));
        ips.on_instruction(&instr("hot", 3));

        let summary = Summary::new(&ips, &AccessedAddresses::new());
        let order: Vec<_> = summary
            .instr_rows()
            .iter()
            .map(|row| row.symbol.clone().unwrap())
            .collect();
        assert_eq!(order, vec!["hot", "first", "second"]);
    }

    #[test]
    fn test_symbol_without_memory_has_zero_percentages() {
        let mut ips = SymbolIps::new();
        ips.on_instruction(&instr("alu_only", 1));

        let summary = Summary::new(&ips, &AccessedAddresses::new());
        assert_eq!(summary.totals().mem, 0);

        let row = summary.mem_for(&Some("alu_only".to_string())).unwrap();
        assert_eq!(row.count, 0);
        assert_eq!(row.percent, 0.0);
        assert_eq!(row.read_percent, 0.0);
        assert_eq!(row.write_percent, 0.0);

        let row = summary.addr_for(&Some("alu_only".to_string())).unwrap();
        assert_eq!(row.read_percent, 0.0);
        assert_eq!(row.write_percent, 0.0);
    }
}
