//! Instruction pointers executed per symbol.

use super::{Analysis, OrderedCounts, SymbolKey};
use crate::parser::schema::Instruction;
use std::collections::HashMap;

/// Occurrences of each instruction address, grouped by symbol
pub type IpCounts = OrderedCounts<SymbolKey, HashMap<Option<u64>, u64>>;

/// Counts instructions and distinct instruction addresses per symbol
#[derive(Debug, Clone, Default)]
pub struct SymbolIps {
    syms: IpCounts,
}

impl SymbolIps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instructions executed per symbol, in first-seen order
    pub fn symbol_ips(&self) -> impl Iterator<Item = (&SymbolKey, u64)> {
        self.syms.iter().map(|(sym, ips)| (sym, ips.values().sum()))
    }

    /// Distinct instruction addresses per symbol, in first-seen order
    pub fn symbol_unique_ips(&self) -> impl Iterator<Item = (&SymbolKey, u64)> {
        self.syms.iter().map(|(sym, ips)| (sym, ips.len() as u64))
    }

    pub fn instructions(&self, symbol: &SymbolKey) -> u64 {
        self.syms
            .get(symbol)
            .map(|ips| ips.values().sum())
            .unwrap_or(0)
    }

    pub fn unique_ips(&self, symbol: &SymbolKey) -> u64 {
        self.syms
            .get(symbol)
            .map(|ips| ips.len() as u64)
            .unwrap_or(0)
    }

    /// Total instructions seen in the pass
    pub fn total(&self) -> u64 {
        self.symbol_ips().map(|(_, n)| n).sum()
    }
}

impl Analysis for SymbolIps {
    type Results = IpCounts;

    fn on_instruction(&mut self, instr: &Instruction) {
        *self
            .syms
            .entry(&instr.symbol)
            .entry(instr.address)
            .or_insert(0) += 1;
    }

    fn results(&self) -> &IpCounts {
        &self.syms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instr(symbol: Option<&str>, address: Option<u64>) -> Instruction {
        Instruction {
            tick: 0,
            cpu: "cpu0".to_string(),
            symbol: symbol.map(str::to_string),
            source_line: None,
            offset: None,
            address,
            asm: "nop".to_string(),
            micro_ops: Vec::new(),
        }
    }

    #[test]
    fn test_repeated_address_is_one_unique_ip() {
        let mut ips = SymbolIps::new();
        for _ in 0..5 {
            ips.on_instruction(&instr(Some("loop"), Some(0x40)));
        }

        let key = Some("loop".to_string());
        assert_eq!(ips.instructions(&key), 5);
        assert_eq!(ips.unique_ips(&key), 1);
    }

    #[test]
    fn test_missing_symbol_is_recorded() {
        let mut ips = SymbolIps::new();
        ips.on_instruction(&instr(None, Some(0x1)));
        ips.on_instruction(&instr(Some("f"), Some(0x2)));
        ips.on_instruction(&instr(Some("f"), Some(0x3)));

        assert_eq!(ips.instructions(&None), 1);
        assert_eq!(ips.unique_ips(&Some("f".to_string())), 2);
        assert_eq!(ips.total(), 3);
        assert_eq!(ips.results().len(), 2);
    }

    #[test]
    fn test_unknown_symbol_counts_zero() {
        let ips = SymbolIps::new();
        assert_eq!(ips.instructions(&Some("nope".to_string())), 0);
        assert_eq!(ips.total(), 0);
    }
}
