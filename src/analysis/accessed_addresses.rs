//! Memory addresses touched by micro-ops, per symbol.

use super::{Analysis, OrderedCounts, SymbolKey};
use crate::parser::schema::{Instruction, MicroOp, OpClass};
use std::collections::{HashMap, HashSet};

/// Access counts keyed by symbol, then op class, then address
pub type AccessCounts = OrderedCounts<SymbolKey, HashMap<OpClass, HashMap<u64, u64>>>;

/// Derived per-symbol memory statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryCounts {
    /// Accesses of every kind
    pub accesses: u64,
    pub reads: u64,
    pub writes: u64,

    /// Distinct addresses across every kind
    pub addresses: u64,
    pub read_addresses: u64,
    pub write_addresses: u64,
}

/// Counts memory accesses and distinct addresses per symbol
#[derive(Debug, Clone, Default)]
pub struct AccessedAddresses {
    syms: AccessCounts,
}

impl AccessedAddresses {
    pub fn new() -> Self {
        Self::default()
    }

    fn kind_accesses(&self, symbol: &SymbolKey, kind: &OpClass) -> u64 {
        self.syms
            .get(symbol)
            .and_then(|kinds| kinds.get(kind))
            .map(|addrs| addrs.values().sum())
            .unwrap_or(0)
    }

    fn kind_addresses(&self, symbol: &SymbolKey, kind: &OpClass) -> u64 {
        self.syms
            .get(symbol)
            .and_then(|kinds| kinds.get(kind))
            .map(|addrs| addrs.len() as u64)
            .unwrap_or(0)
    }

    pub fn num_memory_accesses(&self, symbol: &SymbolKey) -> u64 {
        self.syms
            .get(symbol)
            .map(|kinds| kinds.values().flat_map(HashMap::values).sum())
            .unwrap_or(0)
    }

    pub fn num_read_accesses(&self, symbol: &SymbolKey) -> u64 {
        self.kind_accesses(symbol, &OpClass::MemRead)
    }

    pub fn num_write_accesses(&self, symbol: &SymbolKey) -> u64 {
        self.kind_accesses(symbol, &OpClass::MemWrite)
    }

    pub fn num_addresses(&self, symbol: &SymbolKey) -> u64 {
        self.syms
            .get(symbol)
            .map(|kinds| {
                kinds
                    .values()
                    .flat_map(HashMap::keys)
                    .collect::<HashSet<_>>()
                    .len() as u64
            })
            .unwrap_or(0)
    }

    pub fn num_read_addresses(&self, symbol: &SymbolKey) -> u64 {
        self.kind_addresses(symbol, &OpClass::MemRead)
    }

    pub fn num_write_addresses(&self, symbol: &SymbolKey) -> u64 {
        self.kind_addresses(symbol, &OpClass::MemWrite)
    }

    pub fn counts(&self, symbol: &SymbolKey) -> MemoryCounts {
        MemoryCounts {
            accesses: self.num_memory_accesses(symbol),
            reads: self.num_read_accesses(symbol),
            writes: self.num_write_accesses(symbol),
            addresses: self.num_addresses(symbol),
            read_addresses: self.num_read_addresses(symbol),
            write_addresses: self.num_write_addresses(symbol),
        }
    }

    /// Symbols with at least one memory access, in first-seen order
    pub fn symbols(&self) -> impl Iterator<Item = &SymbolKey> {
        self.syms.keys()
    }
}

impl Analysis for AccessedAddresses {
    type Results = AccessCounts;

    fn on_instruction(&mut self, _instr: &Instruction) {}

    fn on_micro_op(&mut self, instr: &Instruction, op: &MicroOp) {
        let Some(address) = op.address else {
            return;
        };
        *self
            .syms
            .entry(&instr.symbol)
            .entry(op.kind.clone())
            .or_default()
            .entry(address)
            .or_insert(0) += 1;
    }

    fn results(&self) -> &AccessCounts {
        &self.syms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(symbol: &str) -> Instruction {
        Instruction {
            tick: 1,
            cpu: "cpu0".to_string(),
            symbol: Some(symbol.to_string()),
            source_line: None,
            offset: None,
            address: None,
            asm: "ld".to_string(),
            micro_ops: Vec::new(),
        }
    }

    fn op(kind: OpClass, address: Option<u64>) -> MicroOp {
        MicroOp {
            instruction: "ld".to_string(),
            asm: "ldr".to_string(),
            kind,
            data: None,
            address,
        }
    }

    #[test]
    fn test_read_only_symbol_has_zero_writes() {
        let mut acc = AccessedAddresses::new();
        let f = owner("reader");
        acc.on_micro_op(&f, &op(OpClass::MemRead, Some(0x10)));
        acc.on_micro_op(&f, &op(OpClass::MemRead, Some(0x10)));
        acc.on_micro_op(&f, &op(OpClass::MemRead, Some(0x18)));

        let counts = acc.counts(&Some("reader".to_string()));
        assert_eq!(
            counts,
            MemoryCounts {
                accesses: 3,
                reads: 3,
                writes: 0,
                addresses: 2,
                read_addresses: 2,
                write_addresses: 0,
            }
        );
    }

    #[test]
    fn test_distinct_addresses_span_kinds() {
        let mut acc = AccessedAddresses::new();
        let f = owner("copy");
        acc.on_micro_op(&f, &op(OpClass::MemRead, Some(0x10)));
        acc.on_micro_op(&f, &op(OpClass::MemWrite, Some(0x10)));
        acc.on_micro_op(&f, &op(OpClass::Other("FloatMemRead".into()), Some(0x20)));

        let key = Some("copy".to_string());
        assert_eq!(acc.num_memory_accesses(&key), 3);
        assert_eq!(acc.num_addresses(&key), 2);
        assert_eq!(acc.num_read_addresses(&key), 1);
        assert_eq!(acc.num_write_addresses(&key), 1);
    }

    #[test]
    fn test_micro_ops_without_address_are_ignored() {
        let mut acc = AccessedAddresses::new();
        acc.on_micro_op(&owner("alu"), &op(OpClass::Other("IntAlu".into()), None));

        assert!(acc.results().is_empty());
        assert_eq!(acc.counts(&Some("alu".to_string())), MemoryCounts::default());
    }

    #[test]
    fn test_address_zero_is_counted() {
        let mut acc = AccessedAddresses::new();
        acc.on_micro_op(&owner("null"), &op(OpClass::MemRead, Some(0)));
        assert_eq!(acc.num_read_accesses(&Some("null".to_string())), 1);
    }
}
