//! Pluggable observers over the decoded event stream.
//!
//! A parse pass fans every event out to each registered observer, in file
//! order. Each analysis keeps only the counters it needs, so arbitrarily
//! large traces can be summarized without buffering them.

pub mod accessed_addresses;
pub mod source_lines;
pub mod symbol_ips;
pub mod trace_builder;

pub use accessed_addresses::AccessedAddresses;
pub use source_lines::SourceLines;
pub use symbol_ips::SymbolIps;
pub use trace_builder::TraceBuilder;

use crate::parser::schema::{Instruction, MicroOp};
use std::collections::HashMap;
use std::hash::Hash;

/// Per-symbol key; `None` collects events without a symbol
pub type SymbolKey = Option<String>;

/// An observer of one parse pass
pub trait Analysis {
    /// Accumulated state exposed after the pass
    type Results;

    fn on_instruction(&mut self, instr: &Instruction);

    /// Called for each micro-op with the instruction that owns it
    fn on_micro_op(&mut self, _instr: &Instruction, _op: &MicroOp) {}

    fn results(&self) -> &Self::Results;
}

/// Object-safe view of an [`Analysis`] used by the parser for dispatch
pub trait Observer {
    fn instruction(&mut self, instr: &Instruction);
    fn micro_op(&mut self, instr: &Instruction, op: &MicroOp);
}

impl<A: Analysis> Observer for A {
    fn instruction(&mut self, instr: &Instruction) {
        self.on_instruction(instr);
    }

    fn micro_op(&mut self, instr: &Instruction, op: &MicroOp) {
        self.on_micro_op(instr, op);
    }
}

/// Map that remembers the order in which keys were first inserted
///
/// Reports break count ties by first appearance in the trace, which a plain
/// `HashMap` cannot reproduce.
#[derive(Debug, Clone)]
pub struct OrderedCounts<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for OrderedCounts<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V: Default> OrderedCounts<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, inserting `V::default()` on first sight
    pub fn entry(&mut self, key: &K) -> &mut V {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.entries.push((key.clone(), V::default()));
                self.index.insert(key.clone(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot].1
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_counts_keeps_first_insertion_order() {
        let mut counts: OrderedCounts<&str, u64> = OrderedCounts::new();
        *counts.entry(&"b") += 1;
        *counts.entry(&"a") += 1;
        *counts.entry(&"b") += 1;

        let keys: Vec<_> = counts.keys().copied().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(counts.get(&"b"), Some(&2));
        assert_eq!(counts.get(&"c"), None);
        assert_eq!(counts.len(), 2);
    }
}
