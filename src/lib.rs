//! exectrace
//!
//! Per-symbol instruction and memory statistics from gem5 execution traces.
//!
//! A trace is streamed line by line through a [`parser::Parser`], which
//! decodes instructions and micro-ops, resolves bare addresses through an
//! optional [`symbols::SymbolTable`], and fans every event out to the
//! registered [`analysis`] observers. Finished analyses are reduced into a
//! per-run [`aggregator::Summary`], and several summaries into an
//! [`aggregator::Aggregate`] of quartile bands.
//!
//! ## Getting Started
//!
//! ```bash
//! exectrace summary m5out/debug.log
//! exectrace --symbols kernel.debug hotlines m5out/debug.log -f dtrace_probe
//! exectrace aggregate m5out/debug.log 10 --parallel
//! ```

pub mod aggregator;
pub mod analysis;
pub mod commands;
pub mod output;
pub mod parser;
pub mod symbols;
pub mod utils;
