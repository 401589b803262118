//! Trace parsing and event definitions.
//!
//! This module handles:
//! - Decoding single trace lines (instructions and micro-op continuations)
//! - Driving a streaming pass over a trace file
//! - Defining the decoded event types

pub mod exec_trace;
pub mod line;
pub mod schema;

// Re-export main types
pub use exec_trace::{ParseStats, Parser};
pub use line::SymbolExpr;
pub use schema::{Instruction, MicroOp, OpClass, TraceEvent};
