//! Address to symbol resolution.
//!
//! Lookups go through an injected [`SymbolResolver`] so tests can use a
//! deterministic fake instead of spawning `addr2line`.

pub mod addr2line;
pub mod table;

pub use self::addr2line::Addr2Line;
pub use table::{FnResolver, Resolution, SymbolResolver, SymbolTable};
