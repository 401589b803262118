//! Decoded trace events.
//!
//! One [`Instruction`] per macro-op line, owning the [`MicroOp`]s that
//! follow it in the log.

use crate::utils::config::{MEM_READ_CLASS, MEM_WRITE_CLASS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation class of a micro-op
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OpClass {
    MemRead,
    MemWrite,
    /// Any other class, kept verbatim (e.g. `IntAlu`)
    Other(String),
}

impl std::str::FromStr for OpClass {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            MEM_READ_CLASS => Self::MemRead,
            MEM_WRITE_CLASS => Self::MemWrite,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for OpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MemRead => f.write_str(MEM_READ_CLASS),
            Self::MemWrite => f.write_str(MEM_WRITE_CLASS),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// One decoded sub-operation of an instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroOp {
    /// Disassembly of the owning macro-op as repeated on the micro-op line
    pub instruction: String,

    /// Disassembly of the micro-op itself
    pub asm: String,

    pub kind: OpClass,

    /// `D=` hex digits as printed, without the `0x` prefix
    ///
    /// Kept as text since vector registers are wider than any integer type.
    pub data: Option<String>,

    /// `A=` value
    pub address: Option<u64>,
}

/// One decoded execution event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub tick: u64,
    pub cpu: String,
    pub symbol: Option<String>,
    pub source_line: Option<String>,

    /// Byte offset within `symbol`
    pub offset: Option<u64>,
    pub address: Option<u64>,
    pub asm: String,

    #[serde(default)]
    pub micro_ops: Vec<MicroOp>,
}

impl Instruction {
    /// Append a micro-op decoded after this instruction
    pub fn add_micro_op(&mut self, op: MicroOp) {
        self.micro_ops.push(op);
    }

    pub fn micro_ops(&self) -> &[MicroOp] {
        &self.micro_ops
    }

    pub fn len(&self) -> usize {
        self.micro_ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.micro_ops.is_empty()
    }
}

/// A decoded trace line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Instruction(Instruction),
    MicroOp(MicroOp),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_class_parsing() {
        assert_eq!("MemRead".parse::<OpClass>().unwrap(), OpClass::MemRead);
        assert_eq!("MemWrite".parse::<OpClass>().unwrap(), OpClass::MemWrite);
        assert_eq!(
            "IntAlu".parse::<OpClass>().unwrap(),
            OpClass::Other("IntAlu".to_string())
        );
    }

    #[test]
    fn test_op_class_display_keeps_tag() {
        let kind: OpClass = "FloatMemRead".parse().unwrap();
        assert_eq!(kind.to_string(), "FloatMemRead");
        assert_eq!(OpClass::MemWrite.to_string(), "MemWrite");
    }
}
