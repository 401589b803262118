//! Decoding of single trace lines.
//!
//! Line structure (see gem5 `src/cpu/exetrace.cc`):
//!
//! ```text
//! tick: cpu[ asid][ thread]: symbol-expr : asm[ : microop-asm : opclass : extras]
//! ```
//!
//! The symbol expression is `@name[+offset]` or `0xADDR`, optionally
//! followed by `.N` when the line is a micro-op of the previous instruction.

use super::schema::{Instruction, MicroOp};
use crate::utils::config::{INSTRUCTION_MIN_FIELDS, MICRO_OP_FIELDS};
use crate::utils::error::ParseError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const SYMBOL_EXPR_PATTERN: &str = r"^(?:@([^+.\s]+)(?:\+(\d+))?|0x([0-9A-Fa-f]+))(?:\.(\d+))?";

fn symbol_expr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SYMBOL_EXPR_PATTERN).expect("symbol expression pattern compiles"))
}

/// The four optional parts of a symbol expression
///
/// Exactly one of `symbol` / `address` is set after a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolExpr {
    pub symbol: Option<String>,
    pub offset: Option<u64>,
    pub address: Option<u64>,
    pub micro_op: Option<u32>,
}

impl SymbolExpr {
    /// Match the third field of a trace line
    ///
    /// # Errors
    /// * `ParseError::Format` - the field is neither `@name...` nor `0x...`
    /// * `ParseError::InvalidNumber` - a numeric part overflows
    pub fn parse(field: &str, line: usize) -> Result<Self, ParseError> {
        let caps = symbol_expr_regex()
            .captures(field)
            .ok_or_else(|| ParseError::Format {
                line,
                text: field.to_string(),
            })?;

        let offset = caps
            .get(2)
            .map(|m| parse_decimal(m.as_str(), "offset", line))
            .transpose()?;
        let address = caps
            .get(3)
            .map(|m| {
                u64::from_str_radix(m.as_str(), 16).map_err(|_| ParseError::InvalidNumber {
                    line,
                    field: "address",
                    value: m.as_str().to_string(),
                })
            })
            .transpose()?;
        let micro_op = caps
            .get(4)
            .map(|m| {
                m.as_str().parse::<u32>().map_err(|_| ParseError::InvalidNumber {
                    line,
                    field: "micro-op index",
                    value: m.as_str().to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            symbol: caps.get(1).map(|m| m.as_str().to_string()),
            offset,
            address,
            micro_op,
        })
    }

    pub fn is_micro_op(&self) -> bool {
        self.micro_op.is_some()
    }
}

impl fmt::Display for SymbolExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.symbol, self.address) {
            (Some(name), _) => {
                write!(f, "@{}", name)?;
                if let Some(offset) = self.offset {
                    write!(f, "+{}", offset)?;
                }
            }
            (None, Some(address)) => write!(f, "{:#x}", address)?,
            (None, None) => {}
        }
        if let Some(n) = self.micro_op {
            write!(f, ".{}", n)?;
        }
        Ok(())
    }
}

/// Build an instruction from the fields of a non-micro-op line
///
/// `symbol` and `source_line` are already resolved by the caller.
pub fn decode_instruction(
    fields: &[&str],
    expr: &SymbolExpr,
    symbol: Option<String>,
    source_line: Option<String>,
    line: usize,
) -> Result<Instruction, ParseError> {
    if fields.len() < INSTRUCTION_MIN_FIELDS {
        return Err(ParseError::Format {
            line,
            text: fields.join(": "),
        });
    }

    Ok(Instruction {
        tick: parse_decimal(fields[0].trim(), "tick", line)?,
        cpu: strip_cpu(fields[1]).to_string(),
        symbol,
        source_line,
        offset: expr.offset,
        address: expr.address,
        asm: fields[3].trim().to_string(),
        micro_ops: Vec::new(),
    })
}

/// Build a micro-op from the fields of a `.N` continuation line
///
/// # Errors
/// * `ParseError::MicroOpFormat` - the line does not have exactly 7 fields
/// * `ParseError::InvalidNumber` - a `D=` value is not hex, or an `A=` value
///   is not a 64-bit hex address
pub fn decode_micro_op(fields: &[&str], raw: &str, line: usize) -> Result<MicroOp, ParseError> {
    if fields.len() != MICRO_OP_FIELDS {
        return Err(ParseError::MicroOpFormat {
            line,
            text: raw.to_string(),
        });
    }

    let mut data = None;
    let mut address = None;
    for token in fields[6].split(' ') {
        let Some((key, value)) = token.split_once('=') else {
            continue;
        };
        match key {
            "D" => data = Some(hex_digits(value, "D", line)?.to_string()),
            "A" => address = Some(parse_hex(value, "A", line)?),
            _ => {}
        }
    }

    Ok(MicroOp {
        instruction: fields[3].trim().to_string(),
        asm: fields[4].trim().to_string(),
        kind: fields[5]
            .trim()
            .parse()
            .unwrap_or_else(|never: std::convert::Infallible| match never {}),
        data,
        address,
    })
}

// "system.cpu T0 " -> "system.cpu T0"
fn strip_cpu(field: &str) -> &str {
    field.trim().trim_end_matches(':').trim_end()
}

fn parse_decimal(value: &str, field: &'static str, line: usize) -> Result<u64, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

// "0x2a" -> "2a", any width
fn hex_digits<'v>(value: &'v str, field: &'static str, line: usize) -> Result<&'v str, ParseError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidNumber {
            line,
            field,
            value: value.to_string(),
        });
    }
    Ok(digits)
}

fn parse_hex(value: &str, field: &'static str, line: usize) -> Result<u64, ParseError> {
    let digits = hex_digits(value, field, line)?;
    u64::from_str_radix(digits, 16).map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}
