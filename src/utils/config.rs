//! Configuration and constants for the CLI.

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Load address of the kernel module whose symbols are resolved by default
pub const DEFAULT_SYMBOL_BASE: u64 = 0xffff_ffff_80a1_6000;

/// External tool used to turn image offsets into symbols and source lines
pub const DEFAULT_ADDR2LINE: &str = "addr2line";

/// Environment variable overriding [`DEFAULT_ADDR2LINE`]
pub const ADDR2LINE_ENV: &str = "EXECTRACE_ADDR2LINE";

// Op class tags as printed by the simulator
pub const MEM_READ_CLASS: &str = "MemRead";
pub const MEM_WRITE_CLASS: &str = "MemWrite";

/// Label used in reports for events that carry no symbol
pub const UNKNOWN_SYMBOL: &str = "<unknown>";

/// Field delimiter of a trace line
pub const FIELD_DELIMITER: &str = ": ";

/// Number of fields in a micro-op continuation line
pub const MICRO_OP_FIELDS: usize = 7;

/// Minimum number of fields in an instruction line
pub const INSTRUCTION_MIN_FIELDS: usize = 4;
