//! exectrace CLI
//!
//! Per-symbol instruction and memory statistics from simulator execution
//! traces, with cross-run quartile aggregation.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use exectrace::commands::{
    aggregate, display_version, execute_aggregate, execute_hotlines, execute_summary, hotlines,
    summarize, validate_report_file, AggregateArgs, HotLinesArgs, SummaryArgs, SymbolArgs,
};

/// exectrace - summarize gem5 execution traces per symbol
#[derive(Parser, Debug)]
#[command(name = "exectrace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    symbols: SymbolOpts,
}

/// Symbol resolution options
#[derive(Args, Debug)]
struct SymbolOpts {
    /// Debug image used to resolve bare addresses via addr2line
    #[arg(long, global = true, env = "EXECTRACE_SYMBOLS")]
    symbols: Option<PathBuf>,

    /// Load address of the debug image
    #[arg(
        long,
        global = true,
        env = "EXECTRACE_BASE",
        value_parser = parse_hex,
        default_value = "0xffffffff80a16000"
    )]
    base: u64,

    /// Ignore --symbols and $EXECTRACE_SYMBOLS
    #[arg(long, global = true)]
    no_symbols: bool,
}

impl SymbolOpts {
    fn into_args(self) -> SymbolArgs {
        SymbolArgs {
            image: if self.no_symbols { None } else { self.symbols },
            base: self.base,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize one trace per symbol
    Summary {
        /// Trace file
        file: PathBuf,

        /// Also write a JSON report
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the text report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the hottest source lines of one function
    Hotlines {
        /// Trace file
        file: PathBuf,

        /// Function to inspect
        #[arg(short, long)]
        function: String,

        /// Also write a JSON report
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Aggregate runs PREFIX.1 .. PREFIX.NUM into quartile bands
    Aggregate {
        /// Common path prefix of the run files
        prefix: PathBuf,

        /// Number of runs
        num: usize,

        /// Parse runs in parallel
        #[arg(long)]
        parallel: bool,

        /// Also write a JSON report
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the text report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a JSON report file
    Validate {
        /// Path to report JSON file
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn parse_hex(value: &str) -> Result<u64, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u64::from_str_radix(digits, 16).map_err(|e| format!("invalid hex address {}: {}", value, e))
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let symbols = cli.symbols.into_args();

    // Execute command
    match cli.command {
        Commands::Summary { file, json, output } => {
            let args = SummaryArgs {
                trace: file,
                symbols,
                output_json: json,
                output_text: output,
            };
            summarize::validate_args(&args)?;
            execute_summary(args)?;
        }

        Commands::Hotlines {
            file,
            function,
            json,
        } => {
            let args = HotLinesArgs {
                trace: file,
                function,
                symbols,
                output_json: json,
            };
            hotlines::validate_args(&args)?;
            execute_hotlines(args)?;
        }

        Commands::Aggregate {
            prefix,
            num,
            parallel,
            json,
            output,
        } => {
            let args = AggregateArgs {
                prefix,
                runs: num,
                parallel,
                symbols,
                output_json: json,
                output_text: output,
            };
            aggregate::validate_args(&args)?;
            execute_aggregate(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use exectrace::utils::config::DEFAULT_SYMBOL_BASE;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("0xffffffff80a16000"), Ok(0xffff_ffff_80a1_6000));
        assert_eq!(parse_hex("1000"), Ok(0x1000));
        assert!(parse_hex("0xzz").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_symbols_overrides_image() {
        let cli = Cli::parse_from([
            "exectrace",
            "--symbols",
            "kernel.debug",
            "--no-symbols",
            "summary",
            "trace.log",
        ]);
        let args = cli.symbols.into_args();
        assert_eq!(args.image, None);
        assert_eq!(args.base, DEFAULT_SYMBOL_BASE);
    }
}
