//! tvgen: generates a test-vector stub from the ports of an HDL module.
//!
//! Reads one Verilog/SystemVerilog file, picks its top module, and writes a
//! `.tv` file with one column per port bit: an all-zero baseline vector
//! followed by N random vectors.

#![warn(missing_docs)]

mod generate;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser, ValueEnum};

/// Success.
pub const EXIT_OK: i32 = 0;
/// Usage error, unreadable input, unwritable output or bad configuration.
pub const EXIT_FAILURE: i32 = 1;
/// The input file has lexical or syntax errors.
pub const EXIT_PARSE_ERROR: i32 = 2;
/// The top module has port-list entries that cannot be laid out.
pub const EXIT_UNSUPPORTED_PORTS: i32 = 3;
/// No top module, or the requested one does not exist.
pub const EXIT_NO_TOP_MODULE: i32 = 4;

/// Long flags also accepted with a single dash.
const LEGACY_LONG_FLAGS: [&str; 3] = ["testvec", "vecNumber", "top"];

/// tvgen, the HDL test-vector generator.
#[derive(Parser, Debug)]
#[command(name = "tvgen", version, about = "Auto testbench vector generator")]
pub struct Cli {
    /// Input Verilog/SystemVerilog file.
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output test-vector file [default: test_vecs.tv].
    #[arg(long = "testvec", value_name = "FILE")]
    pub testvec: Option<PathBuf>,

    /// Number of random vectors after the baseline [default: 1].
    #[arg(long = "vecNumber", alias = "vec-number", value_name = "COUNT")]
    pub vec_number: Option<u32>,

    /// Top module to use instead of the first top-level module.
    #[arg(long, value_name = "MODULE")]
    pub top: Option<String>,

    /// Seed for the random vectors; a fixed seed gives identical files.
    #[arg(long)]
    pub seed: Option<u64>,

    /// How output columns are filled in random vectors.
    #[arg(long, value_enum)]
    pub outputs: Option<OutputsArg>,

    /// Clock port name (repeatable).
    #[arg(long = "clock", value_name = "PORT")]
    pub clocks: Vec<String>,

    /// Path to a `tvgen.toml` configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress all output except errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the extracted ports and the random seed.
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Output format for diagnostics.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Output column policy for random vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputsArg {
    /// Random `0`/`1`, like the inputs.
    Random,
    /// `X` in every output column.
    DontCare,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// One JSON object per diagnostic on stdout.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Diagnostic output format.
    pub format: ReportFormat,
    /// Optional path to a configuration file.
    pub config: Option<PathBuf>,
}

/// Rewrites `-testvec`, `-vecNumber` and `-top` (also with `=value`) to
/// their double-dash forms.
fn normalize_legacy_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| {
            let is_legacy = arg.strip_prefix('-').is_some_and(|rest| {
                LEGACY_LONG_FLAGS.iter().any(|flag| {
                    rest.strip_prefix(flag)
                        .is_some_and(|tail| tail.is_empty() || tail.starts_with('='))
                })
            });
            if is_legacy {
                format!("-{arg}")
            } else {
                arg
            }
        })
        .collect()
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() <= 1 {
        // Usage text goes to stdout and counts as a failed invocation.
        let _ = Cli::command().print_help();
        process::exit(EXIT_FAILURE);
    }

    let cli = match Cli::try_parse_from(normalize_legacy_args(args)) {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            process::exit(EXIT_OK);
        }
        Err(e) => {
            print!("{}", e.render());
            process::exit(EXIT_FAILURE);
        }
    };

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        format: cli.format,
        config: cli.config.clone(),
    };

    let result = generate::run(&cli, &global);

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(EXIT_FAILURE);
        }
    }
}
