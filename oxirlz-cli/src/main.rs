//! OxiRLZ CLI - Relative Lempel-Ziv compression against an external dictionary.
//!
//! `oxirlz parse` factorises an input file against a pre-built dictionary and
//! its suffix array; `oxirlz unparse` reverses the process, optionally
//! extracting only a range of output positions.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxirlz")]
#[command(
    author,
    version,
    about = "Relative Lempel-Ziv compression against an external dictionary"
)]
#[command(long_about = "
OxiRLZ compresses data against an external dictionary: each output token
names a substring of the dictionary, found with a pre-built suffix array.
Decompression only needs the dictionary, and can extract any range of the
output without decompressing the rest.

The dictionary, suffix array, input and output are all raw little-endian
files with no headers. Dictionary and suffix array are built by separate
tools.

Examples:
  oxirlz parse input.txt -d dict -s dict.sa
  oxirlz parse input.txt -d dict -s dict.sa -o out.rlz -f vbyte
  oxirlz parse samples.bin -d dict -s dict.sa -w 32 -W 64
  oxirlz unparse input.txt.rlz -d dict -o restored.txt
  oxirlz unparse big.rlz -d dict -o slice.bin -f vbyte -a 1000 -b 2000
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file against a dictionary and its suffix array
    #[command(alias = "p")]
    Parse {
        /// Input file to compress
        input: PathBuf,

        /// Dictionary file (raw little-endian symbols)
        #[arg(short, long, visible_alias = "dict")]
        dictionary: PathBuf,

        /// Suffix-array file of the dictionary (raw little-endian integers)
        #[arg(short, long, visible_alias = "sa")]
        suffix_array: PathBuf,

        /// Output file (defaults to INPUT.rlz)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Process input and dictionary as 8/16/32/64-bit symbols
        #[arg(short = 'w', long, default_value_t = 8)]
        width: u32,

        /// Use 32- or 64-bit integers in the suffix array
        #[arg(short = 'W', long, default_value_t = 32)]
        sa_width: u32,

        /// Output format: 32x2, 64x2, ascii or vbyte
        #[arg(short, long, default_value = "32x2")]
        format: String,

        /// No output unless an error occurs
        #[arg(short, long)]
        quiet: bool,

        /// Show a progress bar while parsing
        #[arg(long)]
        progress: bool,
    },

    /// Decompress an RLZ token stream using the dictionary
    #[command(alias = "u")]
    Unparse {
        /// Encoded input file
        input: PathBuf,

        /// Dictionary file (raw little-endian symbols)
        #[arg(short, long, visible_alias = "dict")]
        dictionary: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Bit width of dictionary and output symbols
        #[arg(short = 'w', long, default_value_t = 8)]
        width: u32,

        /// Input format: 32x2, 64x2, ascii or vbyte
        #[arg(short, long, default_value = "32x2")]
        format: String,

        /// Start decompression at output symbol A (inclusive, 1-based; 0 = start)
        #[arg(short = 'a', long, default_value_t = 0)]
        from: u64,

        /// Stop decompression at output symbol B (inclusive, 1-based; 0 = end)
        #[arg(short = 'b', long, default_value_t = 0)]
        to: u64,

        /// No output unless an error occurs
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input,
            dictionary,
            suffix_array,
            output,
            width,
            sa_width,
            format,
            quiet,
            progress,
        } => commands::parse::run(
            &input,
            &dictionary,
            &suffix_array,
            output.as_deref(),
            width,
            sa_width,
            &format,
            quiet,
            progress,
        ),
        Commands::Unparse {
            input,
            dictionary,
            output,
            width,
            format,
            from,
            to,
            quiet,
        } => commands::unparse::run(
            &input,
            &dictionary,
            &output,
            width,
            &format,
            from,
            to,
            quiet,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
