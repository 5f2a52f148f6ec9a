//! The `unparse` subcommand: RLZ decompression.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use oxirlz_codec::{Dictionary, UnparseStats, Unparser, Window};
use oxirlz_core::{Result, Symbol, SymbolWidth, TokenFormat, TokenReader};

/// Decompress an encoded token stream against the dictionary, optionally
/// restricted to a window of output positions.
#[allow(clippy::too_many_arguments)]
pub fn run(
    input: &Path,
    dictionary: &Path,
    output: &Path,
    width: u32,
    format: &str,
    from: u64,
    to: u64,
    quiet: bool,
) -> Result<()> {
    let symbol_width = SymbolWidth::from_bits(width)?;
    let format: TokenFormat = format.parse()?;
    let window = Window::new(from, to)?;

    if !quiet {
        eprintln!(
            "rlz-unparsing {} ({}) + {} ({}-bit) -> {}",
            input.display(),
            format,
            dictionary.display(),
            symbol_width.bits(),
            output.display()
        );
    }

    let stats = match symbol_width {
        SymbolWidth::W8 => run_typed::<u8>(input, dictionary, output, format, window)?,
        SymbolWidth::W16 => run_typed::<u16>(input, dictionary, output, format, window)?,
        SymbolWidth::W32 => run_typed::<u32>(input, dictionary, output, format, window)?,
        SymbolWidth::W64 => run_typed::<u64>(input, dictionary, output, format, window)?,
    };

    if !quiet {
        let bytes = stats.symbols_written * symbol_width.bytes() as u64;
        if symbol_width == SymbolWidth::W8 {
            eprintln!(
                "{}: {} tokens unparsed into {} bytes",
                input.display(),
                stats.tokens_read,
                bytes
            );
        } else {
            eprintln!(
                "{}: {} tokens unparsed into {} symbols = {} bytes",
                input.display(),
                stats.tokens_read,
                stats.symbols_written,
                bytes
            );
        }
    }

    Ok(())
}

fn run_typed<T: Symbol>(
    input: &Path,
    dictionary: &Path,
    output: &Path,
    format: TokenFormat,
    window: Window,
) -> Result<UnparseStats> {
    let dictionary = Dictionary::<T>::open(dictionary)?;
    let mut tokens = TokenReader::new(BufReader::new(File::open(input)?), format);
    let mut unparser = Unparser::new(dictionary, BufWriter::new(File::create(output)?));
    unparser.unparse(&mut tokens, window)
}
