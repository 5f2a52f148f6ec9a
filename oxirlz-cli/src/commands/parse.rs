//! The `parse` subcommand: RLZ compression.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use oxirlz_codec::{Dictionary, ParseStats, Parser, SuffixArray};
use oxirlz_core::{Result, SaWidth, Symbol, SymbolWidth, TokenFormat, TokenWriter};

use crate::utils::create_progress_bar;

/// Compress `input` against a dictionary and its suffix array.
#[allow(clippy::too_many_arguments)]
pub fn run(
    input: &Path,
    dictionary: &Path,
    suffix_array: &Path,
    output: Option<&Path>,
    width: u32,
    sa_width: u32,
    format: &str,
    quiet: bool,
    progress: bool,
) -> Result<()> {
    let symbol_width = SymbolWidth::from_bits(width)?;
    let sa_width = SaWidth::from_bits(sa_width)?;
    let format: TokenFormat = format.parse()?;

    let output: PathBuf = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let mut name = input.as_os_str().to_os_string();
            name.push(".rlz");
            PathBuf::from(name)
        }
    };

    if !quiet {
        eprintln!(
            "rlz-parsing {} ({}-bit) -> {} ({})",
            input.display(),
            symbol_width.bits(),
            output.display(),
            format
        );
        eprintln!(
            "rlz dictionary: {} + {} ({}-bit)",
            dictionary.display(),
            suffix_array.display(),
            sa_width.bits()
        );

        // These option combinations can't mix safely; warn but proceed.
        if format == TokenFormat::U32x2 && symbol_width == SymbolWidth::W64 {
            eprintln!(
                "Warning: with --format 32x2 and --width 64 the output cannot represent \
                 literals. If the dictionary contains every possible input symbol this is \
                 fine; otherwise use --format 64x2."
            );
        }
        if format == TokenFormat::U32x2 && sa_width == SaWidth::W64 {
            eprintln!(
                "Warning: --sa-width 64 with --format 32x2 only works for dictionaries of \
                 fewer than 2^32 symbols; bigger ones need --format 64x2 to represent all \
                 addresses."
            );
        }
    }

    let (stats, dict_bytes) = match (symbol_width, sa_width) {
        (SymbolWidth::W8, SaWidth::W32) => {
            run_typed::<u8, u32>(input, dictionary, suffix_array, &output, format, progress)?
        }
        (SymbolWidth::W8, SaWidth::W64) => {
            run_typed::<u8, u64>(input, dictionary, suffix_array, &output, format, progress)?
        }
        (SymbolWidth::W16, SaWidth::W32) => {
            run_typed::<u16, u32>(input, dictionary, suffix_array, &output, format, progress)?
        }
        (SymbolWidth::W16, SaWidth::W64) => {
            run_typed::<u16, u64>(input, dictionary, suffix_array, &output, format, progress)?
        }
        (SymbolWidth::W32, SaWidth::W32) => {
            run_typed::<u32, u32>(input, dictionary, suffix_array, &output, format, progress)?
        }
        (SymbolWidth::W32, SaWidth::W64) => {
            run_typed::<u32, u64>(input, dictionary, suffix_array, &output, format, progress)?
        }
        (SymbolWidth::W64, SaWidth::W32) => {
            run_typed::<u64, u32>(input, dictionary, suffix_array, &output, format, progress)?
        }
        (SymbolWidth::W64, SaWidth::W64) => {
            run_typed::<u64, u64>(input, dictionary, suffix_array, &output, format, progress)?
        }
    };

    if !quiet {
        eprintln!(
            "oxirlz: {} done, {} tokens, {} bytes",
            output.display(),
            stats.tokens,
            stats.bytes_out
        );
        if stats.tokens > 0 {
            let bytes_in = stats.symbols_in * symbol_width.bytes() as u64;
            let mean = stats.symbols_in as f64 / stats.tokens as f64;
            let ratio = (stats.bytes_out + dict_bytes) as f64 / bytes_in as f64 * 100.0;
            eprintln!(
                "mean token length {:.2} symbols, longest {}, out/in ratio {:.2}%",
                mean, stats.longest_token, ratio
            );
        }
    }

    Ok(())
}

fn run_typed<T: Symbol, S: Symbol>(
    input: &Path,
    dictionary: &Path,
    suffix_array: &Path,
    output: &Path,
    format: TokenFormat,
    progress: bool,
) -> Result<(ParseStats, u64)> {
    let dictionary = Dictionary::<T>::open(dictionary)?;
    let suffix_array = SuffixArray::<S>::open(suffix_array)?;
    let dict_bytes = dictionary.size_bytes();

    let input_bytes = std::fs::metadata(input)?.len();
    let reader = BufReader::new(File::open(input)?);
    let mut parser = Parser::new(dictionary, suffix_array, reader);
    if progress {
        parser = parser.with_progress(create_progress_bar(input_bytes, true));
    }

    let mut writer = TokenWriter::new(BufWriter::new(File::create(output)?), format);
    let stats = parser.run(&mut writer)?;
    writer.finish()?;
    Ok((stats, dict_bytes))
}
