//! # OxiRLZ Codec
//!
//! Relative Lempel-Ziv (RLZ) compression and decompression against an
//! external dictionary.
//!
//! RLZ factorises its input against a fixed, pre-built dictionary rather
//! than a sliding window: each token of the output names a substring of
//! the dictionary (or carries a single literal symbol the dictionary does
//! not start any suffix with). Matching uses a pre-built suffix array of
//! the dictionary; each accepted input symbol costs two bounded binary
//! searches over it. Decompression resolves tokens against the same
//! dictionary and can extract an arbitrary range of output positions
//! without materialising the rest.
//!
//! Dictionary and suffix-array construction are external concerns: both
//! arrive as raw little-endian files and are loaded fully into memory.
//!
//! ## Example
//!
//! ```rust
//! use oxirlz_codec::{parse, unparse, Dictionary, SuffixArray, Window};
//! use oxirlz_core::TokenFormat;
//!
//! let dict = b"abracadabra";
//! // Suffix array of the dictionary, normally read from a file.
//! let sa: Vec<u32> = vec![10, 7, 0, 3, 5, 8, 1, 4, 6, 9, 2];
//!
//! let encoded = parse(
//!     b"abracax",
//!     Dictionary::<u8>::from_bytes(dict),
//!     SuffixArray::from_entries(sa),
//!     TokenFormat::Vbyte,
//! )
//! .unwrap();
//!
//! let decoded = unparse(
//!     &encoded,
//!     TokenFormat::Vbyte,
//!     Dictionary::<u8>::from_bytes(dict),
//!     Window::OPEN,
//! )
//! .unwrap();
//! assert_eq!(decoded, b"abracax");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod dictionary;
pub mod input;
pub mod parser;
pub mod suffix_array;
pub mod unparser;

// Re-exports for convenience
pub use dictionary::Dictionary;
pub use input::SymbolReader;
pub use parser::{ParseStats, Parser};
pub use suffix_array::SuffixArray;
pub use unparser::{UnparseStats, Unparser, Window};

use oxirlz_core::{Result, Symbol, TokenFormat, TokenReader, TokenWriter};

/// Compress `input` against `dict` and its suffix array, returning the
/// encoded token stream (convenience wrapper around [`Parser`]).
pub fn parse<T: Symbol, S: Symbol>(
    input: &[u8],
    dict: Dictionary<T>,
    sa: SuffixArray<S>,
    format: TokenFormat,
) -> Result<Vec<u8>> {
    let mut parser = Parser::new(dict, sa, input);
    let mut writer = TokenWriter::new(Vec::new(), format);
    parser.run(&mut writer)?;
    writer.finish()
}

/// Decompress an encoded token stream against `dict`, restricted to
/// `window` (convenience wrapper around [`Unparser`]).
pub fn unparse<T: Symbol>(
    encoded: &[u8],
    format: TokenFormat,
    dict: Dictionary<T>,
    window: Window,
) -> Result<Vec<u8>> {
    let mut reader = TokenReader::new(encoded, format);
    let mut unparser = Unparser::new(dict, Vec::new());
    unparser.unparse(&mut reader, window)?;
    Ok(unparser.into_inner())
}
