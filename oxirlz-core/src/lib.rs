//! # OxiRLZ Core
//!
//! Core building blocks for the OxiRLZ relative Lempel-Ziv toolkit.
//!
//! Relative Lempel-Ziv (RLZ) factorises an input against an external, fixed
//! dictionary rather than a sliding window. This crate provides the pieces
//! shared by the compressor and the decompressor:
//!
//! - [`token`]: the (start, length) token type with its literal convention
//! - [`symbol`]: generic fixed-width little-endian symbols (8-64 bits)
//! - [`format`]: the four token-stream wire formats
//! - [`vbyte`]: the variable-byte integer coding used by the `vbyte` format
//! - [`writer`] / [`reader`]: token-stream encoding and decoding
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: CLI                                                 │
//! │     oxirlz parse / oxirlz unparse                       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec (oxirlz-codec)                                │
//! │     Parser (suffix-array search), Unparser (windowed)   │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Token streams (this crate)                          │
//! │     Token, TokenWriter/TokenReader, vbyte, Symbol       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxirlz_core::{Token, TokenFormat, TokenReader, TokenWriter};
//!
//! // Encode two tokens as vbyte...
//! let mut writer = TokenWriter::new(Vec::new(), TokenFormat::Vbyte);
//! writer.write_token(Token::copy(300, 2)).unwrap();
//! writer.write_token(Token::literal(b'z' as u64)).unwrap();
//! let bytes = writer.finish().unwrap();
//!
//! // ...and decode them back. End of input is end of stream.
//! let mut reader = TokenReader::new(&bytes[..], TokenFormat::Vbyte);
//! assert_eq!(reader.next_token().unwrap(), Some(Token::copy(300, 2)));
//! assert_eq!(reader.next_token().unwrap(), Some(Token::literal(b'z' as u64)));
//! assert_eq!(reader.next_token().unwrap(), None);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod format;
pub mod reader;
pub mod symbol;
pub mod token;
pub mod vbyte;
pub mod writer;

// Re-exports for convenience
pub use error::{OxiRlzError, Result};
pub use format::TokenFormat;
pub use reader::TokenReader;
pub use symbol::{SaWidth, Symbol, SymbolWidth};
pub use token::Token;
pub use writer::TokenWriter;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{OxiRlzError, Result};
    pub use crate::format::TokenFormat;
    pub use crate::reader::TokenReader;
    pub use crate::symbol::{SaWidth, Symbol, SymbolWidth};
    pub use crate::token::Token;
    pub use crate::writer::TokenWriter;
}
