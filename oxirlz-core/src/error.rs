//! Error types for OxiRLZ operations.
//!
//! This module provides a single error type covering all failure modes of
//! the toolkit: I/O errors, bad configuration values, malformed encoded
//! streams, and internal invariant violations detected while consulting the
//! suffix array.

use std::io;
use thiserror::Error;

/// Exit code for user/argument errors (bad flags, unknown formats).
pub const EXIT_USER_ERROR: i32 = 63;
/// Exit code for invalid input data (malformed encoded streams, I/O).
pub const EXIT_INVALID_INPUT: i32 = 1;
/// Exit code for internal invariant violations.
pub const EXIT_BUG: i32 = 33;

/// The main error type for OxiRLZ operations.
#[derive(Debug, Error)]
pub enum OxiRlzError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unrecognised token-stream format name.
    #[error("unknown token format \"{name}\" (expected 32x2, 64x2, ascii or vbyte)")]
    UnknownFormat {
        /// The format name as given.
        name: String,
    },

    /// Symbol width outside {8, 16, 32, 64}.
    #[error("invalid symbol width {bits} (must be 8, 16, 32 or 64 bits)")]
    InvalidSymbolWidth {
        /// The requested width in bits.
        bits: u32,
    },

    /// Suffix-array entry width outside {32, 64}.
    #[error("invalid suffix-array width {bits} (must be 32 or 64 bits)")]
    InvalidSaWidth {
        /// The requested width in bits.
        bits: u32,
    },

    /// Decompression window with a start past its stop.
    #[error("invalid window: start position {from} is greater than stop position {to}")]
    InvalidWindow {
        /// Inclusive 1-based start of the window.
        from: u64,
        /// Inclusive 1-based stop of the window.
        to: u64,
    },

    /// A vbyte-encoded field kept its continuation bit set past the point
    /// where the value could still fit into 64 bits.
    #[error("vbyte sequence does not fit into 64 bits ({field} field, more than {max_bytes} bytes)")]
    VbyteOverflow {
        /// Which token field was being decoded.
        field: &'static str,
        /// The per-field byte budget that was exceeded.
        max_bytes: usize,
    },

    /// A field of an ascii-format token was not a number.
    #[error("malformed ascii token: {message}")]
    MalformedAscii {
        /// Description of the malformed field.
        message: String,
    },

    /// The rightward binary search failed on a range the leftward search
    /// proved non-empty. This cannot happen when the suffix array really is
    /// a sorted suffix array of the dictionary at the configured symbol
    /// width; mismatched width flags are the usual cause.
    #[error(
        "failed binary search: suffix array is not sorted for this symbol width \
         (symbol {symbol:#x}, offset {offset}, bounds [{leftmost}, {rightmost}], \
         best match so far ({best_pos}, {best_len})); \
         check the --width and --sa-width flags against the input files"
    )]
    UnsortedSuffixArray {
        /// The input symbol being matched, zero-extended.
        symbol: u64,
        /// Depth into the candidate suffixes.
        offset: u64,
        /// Left bound of the search range (suffix-array index).
        leftmost: u64,
        /// Right bound of the search range (suffix-array index).
        rightmost: u64,
        /// Suffix-array index of the best partial match.
        best_pos: u64,
        /// Length of the best partial match, in symbols.
        best_len: i64,
    },
}

/// Result type alias for OxiRLZ operations.
pub type Result<T> = std::result::Result<T, OxiRlzError>;

impl OxiRlzError {
    /// Create an unknown-format error.
    pub fn unknown_format(name: impl Into<String>) -> Self {
        Self::UnknownFormat { name: name.into() }
    }

    /// Create an invalid-window error.
    pub fn invalid_window(from: u64, to: u64) -> Self {
        Self::InvalidWindow { from, to }
    }

    /// Create a vbyte-overflow error.
    pub fn vbyte_overflow(field: &'static str, max_bytes: usize) -> Self {
        Self::VbyteOverflow { field, max_bytes }
    }

    /// Create a malformed-ascii error.
    pub fn malformed_ascii(message: impl Into<String>) -> Self {
        Self::MalformedAscii {
            message: message.into(),
        }
    }

    /// The process exit code appropriate for this error: user errors,
    /// invalid input, and internal bugs map onto distinct codes so that
    /// scripts can tell whose fault a failure was.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownFormat { .. }
            | Self::InvalidSymbolWidth { .. }
            | Self::InvalidSaWidth { .. }
            | Self::InvalidWindow { .. } => EXIT_USER_ERROR,
            Self::Io(_) | Self::VbyteOverflow { .. } | Self::MalformedAscii { .. } => {
                EXIT_INVALID_INPUT
            }
            Self::UnsortedSuffixArray { .. } => EXIT_BUG,
        }
    }
}
