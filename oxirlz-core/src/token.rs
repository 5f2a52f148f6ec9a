//! The RLZ token: a (start, length) pair naming a dictionary substring.

/// A single RLZ token.
///
/// Parsing output is a stream of these; un-parsing turns them back into
/// symbols by copying from the dictionary. The `length` field doubles as a
/// tag:
///
/// - `length > 0`: copy `length` symbols of the dictionary starting at
///   `start_pos`.
/// - `length == 0`: a literal; `start_pos` holds the symbol value itself,
///   zero-extended. A copy of zero symbols would be meaningless, which is
///   what frees the encoding up for this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Start position in the dictionary (in symbols), or the literal value.
    pub start_pos: u64,
    /// Number of symbols to copy; zero marks a literal.
    pub length: i64,
}

impl Token {
    /// A copy token covering `length` symbols from dictionary position
    /// `start_pos`.
    pub const fn copy(start_pos: u64, length: i64) -> Self {
        Self { start_pos, length }
    }

    /// A literal token carrying a single symbol value.
    pub const fn literal(symbol: u64) -> Self {
        Self {
            start_pos: symbol,
            length: 0,
        }
    }

    /// Whether this token is a literal.
    pub const fn is_literal(&self) -> bool {
        self.length == 0
    }

    /// The historical in-band end-of-stream marker: all ones, a token
    /// starting at 2^64-1 and continuing for -1 symbols. It is never
    /// written to any of the wire formats, but a stream crafted to contain
    /// it decodes as an immediate end of stream.
    pub const fn is_end_marker(&self) -> bool {
        self.start_pos == u64::MAX && self.length == -1
    }

    /// Number of output symbols this token stands for: `length` for a
    /// copy, one for a literal.
    pub const fn symbols(&self) -> u64 {
        if self.length > 0 {
            self.length as u64
        } else {
            1
        }
    }
}
