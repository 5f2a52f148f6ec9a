//! Streaming symbol input with one-symbol pushback.

use std::io::{self, Read};

use oxirlz_core::Symbol;

/// Reads fixed-width little-endian symbols from a byte stream.
///
/// The parser regularly reads one symbol too far (the first symbol after a
/// match ends) and hands it back for the next token. Underlying byte
/// streams cannot be relied on for more than one byte of pushback, which is
/// not enough for multi-byte symbols, so the reader keeps a single-symbol
/// buffer of its own and consults it before the stream. At most one symbol
/// can be pushed back at a time.
#[derive(Debug)]
pub struct SymbolReader<T: Symbol, R: Read> {
    input: R,
    pushback: Option<T>,
    warned_trailing: bool,
}

impl<T: Symbol, R: Read> SymbolReader<T, R> {
    /// Create a reader over `input`.
    ///
    /// Reads are one symbol at a time; wrap files in a `BufReader`.
    pub fn new(input: R) -> Self {
        Self {
            input,
            pushback: None,
            warned_trailing: false,
        }
    }

    /// The next symbol, or `None` at end of input.
    ///
    /// Bytes past the last whole-symbol boundary cannot form a symbol; they
    /// are dropped with a warning and the stream ends.
    pub fn next(&mut self) -> io::Result<Option<T>> {
        if let Some(sym) = self.pushback.take() {
            return Ok(Some(sym));
        }
        let mut buf = [0u8; 8];
        let buf = &mut buf[..T::BYTES];
        let mut filled = 0;
        while filled < buf.len() {
            match self.input.read(&mut buf[filled..]) {
                Ok(0) => {
                    if filled > 0 && !self.warned_trailing {
                        self.warned_trailing = true;
                        eprintln!(
                            "Warning: input size is indivisible by {}; ignoring {} trailing byte(s).",
                            T::BYTES,
                            filled
                        );
                    }
                    return Ok(None);
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(Some(T::from_le_slice(buf)))
    }

    /// Stash `symbol` as the next result of [`next`](Self::next).
    ///
    /// Only one symbol may be pending at a time.
    pub fn unget(&mut self, symbol: T) {
        debug_assert!(self.pushback.is_none(), "double unget");
        self.pushback = Some(symbol);
    }
}
