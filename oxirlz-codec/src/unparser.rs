//! The RLZ unparser (decompressor).

use std::io::{Read, Write};

use oxirlz_core::{OxiRlzError, Result, Symbol, Token, TokenReader};

use crate::dictionary::Dictionary;

/// An inclusive, 1-based range of output symbol positions to decompress.
///
/// Zero for either end leaves that end open: `Window::new(0, 0)` is the
/// whole output, `Window::new(5, 0)` is everything from the fifth symbol
/// on, `Window::new(0, 9)` everything up to the ninth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    start: u64,
    stop: u64,
}

impl Window {
    /// The whole output.
    pub const OPEN: Self = Self { start: 0, stop: 0 };

    /// A window from `start` to `stop`, both inclusive and 1-based, zero
    /// leaving an end open. A start past a non-zero stop is rejected.
    pub fn new(start: u64, stop: u64) -> Result<Self> {
        if stop > 0 && start > stop {
            return Err(OxiRlzError::invalid_window(start, stop));
        }
        Ok(Self { start, stop })
    }

    /// Whether both ends are open.
    pub fn is_open(&self) -> bool {
        self.start == 0 && self.stop == 0
    }

    /// Inclusive 1-based start, zero for open.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Inclusive 1-based stop, zero for open.
    pub fn stop(&self) -> u64 {
        self.stop
    }
}

/// Statistics from one unparse run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnparseStats {
    /// Tokens consumed from the encoded stream.
    pub tokens_read: u64,
    /// Symbols actually written to the output.
    pub symbols_written: u64,
}

/// The RLZ unparser: resolves a token stream against the dictionary and
/// writes the decompressed symbols.
pub struct Unparser<T: Symbol, W: Write> {
    dict: Dictionary<T>,
    out: W,
}

impl<T: Symbol, W: Write> Unparser<T, W> {
    /// Create an unparser writing symbols to `out`.
    pub fn new(dict: Dictionary<T>, out: W) -> Self {
        Self { dict, out }
    }

    /// The dictionary tokens are resolved against.
    pub fn dictionary(&self) -> &Dictionary<T> {
        &self.dict
    }

    /// Return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Decompress `tokens`, restricted to `window`.
    ///
    /// Every token stands for a run of output positions (one position for
    /// a literal). Tokens wholly before the window are skipped, tokens
    /// overlapping it are emitted in part or in full, and the first token
    /// wholly past it ends the run early; position bookkeeping advances
    /// over skipped and trimmed tokens alike, so the emitted symbols are
    /// exactly the window's slice of the full output.
    pub fn unparse<R: Read>(
        &mut self,
        tokens: &mut TokenReader<R>,
        window: Window,
    ) -> Result<UnparseStats> {
        let mut stats = UnparseStats::default();
        // 1-based position of the last output symbol produced or skipped.
        let mut output_pos: u64 = 0;
        while let Some(token) = tokens.next_token()? {
            stats.tokens_read += 1;
            let len = token.symbols();
            let first = output_pos + 1;
            let last = output_pos + len;
            if window.stop > 0 && first > window.stop {
                // Wholly past the window; nothing further can matter.
                break;
            }
            if last < window.start {
                // Wholly before the window.
                output_pos = last;
                continue;
            }
            let skip = window.start.saturating_sub(first);
            let take = if window.stop > 0 && last > window.stop {
                len - (last - window.stop)
            } else {
                len
            };
            stats.symbols_written += self.write_range(&token, skip, take)?;
            output_pos = last;
        }
        self.out.flush()?;
        Ok(stats)
    }

    /// Emit payload indices `[from, to)` of `token`; for a whole token,
    /// `from` is zero and `to` its symbol count. Returns the number of
    /// symbols written.
    fn write_range(&mut self, token: &Token, from: u64, to: u64) -> Result<u64> {
        if token.is_literal() {
            debug_assert!(from == 0 && to == 1);
            T::from_u64(token.start_pos).write_le(&mut self.out)?;
            return Ok(1);
        }
        if token.length < 0 {
            // Never produced by the parser; decodable from a hostile
            // stream. Occupies one output position, copies nothing.
            return Ok(0);
        }
        let dict_len = self.dict.len() as u64;
        let mut end = token.start_pos.saturating_add(to);
        if end > dict_len {
            eprintln!(
                "Warning: token ({:#x}, {:#x}) exceeds dictionary length of {}, truncating.",
                token.start_pos, token.length, dict_len
            );
            end = dict_len;
        }
        let begin = token.start_pos.saturating_add(from).min(end);
        for i in begin..end {
            self.dict[i as usize].write_le(&mut self.out)?;
        }
        Ok(end - begin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxirlz_core::{TokenFormat, TokenWriter};

    fn encode(tokens: &[Token]) -> Vec<u8> {
        let mut writer = TokenWriter::new(Vec::new(), TokenFormat::U64x2);
        for &tok in tokens {
            writer.write_token(tok).unwrap();
        }
        writer.finish().unwrap()
    }

    fn unparse_window(dict: &[u8], tokens: &[Token], window: Window) -> (Vec<u8>, UnparseStats) {
        let bytes = encode(tokens);
        let mut reader = TokenReader::new(&bytes[..], TokenFormat::U64x2);
        let mut unparser = Unparser::new(Dictionary::<u8>::from_bytes(dict), Vec::new());
        let stats = unparser.unparse(&mut reader, window).unwrap();
        (unparser.into_inner(), stats)
    }

    #[test]
    fn test_full_unparse() {
        let tokens = [Token::copy(0, 5), Token::copy(3, 2)];
        let (out, stats) = unparse_window(b"abracadabra", &tokens, Window::OPEN);
        assert_eq!(out, b"abracra");
        assert_eq!(stats.tokens_read, 2);
        assert_eq!(stats.symbols_written, 7);
    }

    #[test]
    fn test_windowed_unparse() {
        // Full output "abracra"; positions 3 through 5 are "rac".
        let tokens = [Token::copy(0, 5), Token::copy(3, 2)];
        let window = Window::new(3, 5).unwrap();
        let (out, stats) = unparse_window(b"abracadabra", &tokens, window);
        assert_eq!(out, b"rac");
        assert_eq!(stats.symbols_written, 3);
    }

    #[test]
    fn test_literals_and_window() {
        let tokens = [
            Token::literal(b'x' as u64),
            Token::copy(0, 3),
            Token::literal(b'y' as u64),
        ];
        // Full output is "xabcy".
        let (out, _) = unparse_window(b"abc", &tokens, Window::OPEN);
        assert_eq!(out, b"xabcy");
        // Skip the leading literal, stop before the trailing one.
        let (out, _) = unparse_window(b"abc", &tokens, Window::new(2, 4).unwrap());
        assert_eq!(out, b"abc");
    }

    #[test]
    fn test_window_inside_one_token() {
        let tokens = [Token::copy(0, 11)];
        let (out, _) = unparse_window(b"abracadabra", &tokens, Window::new(5, 7).unwrap());
        assert_eq!(out, b"cad");
    }

    #[test]
    fn test_open_ended_windows() {
        let tokens = [Token::copy(0, 4), Token::copy(7, 4)];
        // "abra" + "abra"
        let (out, _) = unparse_window(b"abracadabra", &tokens, Window::new(6, 0).unwrap());
        assert_eq!(out, b"bra");
        let (out, _) = unparse_window(b"abracadabra", &tokens, Window::new(0, 3).unwrap());
        assert_eq!(out, b"abr");
    }

    #[test]
    fn test_early_termination_counts_final_token() {
        let tokens = [Token::copy(0, 2), Token::copy(0, 2), Token::copy(0, 2)];
        let window = Window::new(0, 2).unwrap();
        let (out, stats) = unparse_window(b"ab", &tokens, window);
        assert_eq!(out, b"ab");
        // The token that proved the window exhausted is still counted.
        assert_eq!(stats.tokens_read, 2);
    }

    #[test]
    fn test_overlong_copy_truncated() {
        // Dictionary of eight symbols; (7, 2) reaches one past the end.
        let tokens = [Token::copy(7, 2)];
        let (out, stats) = unparse_window(b"abcdefgh", &tokens, Window::OPEN);
        assert_eq!(out, b"h");
        assert_eq!(stats.symbols_written, 1);
    }

    #[test]
    fn test_literal_truncates_to_symbol_width() {
        let tokens = [Token::literal(0x1FF)];
        let (out, _) = unparse_window(b"ab", &tokens, Window::OPEN);
        assert_eq!(out, [0xFF]);
    }

    #[test]
    fn test_u16_output_little_endian() {
        let dict_bytes = [0x34, 0x12, 0x78, 0x56];
        let bytes = encode(&[Token::copy(0, 2), Token::literal(0xBEEF)]);
        let mut reader = TokenReader::new(&bytes[..], TokenFormat::U64x2);
        let mut unparser = Unparser::new(Dictionary::<u16>::from_bytes(&dict_bytes), Vec::new());
        let stats = unparser.unparse(&mut reader, Window::OPEN).unwrap();
        assert_eq!(stats.symbols_written, 3);
        assert_eq!(
            unparser.into_inner(),
            [0x34, 0x12, 0x78, 0x56, 0xEF, 0xBE]
        );
    }

    #[test]
    fn test_invalid_window_rejected() {
        let err = Window::new(9, 3).unwrap_err();
        assert!(matches!(err, OxiRlzError::InvalidWindow { .. }));
        // Open stops are not a violation.
        assert!(Window::new(9, 0).is_ok());
        assert!(Window::new(9, 9).is_ok());
    }

    #[test]
    fn test_negative_length_copies_nothing() {
        let tokens = [
            Token {
                start_pos: 0,
                length: -2,
            },
            Token::copy(0, 2),
        ];
        let (out, stats) = unparse_window(b"ab", &tokens, Window::OPEN);
        assert_eq!(out, b"ab");
        assert_eq!(stats.symbols_written, 2);
        assert_eq!(stats.tokens_read, 2);
    }
}
