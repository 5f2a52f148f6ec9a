//! The RLZ parser (compressor).
//!
//! The parser repeatedly finds the longest prefix of the remaining input
//! that occurs somewhere in the dictionary, and emits one token per prefix.
//! Candidate occurrences are tracked as an inclusive range `[leftmost,
//! rightmost]` of suffix-array indices: every suffix in the range starts
//! with the symbols consumed so far. Each accepted input symbol narrows the
//! range with two bounded binary searches, one for each end. When the range
//! empties the best match so far becomes the token; when it narrows to a
//! single suffix the parser follows that suffix directly, one comparison
//! per symbol, until the first mismatch.

use std::io::Read;

use indicatif::ProgressBar;
use oxirlz_core::writer::TokenWriter;
use oxirlz_core::{OxiRlzError, Result, Symbol, Token};

use crate::dictionary::Dictionary;
use crate::input::SymbolReader;
use crate::suffix_array::SuffixArray;

/// Statistics accumulated over one parse run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Number of tokens emitted, end of stream not included.
    pub tokens: u64,
    /// Length in symbols of the longest token.
    pub longest_token: u64,
    /// Input symbols consumed.
    pub symbols_in: u64,
    /// Encoded bytes written.
    pub bytes_out: u64,
}

/// The RLZ parser: factorises an input stream against a dictionary via its
/// suffix array.
///
/// `T` is the symbol type of dictionary and input, `S` the entry type of
/// the suffix array. The dictionary and the array are owned, loaded once
/// and never mutated; the input streams.
pub struct Parser<T: Symbol, S: Symbol, R: Read> {
    dict: Dictionary<T>,
    sa: SuffixArray<S>,
    input: SymbolReader<T, R>,
    progress: Option<ProgressBar>,
}

impl<T: Symbol, S: Symbol, R: Read> Parser<T, S, R> {
    /// Create a parser over `input`.
    pub fn new(dict: Dictionary<T>, sa: SuffixArray<S>, input: R) -> Self {
        Self {
            dict,
            sa,
            input: SymbolReader::new(input),
            progress: None,
        }
    }

    /// Attach a progress bar, positioned by input bytes consumed.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// The dictionary this parser matches against.
    pub fn dictionary(&self) -> &Dictionary<T> {
        &self.dict
    }

    /// Produce the next token, or `None` once the input is exhausted.
    ///
    /// A symbol that starts no dictionary suffix at all becomes a literal.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        if self.sa.is_empty() {
            // Nothing to match against; every symbol is a literal.
            return Ok(match self.input.next()? {
                Some(c) => Some(Token::literal(c.to_u64())),
                None => None,
            });
        }

        // Best accepted match so far. The position is a suffix-array index,
        // not a dictionary position.
        let mut best_pos = 0usize;
        let mut best_len = 0i64;
        let mut matching_suffix_found = false;

        let mut leftmost = 0usize;
        let mut rightmost = self.sa.len() - 1;

        // Symbols consumed into the candidate match so far, which is also
        // the depth at which the next symbol is compared within each
        // candidate suffix.
        let mut offset = 0usize;

        let mut c = match self.input.next()? {
            Some(c) => c,
            None => return Ok(None),
        };

        loop {
            leftmost = match self.search_left(c, offset, leftmost, rightmost) {
                Some(l) => l,
                None => {
                    // No suffix in the range continues with `c`. Either the
                    // range was narrowed as far as the input matches, or
                    // (with no match at all) `c` starts no suffix anywhere.
                    if matching_suffix_found {
                        self.input.unget(c);
                        return Ok(Some(Token::copy(self.sa.get(best_pos), best_len)));
                    }
                    return Ok(Some(Token::literal(c.to_u64())));
                }
            };

            rightmost = match self.search_right(c, offset, leftmost, rightmost) {
                Some(r) => r,
                None => {
                    // The left search just proved the range non-empty, so a
                    // sorted suffix array cannot get here. Mismatched width
                    // flags are the usual culprit.
                    return Err(OxiRlzError::UnsortedSuffixArray {
                        symbol: c.to_u64(),
                        offset: offset as u64,
                        leftmost: leftmost as u64,
                        rightmost: rightmost as u64,
                        best_pos: best_pos as u64,
                        best_len,
                    });
                }
            };

            best_pos = leftmost;
            best_len = offset as i64 + 1;
            matching_suffix_found = true;

            if leftmost == rightmost {
                // One candidate suffix left. Follow it directly instead of
                // binary searching a one-element range per symbol.
                let start = self.sa.get(leftmost);
                loop {
                    offset += 1;
                    c = match self.input.next()? {
                        Some(c) => c,
                        None => return Ok(Some(Token::copy(start, offset as i64))),
                    };
                    match (start as usize)
                        .checked_add(offset)
                        .and_then(|i| self.dict.get(i))
                    {
                        Some(d) if d == c => continue,
                        // A mismatch, or the suffix ran out at the end of
                        // the dictionary. The extra symbol belongs to the
                        // next token.
                        _ => {
                            self.input.unget(c);
                            return Ok(Some(Token::copy(start, offset as i64)));
                        }
                    }
                }
            }

            offset += 1;
            c = match self.input.next()? {
                Some(c) => c,
                // Input ended with several candidates still open; all of
                // them match the consumed symbols, so any one will do.
                None => return Ok(Some(Token::copy(self.sa.get(leftmost), offset as i64))),
            };
        }
    }

    /// Parse the whole input, writing tokens to `writer`.
    pub fn run<W: std::io::Write>(&mut self, writer: &mut TokenWriter<W>) -> Result<ParseStats> {
        let mut stats = ParseStats::default();
        while let Some(token) = self.next_token()? {
            writer.write_token(token)?;
            let symbols = token.symbols();
            stats.tokens += 1;
            stats.symbols_in += symbols;
            stats.longest_token = stats.longest_token.max(symbols);
            if let Some(pb) = &self.progress {
                pb.set_position(stats.symbols_in * T::BYTES as u64);
            }
        }
        writer.flush()?;
        stats.bytes_out = writer.bytes_written();
        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }
        Ok(stats)
    }

    /// Narrow the left bound: the smallest index in `[old_left, right]`
    /// whose suffix has `symbol` at depth `offset`, or `None` if there is
    /// no such index.
    fn search_left(
        &self,
        symbol: T,
        offset: usize,
        old_left: usize,
        right_bound: usize,
    ) -> Option<usize> {
        let dict_len = self.dict.len();
        let mut left = old_left as i64;
        let mut right = right_bound as i64;
        while left <= right {
            let mid = ((left + right) / 2) as usize;
            let pos = self.sa.get(mid) as usize;
            if pos.saturating_add(offset) >= dict_len {
                // The suffix ends before this depth. End of dictionary
                // sorts below any symbol, so look to the right.
                left = mid as i64 + 1;
                continue;
            }
            let mid_symbol = self.dict[pos + offset];
            if mid_symbol < symbol {
                left = mid as i64 + 1;
            } else if mid_symbol > symbol {
                right = mid as i64 - 1;
            } else {
                if mid == old_left {
                    return Some(mid);
                }
                let prev = self.sa.get(mid - 1) as usize;
                if prev.saturating_add(offset) >= dict_len {
                    // The neighbour's suffix already ended, so it cannot
                    // hold `symbol` at this depth; `mid` is the leftmost.
                    return Some(mid);
                }
                if self.dict[prev + offset] != symbol {
                    return Some(mid);
                }
                right = mid as i64 - 1;
            }
        }
        None
    }

    /// Narrow the right bound: the largest index in `[left, old_right]`
    /// whose suffix has `symbol` at depth `offset`, or `None` if there is
    /// no such index. After a successful [`search_left`](Self::search_left)
    /// over the same range, `None` means the array is not sorted.
    fn search_right(
        &self,
        symbol: T,
        offset: usize,
        left_bound: usize,
        old_right: usize,
    ) -> Option<usize> {
        let dict_len = self.dict.len();
        let mut left = left_bound as i64;
        let mut right = old_right as i64;
        while left <= right {
            let mid = ((left + right) / 2) as usize;
            let pos = self.sa.get(mid) as usize;
            if pos.saturating_add(offset) >= dict_len {
                left = mid as i64 + 1;
                continue;
            }
            let mid_symbol = self.dict[pos + offset];
            if mid_symbol < symbol {
                left = mid as i64 + 1;
            } else if mid_symbol > symbol {
                right = mid as i64 - 1;
            } else {
                if mid == old_right {
                    return Some(mid);
                }
                let next = self.sa.get(mid + 1) as usize;
                if next.saturating_add(offset) >= dict_len {
                    return Some(mid);
                }
                if self.dict[next + offset] != symbol {
                    return Some(mid);
                }
                left = mid as i64 + 1;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxirlz_core::TokenFormat;

    /// Sort suffix positions lexicographically. Only for tests; real
    /// suffix arrays come pre-built from a file.
    fn suffix_array(dict: &[u8]) -> SuffixArray<u32> {
        let mut entries: Vec<u32> = (0..dict.len() as u32).collect();
        entries.sort_by(|&a, &b| dict[a as usize..].cmp(&dict[b as usize..]));
        SuffixArray::from_entries(entries)
    }

    fn parser_over(dict: &[u8], input: &'static [u8]) -> Parser<u8, u32, &'static [u8]> {
        Parser::new(Dictionary::from_bytes(dict), suffix_array(dict), input)
    }

    fn tokens_of(dict: &[u8], input: &'static [u8]) -> Vec<Token> {
        let mut parser = parser_over(dict, input);
        let mut tokens = Vec::new();
        while let Some(tok) = parser.next_token().unwrap() {
            tokens.push(tok);
        }
        tokens
    }

    #[test]
    fn test_whole_input_is_one_token() {
        let tokens = tokens_of(b"abracadabra", b"abrac");
        assert_eq!(tokens, [Token::copy(0, 5)]);
    }

    #[test]
    fn test_partial_match_then_literal() {
        let tokens = tokens_of(b"abc", b"abd");
        assert_eq!(tokens, [Token::copy(0, 2), Token::literal(b'd' as u64)]);
    }

    #[test]
    fn test_unmatched_symbol_is_literal() {
        let tokens = tokens_of(b"xy", b"z");
        assert_eq!(tokens, [Token::literal(b'z' as u64)]);
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        let tokens = tokens_of(b"abc", b"");
        assert_eq!(tokens, []);
    }

    #[test]
    fn test_single_symbol_dictionary() {
        // The longest possible match is the whole dictionary, so runs of
        // its one symbol factor into length-1 copies.
        let tokens = tokens_of(b"a", b"aaabaa");
        assert_eq!(
            tokens,
            [
                Token::copy(0, 1),
                Token::copy(0, 1),
                Token::copy(0, 1),
                Token::literal(b'b' as u64),
                Token::copy(0, 1),
                Token::copy(0, 1),
            ]
        );
    }

    #[test]
    fn test_match_truncated_by_dictionary_end() {
        // "bra" matches the tail of the dictionary; the following "x" is
        // pushed back and ends up a literal.
        let tokens = tokens_of(b"abra", b"brax");
        assert_eq!(tokens, [Token::copy(1, 3), Token::literal(b'x' as u64)]);
    }

    #[test]
    fn test_pushback_symbol_starts_next_token() {
        // After "abra" the parser has read the second "a" one symbol too
        // far; it must come back as the start of the next token.
        let tokens = tokens_of(b"abrax", b"abraabra");
        assert_eq!(tokens, [Token::copy(0, 4), Token::copy(0, 4)]);
    }

    #[test]
    fn test_repeated_substring_uses_best_partial_match() {
        let dict = b"abracadabra";
        let tokens = tokens_of(dict, b"cadabr");
        assert_eq!(tokens, [Token::copy(4, 6)]);
        let tokens = tokens_of(dict, b"dab");
        assert_eq!(tokens, [Token::copy(6, 3)]);
    }

    #[test]
    fn test_unsorted_suffix_array_is_reported() {
        // Identity order is not sorted for "bcbb": the left search finds
        // the lone "c" suffix but the right search loses it again.
        let dict = Dictionary::<u8>::from_bytes(b"bcbb");
        let sa = SuffixArray::<u32>::from_entries(vec![0, 1, 2, 3]);
        let mut parser = Parser::new(dict, sa, &b"c"[..]);
        let err = parser.next_token().unwrap_err();
        assert!(matches!(err, OxiRlzError::UnsortedSuffixArray { .. }));
    }

    #[test]
    fn test_run_collects_stats() {
        let mut parser = parser_over(b"abracadabra", b"abracazz");
        let mut writer = TokenWriter::new(Vec::new(), TokenFormat::U32x2);
        let stats = parser.run(&mut writer).unwrap();
        // "abraca" (6), then the literal 'z' twice.
        assert_eq!(stats.tokens, 3);
        assert_eq!(stats.symbols_in, 8);
        assert_eq!(stats.longest_token, 6);
        assert_eq!(stats.bytes_out, 24);
    }

    #[test]
    fn test_empty_suffix_array_yields_literals() {
        let dict = Dictionary::<u8>::from_bytes(b"");
        let sa = SuffixArray::<u32>::from_entries(Vec::new());
        let mut parser = Parser::new(dict, sa, &b"hi"[..]);
        assert_eq!(
            parser.next_token().unwrap(),
            Some(Token::literal(b'h' as u64))
        );
        assert_eq!(
            parser.next_token().unwrap(),
            Some(Token::literal(b'i' as u64))
        );
        assert_eq!(parser.next_token().unwrap(), None);
    }
}
