//! Token-stream decoder.

use std::io::{self, Read};

use crate::error::{OxiRlzError, Result};
use crate::format::TokenFormat;
use crate::symbol::Symbol;
use crate::token::Token;
use crate::vbyte;

/// Decodes a stream of tokens from one of the wire formats.
///
/// Tokens are produced lazily, one [`next_token`](TokenReader::next_token)
/// call at a time. End of stream is reported as `None`, exactly once the
/// underlying input ends: there is no trailer in any of the formats. A
/// stream that happens to contain the historical all-ones end marker also
/// terminates, immediately.
///
/// The reader issues small reads; wrap files in a `BufReader`.
#[derive(Debug)]
pub struct TokenReader<R: Read> {
    input: R,
    format: TokenFormat,
    finished: bool,
    tokens_read: u64,
}

impl<R: Read> TokenReader<R> {
    /// Create a reader decoding `format` from `input`.
    pub fn new(input: R, format: TokenFormat) -> Self {
        Self {
            input,
            format,
            finished: false,
            tokens_read: 0,
        }
    }

    /// The wire format this reader decodes.
    pub fn format(&self) -> TokenFormat {
        self.format
    }

    /// Number of tokens decoded so far.
    pub fn tokens_read(&self) -> u64 {
        self.tokens_read
    }

    /// Decode the next token, or `None` at end of stream.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        if self.finished {
            return Ok(None);
        }
        let token = match self.format {
            TokenFormat::U32x2 => self.next_32x2()?,
            TokenFormat::U64x2 => self.next_64x2()?,
            TokenFormat::Ascii => self.next_ascii()?,
            TokenFormat::Vbyte => self.next_vbyte()?,
        };
        match token {
            Some(tok) if !tok.is_end_marker() => {
                self.tokens_read += 1;
                Ok(Some(tok))
            }
            _ => {
                self.finished = true;
                Ok(None)
            }
        }
    }

    /// Fill `buf` completely, or report end of stream. A trailing short
    /// read counts as end of stream, the same as a clean EOF.
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Option<()>> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.input.read(&mut buf[filled..]) {
                Ok(0) => return Ok(None),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(Some(()))
    }

    fn next_32x2(&mut self) -> Result<Option<Token>> {
        let mut buf = [0u8; 8];
        if self.fill(&mut buf)?.is_none() {
            return Ok(None);
        }
        let start_pos = u32::from_le_slice(&buf[..4]) as u64;
        let length = u32::from_le_slice(&buf[4..]) as i64;
        Ok(Some(Token { start_pos, length }))
    }

    fn next_64x2(&mut self) -> Result<Option<Token>> {
        let mut buf = [0u8; 16];
        if self.fill(&mut buf)?.is_none() {
            return Ok(None);
        }
        let start_pos = u64::from_le_slice(&buf[..8]);
        let length = u64::from_le_slice(&buf[8..]) as i64;
        Ok(Some(Token { start_pos, length }))
    }

    fn next_ascii(&mut self) -> Result<Option<Token>> {
        let pos_field = match self.next_ascii_field()? {
            Some(f) => f,
            None => return Ok(None),
        };
        let len_field = match self.next_ascii_field()? {
            Some(f) => f,
            // A lone trailing number is treated like any other truncated
            // token: the stream ends.
            None => return Ok(None),
        };
        let start_pos: u64 = pos_field.parse().map_err(|_| {
            OxiRlzError::malformed_ascii(format!("\"{pos_field}\" is not an unsigned integer"))
        })?;
        let length: i64 = len_field.parse().map_err(|_| {
            OxiRlzError::malformed_ascii(format!("\"{len_field}\" is not an integer"))
        })?;
        Ok(Some(Token { start_pos, length }))
    }

    /// Read one whitespace-delimited field, or `None` at end of input.
    fn next_ascii_field(&mut self) -> Result<Option<String>> {
        let mut field = String::new();
        loop {
            match vbyte::read_byte(&mut self.input)? {
                None => return Ok(None),
                Some(b) if b.is_ascii_whitespace() => continue,
                Some(b) => {
                    field.push(b as char);
                    break;
                }
            }
        }
        loop {
            match vbyte::read_byte(&mut self.input)? {
                None => break,
                Some(b) if b.is_ascii_whitespace() => break,
                Some(b) => field.push(b as char),
            }
        }
        Ok(Some(field))
    }

    fn next_vbyte(&mut self) -> Result<Option<Token>> {
        let start_pos = match vbyte::decode(
            &mut self.input,
            "start_pos",
            vbyte::MAX_START_POS_BYTES,
        )? {
            Some(v) => v,
            None => return Ok(None),
        };
        let length = match vbyte::decode(&mut self.input, "length", vbyte::MAX_LENGTH_BYTES)? {
            Some(v) => v as i64,
            // End of input in the middle of a token: clean end of stream.
            None => return Ok(None),
        };
        Ok(Some(Token { start_pos, length }))
    }
}
