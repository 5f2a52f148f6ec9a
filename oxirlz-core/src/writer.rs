//! Token-stream encoder.

use std::io::Write;

use crate::error::Result;
use crate::format::TokenFormat;
use crate::token::Token;
use crate::vbyte;

/// Encodes a stream of tokens into one of the wire formats.
///
/// There is no framing and no trailer: end of stream is conveyed by closing
/// the output, so finishing a stream writes nothing.
#[derive(Debug)]
pub struct TokenWriter<W: Write> {
    out: W,
    format: TokenFormat,
    bytes_written: u64,
}

impl<W: Write> TokenWriter<W> {
    /// Create a writer producing `format` on `out`.
    pub fn new(out: W, format: TokenFormat) -> Self {
        Self {
            out,
            format,
            bytes_written: 0,
        }
    }

    /// The wire format this writer produces.
    pub fn format(&self) -> TokenFormat {
        self.format
    }

    /// Total bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Encode one token.
    ///
    /// In the 32x2 format the fields are truncated to 32 bits, which loses
    /// information for literals of wide symbols; callers choosing that
    /// combination are warned at configuration time.
    pub fn write_token(&mut self, token: Token) -> Result<()> {
        match self.format {
            TokenFormat::U32x2 => {
                let mut buf = [0u8; 8];
                buf[..4].copy_from_slice(&(token.start_pos as u32).to_le_bytes());
                buf[4..].copy_from_slice(&(token.length as u32).to_le_bytes());
                self.out.write_all(&buf)?;
                self.bytes_written += 8;
            }
            TokenFormat::U64x2 => {
                let mut buf = [0u8; 16];
                buf[..8].copy_from_slice(&token.start_pos.to_le_bytes());
                buf[8..].copy_from_slice(&(token.length as u64).to_le_bytes());
                self.out.write_all(&buf)?;
                self.bytes_written += 16;
            }
            TokenFormat::Ascii => {
                let line = format!("{} {}\n", token.start_pos, token.length);
                self.out.write_all(line.as_bytes())?;
                self.bytes_written += line.len() as u64;
            }
            TokenFormat::Vbyte => {
                // Both fields of a 64-bit token fit in twenty bytes.
                let mut buf = Vec::with_capacity(20);
                vbyte::encode(token.start_pos, &mut buf);
                vbyte::encode(token.length as u64, &mut buf);
                self.out.write_all(&buf)?;
                self.bytes_written += buf.len() as u64;
            }
        }
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
