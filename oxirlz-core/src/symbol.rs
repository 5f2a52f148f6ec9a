//! Generic treatment of fixed-width little-endian symbols.
//!
//! Dictionary, input and output symbols are unsigned integers of 8, 16, 32
//! or 64 bits; suffix-array entries are 32 or 64 bits. The [`Symbol`] trait
//! captures the handful of operations the codec needs from such an integer,
//! and the width enums carry the user's choice up to the point where the
//! concrete instantiation is selected.

use std::fmt::Debug;
use std::io::{self, Write};

use crate::error::{OxiRlzError, Result};

/// An unsigned fixed-width integer read and written in little-endian order.
///
/// Implemented for `u8`, `u16`, `u32` and `u64`. Dictionary symbols and
/// suffix-array entries both go through this trait; the suffix array simply
/// restricts itself to the two wider types.
pub trait Symbol: Copy + Eq + Ord + Debug + Send + Sync + 'static {
    /// Width of one symbol in bytes.
    const BYTES: usize;

    /// Decode one symbol from exactly [`Self::BYTES`] little-endian bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Write this symbol to `out` as little-endian bytes.
    fn write_le<W: Write>(self, out: &mut W) -> io::Result<()>;

    /// Zero-extend to 64 bits.
    fn to_u64(self) -> u64;

    /// Truncate a 64-bit value to this width.
    fn from_u64(value: u64) -> Self;
}

macro_rules! impl_symbol {
    ($ty:ty) => {
        impl Symbol for $ty {
            const BYTES: usize = std::mem::size_of::<$ty>();

            fn from_le_slice(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(&bytes[..Self::BYTES]);
                <$ty>::from_le_bytes(buf)
            }

            fn write_le<W: Write>(self, out: &mut W) -> io::Result<()> {
                out.write_all(&self.to_le_bytes())
            }

            fn to_u64(self) -> u64 {
                self as u64
            }

            fn from_u64(value: u64) -> Self {
                value as $ty
            }
        }
    };
}

impl_symbol!(u8);
impl_symbol!(u16);
impl_symbol!(u32);
impl_symbol!(u64);

/// Width of dictionary/input/output symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolWidth {
    /// 8-bit symbols (plain bytes), the default.
    W8,
    /// 16-bit symbols.
    W16,
    /// 32-bit symbols.
    W32,
    /// 64-bit symbols.
    W64,
}

impl SymbolWidth {
    /// Parse a bit count into a width, rejecting anything but 8/16/32/64.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(Self::W8),
            16 => Ok(Self::W16),
            32 => Ok(Self::W32),
            64 => Ok(Self::W64),
            _ => Err(OxiRlzError::InvalidSymbolWidth { bits }),
        }
    }

    /// Width in bits.
    pub fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    /// Width in bytes.
    pub fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }
}

/// Width of suffix-array entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaWidth {
    /// 32-bit entries, enough for dictionaries below 2^32 symbols.
    W32,
    /// 64-bit entries for big dictionaries.
    W64,
}

impl SaWidth {
    /// Parse a bit count into a width, rejecting anything but 32/64.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            32 => Ok(Self::W32),
            64 => Ok(Self::W64),
            _ => Err(OxiRlzError::InvalidSaWidth { bits }),
        }
    }

    /// Width in bits.
    pub fn bits(self) -> u32 {
        match self {
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_le_widths() {
        assert_eq!(u8::from_le_slice(&[0xAB]), 0xAB);
        assert_eq!(u16::from_le_slice(&[0x34, 0x12]), 0x1234);
        assert_eq!(u32::from_le_slice(&[0x78, 0x56, 0x34, 0x12]), 0x1234_5678);
        assert_eq!(
            u64::from_le_slice(&[0xEF, 0xCD, 0xAB, 0x89, 0x67, 0x45, 0x23, 0x01]),
            0x0123_4567_89AB_CDEF
        );
    }

    #[test]
    fn test_write_le_roundtrip() {
        let mut buf = Vec::new();
        0x1234u16.write_le(&mut buf).unwrap();
        assert_eq!(buf, [0x34, 0x12]);
        assert_eq!(u16::from_le_slice(&buf), 0x1234);
    }

    #[test]
    fn test_truncation() {
        assert_eq!(u8::from_u64(0x1FF), 0xFF);
        assert_eq!(u16::from_u64(0x1_0001), 1);
        assert_eq!(u64::from_u64(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_width_parsing() {
        assert_eq!(SymbolWidth::from_bits(8).unwrap(), SymbolWidth::W8);
        assert_eq!(SymbolWidth::from_bits(64).unwrap().bytes(), 8);
        assert!(SymbolWidth::from_bits(24).is_err());

        assert_eq!(SaWidth::from_bits(32).unwrap(), SaWidth::W32);
        assert!(SaWidth::from_bits(8).is_err());
    }
}
