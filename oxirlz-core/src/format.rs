//! Token-stream wire formats.

use std::fmt;
use std::str::FromStr;

use crate::error::OxiRlzError;

/// The four encodings of a token stream.
///
/// All four are self-delimiting: end of stream is conveyed by end of file,
/// never by a trailer or a length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenFormat {
    /// Two little-endian u32 per token (`start_pos`, then `length`).
    #[default]
    U32x2,
    /// Two little-endian u64 per token.
    U64x2,
    /// Whitespace-separated decimal numbers, two per token.
    Ascii,
    /// Variable-byte (LEB128-style) encoding, two fields per token.
    Vbyte,
}

impl TokenFormat {
    /// All formats, in flag order.
    pub const ALL: [TokenFormat; 4] = [Self::U32x2, Self::U64x2, Self::Ascii, Self::Vbyte];

    /// The flag name of this format.
    pub fn name(self) -> &'static str {
        match self {
            Self::U32x2 => "32x2",
            Self::U64x2 => "64x2",
            Self::Ascii => "ascii",
            Self::Vbyte => "vbyte",
        }
    }
}

impl fmt::Display for TokenFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenFormat {
    type Err = OxiRlzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "32x2" => Ok(Self::U32x2),
            "64x2" => Ok(Self::U64x2),
            "ascii" => Ok(Self::Ascii),
            "vbyte" => Ok(Self::Vbyte),
            other => Err(OxiRlzError::unknown_format(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for fmt in TokenFormat::ALL {
            assert_eq!(fmt.name().parse::<TokenFormat>().unwrap(), fmt);
        }
    }

    #[test]
    fn test_unknown_format() {
        let err = "48x2".parse::<TokenFormat>().unwrap_err();
        assert!(matches!(err, OxiRlzError::UnknownFormat { .. }));
    }

    #[test]
    fn test_default_is_32x2() {
        assert_eq!(TokenFormat::default(), TokenFormat::U32x2);
    }
}
