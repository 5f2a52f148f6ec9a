//! The in-memory dictionary.

use std::fs;
use std::ops::Index;
use std::path::Path;

use oxirlz_core::{Result, Symbol};

/// An immutable dictionary of fixed-width symbols, held entirely in memory.
///
/// The dictionary file is raw little-endian symbols with no header. It is
/// read once at construction and accessed by symbol index from then on; the
/// parser consults it through the suffix array, the unparser copies token
/// payloads straight out of it.
#[derive(Debug, Clone)]
pub struct Dictionary<T: Symbol> {
    symbols: Vec<T>,
}

impl<T: Symbol> Dictionary<T> {
    /// Read a dictionary file fully into memory.
    ///
    /// A file size that is not a multiple of the symbol width leaves
    /// trailing bytes that cannot form a whole symbol; they are dropped
    /// with a warning.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let trailing = bytes.len() % T::BYTES;
        if trailing != 0 {
            eprintln!(
                "Warning: size of {} is indivisible by {}; ignoring {} trailing byte(s).",
                path.display(),
                T::BYTES,
                trailing
            );
        }
        Ok(Self::from_bytes_quiet(&bytes))
    }

    /// Build a dictionary from raw little-endian bytes.
    ///
    /// Trailing bytes short of a whole symbol are dropped with a warning,
    /// as with [`open`](Self::open).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let trailing = bytes.len() % T::BYTES;
        if trailing != 0 {
            eprintln!(
                "Warning: dictionary size is indivisible by {}; ignoring {} trailing byte(s).",
                T::BYTES,
                trailing
            );
        }
        Self::from_bytes_quiet(bytes)
    }

    fn from_bytes_quiet(bytes: &[u8]) -> Self {
        let symbols = bytes.chunks_exact(T::BYTES).map(T::from_le_slice).collect();
        Self { symbols }
    }

    /// Build a dictionary from symbols already in memory.
    pub fn from_symbols(symbols: Vec<T>) -> Self {
        Self { symbols }
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Size in bytes.
    pub fn size_bytes(&self) -> u64 {
        (self.symbols.len() * T::BYTES) as u64
    }

    /// The symbol at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<T> {
        self.symbols.get(index).copied()
    }

    /// The dictionary contents as a slice.
    pub fn symbols(&self) -> &[T] {
        &self.symbols
    }
}

impl<T: Symbol> Index<usize> for Dictionary<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.symbols[index]
    }
}
