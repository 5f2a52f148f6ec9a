//! Shared helpers for the integration tests.
#![allow(dead_code)] // not every test binary uses every helper

use oxirlz_codec::SuffixArray;

/// Sort the suffix positions of `symbols` lexicographically.
///
/// The codec never builds suffix arrays itself; tests stand in for the
/// external builder with a quadratic sort, which is plenty for test-sized
/// dictionaries. Slice comparison makes a shorter suffix that is a prefix
/// of a longer one sort first, matching the end-of-dictionary convention.
pub fn suffix_array_of<T: Ord>(symbols: &[T]) -> SuffixArray<u32> {
    let mut entries: Vec<u32> = (0..symbols.len() as u32).collect();
    entries.sort_by(|&a, &b| symbols[a as usize..].cmp(&symbols[b as usize..]));
    SuffixArray::from_entries(entries)
}

/// Length of the longest prefix of `input` occurring anywhere in `dict`,
/// by exhaustive search.
pub fn longest_prefix_in<T: Eq>(input: &[T], dict: &[T]) -> usize {
    let mut best = 0;
    for start in 0..dict.len() {
        let mut len = 0;
        while start + len < dict.len() && len < input.len() && dict[start + len] == input[len] {
            len += 1;
        }
        best = best.max(len);
    }
    best
}
