//! Property tests: round-trip, window extraction, and factorisation laws.

mod common;

use common::{longest_prefix_in, suffix_array_of};
use oxirlz_codec::{parse, unparse, Dictionary, Parser, Window};
use oxirlz_core::{Token, TokenFormat};
use proptest::prelude::*;

/// Small alphabets make matches (and near-misses) common.
fn dict_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(b'a'..b'e', 1..40)
}

fn input_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(b'a'..b'f', 0..80)
}

fn tokens_of(dict: &[u8], input: &[u8]) -> Vec<Token> {
    let mut parser = Parser::new(Dictionary::<u8>::from_bytes(dict), suffix_array_of(dict), input);
    let mut tokens = Vec::new();
    while let Some(tok) = parser.next_token().unwrap() {
        tokens.push(tok);
    }
    tokens
}

proptest! {
    #[test]
    fn prop_roundtrip_all_formats(dict in dict_strategy(), input in input_strategy()) {
        let dictionary = Dictionary::<u8>::from_bytes(&dict);
        let sa = suffix_array_of(&dict);
        for format in TokenFormat::ALL {
            let encoded = parse(&input, dictionary.clone(), sa.clone(), format).unwrap();
            let decoded = unparse(&encoded, format, dictionary.clone(), Window::OPEN).unwrap();
            prop_assert_eq!(&decoded, &input, "format {}", format);
        }
    }

    #[test]
    fn prop_window_matches_slice(
        dict in dict_strategy(),
        input in prop::collection::vec(b'a'..b'f', 1..80),
        a_seed in any::<u64>(),
        b_seed in any::<u64>(),
    ) {
        let len = input.len() as u64;
        let a = a_seed % len + 1;
        let b = a + b_seed % (len - a + 1);

        let dictionary = Dictionary::<u8>::from_bytes(&dict);
        let sa = suffix_array_of(&dict);
        let encoded = parse(&input, dictionary.clone(), sa, TokenFormat::U64x2).unwrap();
        let window = Window::new(a, b).unwrap();
        let decoded = unparse(&encoded, TokenFormat::U64x2, dictionary, window).unwrap();
        prop_assert_eq!(&decoded, &input[(a - 1) as usize..b as usize]);
    }

    /// Each copy token is as long as any dictionary match of the remaining
    /// input could possibly be, and literals only stand for symbols the
    /// dictionary lacks entirely.
    #[test]
    fn prop_factorisation_is_maximal(dict in dict_strategy(), input in input_strategy()) {
        let tokens = tokens_of(&dict, &input);
        let mut pos = 0usize;
        for token in tokens {
            let rest = &input[pos..];
            let oracle = longest_prefix_in(rest, &dict);
            if token.is_literal() {
                prop_assert_eq!(oracle, 0, "literal emitted despite a match at {}", pos);
                prop_assert!(!dict.contains(&(token.start_pos as u8)));
                prop_assert_eq!(token.start_pos, rest[0] as u64);
                pos += 1;
            } else {
                prop_assert_eq!(token.length as usize, oracle, "short match at {}", pos);
                // The named range really spells the consumed input.
                let start = token.start_pos as usize;
                let end = start + token.length as usize;
                prop_assert!(end <= dict.len());
                prop_assert_eq!(&dict[start..end], &rest[..token.length as usize]);
                pos += token.length as usize;
            }
        }
        prop_assert_eq!(pos, input.len(), "tokens do not cover the input");
    }

    #[test]
    fn prop_u16_roundtrip(
        dict_syms in prop::collection::vec(0u16..6, 1..24),
        input_syms in prop::collection::vec(0u16..8, 0..40),
    ) {
        let to_bytes = |syms: &[u16]| -> Vec<u8> {
            syms.iter().flat_map(|s| s.to_le_bytes()).collect()
        };
        let dictionary = Dictionary::<u16>::from_bytes(&to_bytes(&dict_syms));
        let sa = suffix_array_of(dictionary.symbols());
        let input = to_bytes(&input_syms);
        let encoded = parse(&input, dictionary.clone(), sa, TokenFormat::Vbyte).unwrap();
        let decoded = unparse(&encoded, TokenFormat::Vbyte, dictionary, Window::OPEN).unwrap();
        prop_assert_eq!(&decoded, &input);
    }
}
