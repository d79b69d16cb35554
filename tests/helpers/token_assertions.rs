//! Decoding and assertion helpers for semantic token output.

use tssh::ide::{TokenModifier, TokenType, decode};

/// One decoded token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub start: u32,
    pub length: u32,
    pub kind: TokenType,
    pub modifiers: TokenModifier,
}

/// Decode a flat token list, failing on malformed triples.
pub fn decode_all(spans: &[u32]) -> Vec<Decoded> {
    assert_eq!(spans.len() % 3, 0, "token list is not made of triples: {spans:?}");
    spans
        .chunks_exact(3)
        .map(|t| {
            let (kind, modifiers) =
                decode(t[2]).unwrap_or_else(|| panic!("undecodable packed value {}", t[2]));
            Decoded {
                start: t[0],
                length: t[1],
                kind,
                modifiers,
            }
        })
        .collect()
}

/// The token starting at `offset`, if any.
pub fn token_at(spans: &[u32], offset: u32) -> Option<Decoded> {
    decode_all(spans).into_iter().find(|t| t.start == offset)
}

/// Source text covered by each token.
pub fn token_texts<'a>(source: &'a str, spans: &[u32]) -> Vec<&'a str> {
    decode_all(spans)
        .iter()
        .map(|t| &source[t.start as usize..(t.start + t.length) as usize])
        .collect()
}
