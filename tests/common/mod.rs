#![allow(dead_code)]

use online_suffix_tree::{Alphabet, SuffixTree};

/// Reference answer: does `word` occur in `text[..time]`?
pub fn naive_contains(text: &[u8], word: &[u8], time: usize) -> bool {
    let prefix = &text[..time];
    word.is_empty() || prefix.windows(word.len()).any(|window| window == word)
}

/// Build a tree over a lower-case text.
pub fn lowercase_tree(text: &str) -> SuffixTree {
    SuffixTree::from_symbols(Alphabet::LOWERCASE, text.as_bytes()).expect("text is lower-case")
}
