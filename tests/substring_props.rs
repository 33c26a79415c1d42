use online_suffix_tree::{Alphabet, SuffixTree, SuffixTreeError};
use proptest::prelude::*;

mod common;
use common::naive_contains;

fn small_text() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c')], 0..48)
}

fn small_word() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c')], 0..6)
}

proptest! {
    #[test]
    fn agrees_with_naive_search_at_every_time(
        text in small_text(),
        words in proptest::collection::vec(small_word(), 1..8),
    ) {
        let tree = SuffixTree::from_symbols(Alphabet::LOWERCASE, &text).expect("build succeeds");

        for time in 0..=text.len() {
            for word in &words {
                let expected = naive_contains(&text, word, time);
                let actual = tree.contains_at(word, time).expect("time within buffer");
                prop_assert_eq!(actual, expected, "word {:?} at time {}", word, time);
            }
            // Every substring that exists must be found.
            if time > 0 {
                let start = time / 2;
                let slice = &text[start..time];
                prop_assert!(tree.contains_at(slice, time).expect("time within buffer"));
            }
        }
    }

    #[test]
    fn answers_are_idempotent_and_monotonic(
        text in small_text(),
        word in small_word(),
    ) {
        let tree = SuffixTree::from_symbols(Alphabet::LOWERCASE, &text).expect("build succeeds");

        let mut seen = false;
        for time in 0..=text.len() {
            let first = tree.contains_at(&word, time).expect("time within buffer");
            let second = tree.contains_at(&word, time).expect("time within buffer");
            prop_assert_eq!(first, second, "repeated query changed its answer");
            prop_assert!(!seen || first, "answer regressed at time {}", time);
            seen |= first;
        }
    }

    #[test]
    fn online_answers_match_final_tree(
        text in small_text(),
        word in small_word(),
    ) {
        let mut tree = SuffixTree::with_alphabet(Alphabet::LOWERCASE);
        let mut online = Vec::with_capacity(text.len() + 1);
        online.push(tree.contains(&word).expect("valid word"));
        for &symbol in &text {
            tree.push(symbol).expect("valid symbol");
            online.push(tree.contains(&word).expect("valid word"));
        }

        for (time, &answer) in online.iter().enumerate() {
            prop_assert_eq!(tree.contains_at(&word, time).expect("time within buffer"), answer);
        }
    }

    #[test]
    fn node_count_is_bounded(text in proptest::collection::vec(0u8..4, 1..128)) {
        let alphabet = Alphabet::new(0, 4).expect("non-empty alphabet");
        let tree = SuffixTree::from_symbols(alphabet, &text).expect("build succeeds");
        let stats = tree.stats();
        prop_assert!(stats.nodes <= 2 * text.len() - 1);
        prop_assert!(stats.within_node_bound());
        prop_assert!(stats.max_depth <= text.len());
    }

    #[test]
    fn invalid_tokens_do_not_mutate(
        text in small_text(),
        prefix in small_word(),
    ) {
        let mut tree = SuffixTree::from_symbols(Alphabet::LOWERCASE, &text).expect("build succeeds");
        let before = tree.fingerprint();

        let mut token = prefix.clone();
        token.push(b'#');
        let err = tree.extend_from(&token).unwrap_err();
        let is_invalid_symbol = matches!(
            err,
            SuffixTreeError::InvalidSymbol { symbol: b'#', .. }
        );
        prop_assert!(is_invalid_symbol);
        prop_assert_eq!(tree.len(), text.len());
        prop_assert_eq!(tree.fingerprint(), before);
    }
}
