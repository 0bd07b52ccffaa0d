//! Property tests for the scanner and the comment stripper

use chespel_lexer::config::runtime::LexicalPreferences;
use chespel_lexer::lexical::classifier::longest_match;
use chespel_lexer::lexical::fast_path::{self, FastPath};
use chespel_lexer::lexical::MaximalMunchScanner;
use chespel_lexer::preprocessing::strip_comments;
use chespel_lexer::tokens::{reassemble, TokenKind};
use proptest::prelude::*;

/// Characters that matter to at least one category, plus a few that matter to none
const ALPHABET: &[char] = &[
    'a', 'e', 'h', 'r', 'u', 'l', 'm', 'x', 'p', 'w', 'n', 'K', 'Q', '1', '2', '8', '9', '0',
    '-', '.', '$', '"', '/', '*', '+', '<', '>', '=', '!', ',', ':', ';', '(', ')', '[', ']',
    ' ', '\t', '\n', '_', '#', '?',
];

fn lexical_string(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(ALPHABET), 0..max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Whole words mixed with separators, so vocabulary tokens actually appear
fn chespel_like_string() -> impl Strategy<Value = String> {
    let word = prop::sample::select(vec![
        "rule", "rulex", "score", "let", "if", "in", "with", "module", "evaluation", "pawn",
        "pawn-e2-me", "Q-h8-foe", "e4", "$a", "$9", "$", "-5", "12.5", "5.", "true", "me",
        "\"str\"", "//", "/*", "*/", "!=", "!", "++", "<=", "==", "x_1",
    ]);
    let separator = prop::sample::select(vec![" ", "\t", "\n", ";", ":", "(", ")", ""]);
    prop::collection::vec((word, separator), 0..40).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(word, separator)| format!("{word}{separator}"))
            .collect()
    })
}

fn comment_heavy_string() -> impl Strategy<Value = String> {
    let piece = prop::sample::select(vec!["/", "*", "\"", "a", " ", "\n", "//", "/*", "*/"]);
    prop::collection::vec(piece, 0..60).prop_map(|parts| parts.concat())
}

fn drop_last(s: &str) -> &str {
    match s.char_indices().last() {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

proptest! {
    #[test]
    fn scanning_is_lossless_on_any_text(input in any::<String>()) {
        let output = MaximalMunchScanner::new().scan(&input).unwrap();
        prop_assert_eq!(reassemble(&output.tokens), input);
    }

    #[test]
    fn scanning_is_lossless_on_rule_text(input in chespel_like_string()) {
        let output = MaximalMunchScanner::new().scan(&input).unwrap();
        prop_assert_eq!(reassemble(&output.tokens), input.clone());
        for error in &output.errors {
            prop_assert_eq!(error.text.chars().count(), 1);
        }
    }

    #[test]
    fn comment_stripping_is_idempotent(input in comment_heavy_string()) {
        if let Ok(once) = strip_comments(&input) {
            prop_assert_eq!(strip_comments(&once), Ok(once.clone()));
        }
    }

    #[test]
    fn prefixes_are_closed_under_truncation(input in lexical_string(12)) {
        for kind in TokenKind::CLASSIFIED {
            if kind.is_full(&input) {
                prop_assert!(kind.is_prefix(&input), "{kind} full but not prefix: {input:?}");
            }
            if !input.is_empty() && kind.is_prefix(&input) {
                let shorter = drop_last(&input);
                prop_assert!(kind.is_prefix(shorter), "{kind}: {input:?} -> {shorter:?}");
            }
        }
    }

    #[test]
    fn fast_path_agrees_with_predicates(input in lexical_string(8)) {
        let general = longest_match(&input);
        match fast_path::classify(&input) {
            FastPath::Token(kind, len) => prop_assert_eq!(Some((kind, len)), general),
            FastPath::Unrecognized => prop_assert_eq!(None, general),
            FastPath::Fallback => {}
        }
    }

    #[test]
    fn fast_and_general_scans_agree(input in chespel_like_string()) {
        let fast = MaximalMunchScanner::new().scan(&input).unwrap();
        let general = MaximalMunchScanner::with_preferences(LexicalPreferences {
            use_fast_path: false,
            ..Default::default()
        })
        .scan(&input)
        .unwrap();
        prop_assert_eq!(fast.tokens, general.tokens);
        prop_assert_eq!(fast.errors, general.errors);
    }

    #[test]
    fn classification_is_deterministic(input in lexical_string(10)) {
        prop_assert_eq!(longest_match(&input), longest_match(&input));
        let scanner = MaximalMunchScanner::new();
        prop_assert_eq!(scanner.classify(&input), scanner.classify(&input));
    }
}

/// Every string of up to two alphabet characters, checked exhaustively
#[test]
fn short_strings_exhaustively() {
    let mut inputs = vec![String::new()];
    for &a in ALPHABET {
        inputs.push(a.to_string());
        for &b in ALPHABET {
            inputs.push(format!("{a}{b}"));
        }
    }

    for input in &inputs {
        for kind in TokenKind::CLASSIFIED {
            if kind.is_full(input) {
                assert!(kind.is_prefix(input), "{kind}: {input:?}");
            }
            if !input.is_empty() && kind.is_prefix(input) {
                assert!(kind.is_prefix(drop_last(input)), "{kind}: {input:?}");
            }
        }

        if let FastPath::Token(kind, len) = fast_path::classify(input) {
            assert_eq!(Some((kind, len)), longest_match(input), "{input:?}");
        }
    }
}
