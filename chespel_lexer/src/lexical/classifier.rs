//! General maximal-munch classification over the predicate pairs
use crate::tokens::TokenKind;

/// Byte length of the longest full token of `kind` at the start of `input`.
///
/// The candidate grows one character at a time while it stays a valid
/// prefix; the result is 0 when no full token was seen along the way.
pub fn longest_full_prefix(kind: TokenKind, input: &str) -> usize {
    let mut best = 0;
    for (idx, ch) in input.char_indices() {
        let end = idx + ch.len_utf8();
        let candidate = &input[..end];
        if !kind.is_prefix(candidate) {
            break;
        }
        if kind.is_full(candidate) {
            best = end;
        }
    }
    best
}

/// Winning category and length at the start of `input`, if any category matches.
///
/// Longest match wins; equal lengths go to the category listed first in
/// [`TokenKind::CLASSIFIED`].
pub fn longest_match(input: &str) -> Option<(TokenKind, usize)> {
    let mut best: Option<(TokenKind, usize)> = None;
    for kind in TokenKind::CLASSIFIED {
        let len = longest_full_prefix(kind, input);
        if len > best.map_or(0, |(_, best_len)| best_len) {
            best = Some((kind, len));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_number_beats_minus() {
        assert_eq!(longest_match("-5"), Some((TokenKind::Number, 2)));
        assert_eq!(longest_match("- 5"), Some((TokenKind::Minus, 1)));
        assert_eq!(longest_match("-x"), Some((TokenKind::Minus, 1)));
    }

    #[test]
    fn test_keyword_beats_identifier_on_tie() {
        assert_eq!(longest_match("rule"), Some((TokenKind::Keyword, 4)));
        assert_eq!(longest_match("rule foo"), Some((TokenKind::Keyword, 4)));
        assert_eq!(longest_match("rulex"), Some((TokenKind::Identifier, 5)));
        assert_eq!(longest_match("true"), Some((TokenKind::Boolean, 4)));
        assert_eq!(longest_match("evaluation"), Some((TokenKind::ModuleName, 10)));
        assert_eq!(longest_match("a1"), Some((TokenKind::Cell, 2)));
        assert_eq!(longest_match("me"), Some((TokenKind::Player, 2)));
    }

    #[test]
    fn test_piece_constant_is_longest() {
        assert_eq!(longest_match("pawn-e2-me;"), Some((TokenKind::Piece, 10)));
        // Incomplete triple falls back to the piece type
        assert_eq!(longest_match("pawn-e2"), Some((TokenKind::PieceType, 4)));
    }

    #[test]
    fn test_number_stops_before_dangling_dot() {
        assert_eq!(longest_match("5.x"), Some((TokenKind::Number, 1)));
        assert_eq!(longest_match("5.25;"), Some((TokenKind::Number, 4)));
        assert_eq!(longest_full_prefix(TokenKind::Number, "-"), 0);
    }

    #[test]
    fn test_comments_and_strings() {
        assert_eq!(longest_match("// c\nx"), Some((TokenKind::LineComment, 5)));
        assert_eq!(longest_match("/* c */x"), Some((TokenKind::BlockComment, 7)));
        assert_eq!(longest_match("/ 2"), Some((TokenKind::Slash, 1)));
        assert_eq!(longest_match("\"a b\" c"), Some((TokenKind::String, 5)));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(longest_match("!"), None);
        assert_eq!(longest_match("$9"), None);
        assert_eq!(longest_match("\"open"), None);
        assert_eq!(longest_match("Xyz"), None);
        assert_eq!(longest_match(""), None);
    }

    #[test]
    fn test_two_character_operators() {
        assert_eq!(longest_match("<=1"), Some((TokenKind::LessEqual, 2)));
        assert_eq!(longest_match("==="), Some((TokenKind::Equal, 2)));
        assert_eq!(longest_match("++i"), Some((TokenKind::Increment, 2)));
        assert_eq!(longest_match("!="), Some((TokenKind::NotEqual, 2)));
    }
}
