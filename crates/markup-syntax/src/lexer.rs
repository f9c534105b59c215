//! # Lexer - Classifying Delimiters
//!
//! This module turns raw text into the [`Token`] stream the tree builder
//! consumes. It works in two passes over the same input:
//!
//! 1. [Logos] splits the text into coarse [`Segment`]s: whitespace runs,
//!    letter/digit runs, and single symbol characters.
//! 2. [`Tokenizer`] looks at every symbol that is a delimiter character and
//!    decides from its neighbours whether it opens, closes, or is literal.
//!    Everything else is coalesced into [`Token::Text`] runs.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Classification
//!
//! A neighbour is a *boundary* when it is missing (start or end of input),
//! whitespace, or anything other than a letter or digit.
//!
//! - **Closer**: an opener of the same character is still unclosed, the
//!   previous character is not whitespace, and the next one is a boundary.
//!   Closing forgets that opener and every opener recorded after it.
//! - **Opener**: no opener of the same character is unclosed, the previous
//!   character is a boundary, and the next one exists and is not whitespace.
//! - Anything else is literal text.
//!
//! ```
//! use markup_syntax::lexer::tokenize;
//! use markup_syntax::Token;
//!
//! assert_eq!(
//!     tokenize("*hi*"),
//!     vec![
//!         Token::LeftDelimiter('*'),
//!         Token::text("hi"),
//!         Token::RightDelimiter('*'),
//!     ]
//! );
//! ```

use logos::Logos;

use crate::node::DelimiterTable;
use crate::token::Token;

/// Coarse segments produced by Logos. Every byte of the input falls into
/// exactly one segment.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Whitespace, including newlines
    #[regex(r"\s+")]
    Whitespace,

    /// Letters, combining marks and digits
    #[regex(r"[\p{L}\p{M}\p{N}]+")]
    Word,

    /// Any other single character: punctuation, symbols, delimiters
    #[regex(r"[^\s\p{L}\p{M}\p{N}]")]
    Symbol,
}

/// Streaming tokenizer over a source string.
///
/// Implements `Iterator<Item = Token>`, which is the token-stream contract
/// the tree builder expects.
pub struct Tokenizer<'a> {
    source: &'a str,
    segments: logos::SpannedIter<'a, Segment>,
    delimiters: Vec<char>,
    /// Openers emitted so far that have not been closed yet.
    open: Vec<char>,
    /// A delimiter found while a text run was still buffered.
    pending: Option<Token>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer that treats `delimiters` as delimiter-capable.
    pub fn new(source: &'a str, delimiters: impl IntoIterator<Item = char>) -> Self {
        Self {
            source,
            segments: Segment::lexer(source).spanned(),
            delimiters: delimiters.into_iter().collect(),
            open: Vec::new(),
            pending: None,
        }
    }

    /// Create a tokenizer for the delimiters in `table`.
    pub fn for_table(source: &'a str, table: &DelimiterTable) -> Self {
        Self::new(source, table.delimiters())
    }

    fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(&c)
    }

    fn classify(&mut self, c: char, prev: Option<char>, next: Option<char>) -> Option<Token> {
        if let Some(index) = self.open.iter().rposition(|&o| o == c) {
            let closes = prev.is_some_and(|p| !p.is_whitespace()) && is_boundary(next);
            if !closes {
                return None;
            }
            self.open.truncate(index);
            return Some(Token::RightDelimiter(c));
        }

        let opens = is_boundary(prev) && next.is_some_and(|n| !n.is_whitespace());
        if !opens {
            return None;
        }
        self.open.push(c);
        Some(Token::LeftDelimiter(c))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        let mut text = String::new();

        while let Some((segment, span)) = self.segments.next() {
            let slice = &self.source[span.clone()];

            // Logos errors are unrecognised bytes; they are just text.
            if segment == Ok(Segment::Symbol)
                && let Some(c) = slice.chars().next()
                && self.is_delimiter(c)
            {
                let prev = self.source[..span.start].chars().next_back();
                let next = self.source[span.end..].chars().next();
                if let Some(token) = self.classify(c, prev, next) {
                    if text.is_empty() {
                        return Some(token);
                    }
                    self.pending = Some(token);
                    return Some(Token::Text(text));
                }
            }

            text.push_str(slice);
        }

        (!text.is_empty()).then_some(Token::Text(text))
    }
}

fn is_boundary(c: Option<char>) -> bool {
    c.is_none_or(|c| c.is_whitespace() || !c.is_alphanumeric())
}

/// Tokenize with the default delimiter table.
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::for_table(source, &DelimiterTable::default()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use Token::{LeftDelimiter as L, RightDelimiter as R};

    fn t(s: &str) -> Token {
        Token::text(s)
    }

    #[test]
    fn tokenize_empty_input() {
        assert_eq!(tokenize(""), vec![]);
    }

    #[test]
    fn segments_cover_every_byte() {
        let input = "Héllo, *wörld* 42_~!\n\ttab";
        let rebuilt: String = Segment::lexer(input)
            .spanned()
            .map(|(_, span)| &input[span])
            .collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn segment_kinds() {
        let kinds: Vec<_> = Segment::lexer("ab  *1").collect();
        assert_eq!(
            kinds,
            vec![
                Ok(Segment::Word),
                Ok(Segment::Whitespace),
                Ok(Segment::Symbol),
                Ok(Segment::Word),
            ]
        );
    }

    #[test]
    fn plain_text_is_one_run() {
        assert_eq!(tokenize("hello, world!"), vec![t("hello, world!")]);
    }

    #[test]
    fn simple_pair() {
        assert_eq!(tokenize("*bold*"), vec![L('*'), t("bold"), R('*')]);
    }

    #[test]
    fn pair_inside_text() {
        assert_eq!(
            tokenize("a _b_ c"),
            vec![t("a "), L('_'), t("b"), R('_'), t(" c")]
        );
    }

    #[test]
    fn nested_pairs() {
        assert_eq!(
            tokenize("*_x_*"),
            vec![L('*'), L('_'), t("x"), R('_'), R('*')]
        );
    }

    #[test]
    fn punctuation_is_a_boundary() {
        assert_eq!(
            tokenize("(~gone~)."),
            vec![t("("), L('~'), t("gone"), R('~'), t(").")]
        );
    }

    #[rstest]
    #[case::intraword("a*b*c")]
    #[case::surrounded_by_spaces("a * b")]
    #[case::trailing("oops*")]
    #[case::lone("*")]
    #[case::before_space("* not a list")]
    fn literal_delimiters_stay_text(#[case] input: &str) {
        assert_eq!(tokenize(input), vec![t(input)]);
    }

    #[test]
    fn unmatched_opener_is_still_an_opener() {
        assert_eq!(tokenize("*oops"), vec![L('*'), t("oops")]);
    }

    #[test]
    fn closer_needs_an_open_partner() {
        // The trailing `_` looks like a closer but its opener was discarded
        // when the outer `*` closed.
        assert_eq!(
            tokenize("*a _b* c_"),
            vec![L('*'), t("a "), L('_'), t("b"), R('*'), t(" c_")]
        );
    }

    #[test]
    fn same_delimiter_does_not_reopen() {
        assert_eq!(
            tokenize("*a *b* c*"),
            vec![L('*'), t("a *b"), R('*'), t(" c*")]
        );
    }

    #[test]
    fn only_configured_delimiters_are_classified() {
        let tokens: Vec<_> = Tokenizer::new("*a* ^b^", ['^']).collect();
        assert_eq!(tokens, vec![t("*a* "), L('^'), t("b"), R('^')]);
    }

    #[test]
    fn non_ascii_words_are_not_boundaries() {
        assert_eq!(tokenize("é*x*"), vec![t("é*x*")]);
        assert_eq!(tokenize("*ünï*"), vec![L('*'), t("ünï"), R('*')]);
    }

    #[test]
    fn text_is_preserved() {
        let input = "Some *strong _and emphasised_* text, a ~strike~ and stray * marks_";
        let rebuilt: String = tokenize(input).iter().map(Token::to_string).collect();
        assert_eq!(rebuilt, input);
    }
}
