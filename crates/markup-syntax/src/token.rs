//! Classified tokens consumed by the tree builder.
//!
//! A token stream is any `Iterator<Item = Token>`. The default scanner lives
//! in [`crate::lexer`], but the tree builder only relies on the contract:
//!
//! - every delimiter-capable character appears exactly once, already
//!   classified as [`Token::LeftDelimiter`] or [`Token::RightDelimiter`]
//!   (or folded into text when it is neither);
//! - all other characters are coalesced into [`Token::Text`] runs;
//! - the stream is forward-only and finite.

use std::fmt;

/// A single token of inline markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// A run of characters with no markup meaning.
    Text(String),
    /// A delimiter that opens a span, e.g. the first `*` in `*bold*`.
    LeftDelimiter(char),
    /// A delimiter that closes a span, e.g. the last `*` in `*bold*`.
    RightDelimiter(char),
}

impl Token {
    /// Create a text token.
    pub fn text(content: impl Into<String>) -> Self {
        Token::Text(content.into())
    }

    /// The delimiter character carried by this token, if any.
    pub fn delimiter(&self) -> Option<char> {
        match self {
            Token::Text(_) => None,
            Token::LeftDelimiter(c) | Token::RightDelimiter(c) => Some(*c),
        }
    }
}

/// Tokens display as the source text they were scanned from. This is what a
/// delimiter degrades to when the tree builder cannot pair it.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Text(text) => f.write_str(text),
            Token::LeftDelimiter(c) | Token::RightDelimiter(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equality_is_structural() {
        assert_eq!(Token::text("a"), Token::Text("a".to_string()));
        assert_eq!(Token::LeftDelimiter('*'), Token::LeftDelimiter('*'));
        assert_ne!(Token::LeftDelimiter('*'), Token::RightDelimiter('*'));
        assert_ne!(Token::LeftDelimiter('*'), Token::LeftDelimiter('_'));
        assert_ne!(Token::text("*"), Token::LeftDelimiter('*'));
    }

    #[test]
    fn display_is_source_text() {
        assert_eq!(Token::text("hello").to_string(), "hello");
        assert_eq!(Token::LeftDelimiter('_').to_string(), "_");
        assert_eq!(Token::RightDelimiter('~').to_string(), "~");
    }

    #[test]
    fn delimiter_accessor() {
        assert_eq!(Token::text("x").delimiter(), None);
        assert_eq!(Token::LeftDelimiter('*').delimiter(), Some('*'));
        assert_eq!(Token::RightDelimiter('*').delimiter(), Some('*'));
    }
}
