//! # Parser - Delimiter Matching
//!
//! This module turns a [`Token`] stream into a forest of [`Node`]s.
//!
//! ## Pipeline
//!
//! ```text
//! Source Text → Tokenizer → Tokens → TreeBuilder → Vec<Node>
//!               (Logos)              (frames + shared stack)
//! ```
//!
//! ## Error Tolerance
//!
//! Malformed input never fails. An opener without a closer, a closer without
//! an opener, and a delimiter the [`DelimiterTable`] does not know all end up
//! as [`Node::Text`] holding the original character.
//!
//! The only error is [`ParseError::DepthLimitExceeded`]: nesting is bounded
//! so adversarial input cannot exhaust the call stack. The free function
//! [`parse`] turns that error into a single text node as well.
//!
//! ## Mismatched Nesting
//!
//! A closer that matches an opener further out closes every frame in
//! between. Delimiters opened in those frames are kept as text:
//!
//! ```
//! use markup_syntax::{parse, Node};
//!
//! assert_eq!(
//!     parse("*a _b* c"),
//!     vec![
//!         Node::strong(vec![Node::text("a "), Node::text("_"), Node::text("b")]),
//!         Node::text(" c"),
//!     ]
//! );
//! ```

mod frame;

use log::{debug, warn};
use thiserror::Error;

use crate::lexer::Tokenizer;
use crate::node::{DelimiterTable, Node};
use crate::token::Token;
use frame::TreeBuilder;

/// Default bound on delimiter nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("delimiters nested deeper than the limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

/// Parser configuration.
///
/// A `Parser` holds no parse state. Each call to [`Parser::parse`] creates
/// its own token stream and open-delimiter stack, so one `Parser` can be
/// shared freely, including across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parser {
    table: DelimiterTable,
    generic_delimiters: Vec<char>,
    max_depth: usize,
}

impl Parser {
    pub fn new(table: DelimiterTable) -> Self {
        Self {
            table,
            generic_delimiters: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum delimiter nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Scan these characters as delimiters even though the table has no
    /// container for them. They pair up in the scanner but always come out
    /// of the parser as text.
    pub fn with_generic_delimiters(mut self, delimiters: impl IntoIterator<Item = char>) -> Self {
        for c in delimiters {
            if !self.table.contains(c) && !self.generic_delimiters.contains(&c) {
                self.generic_delimiters.push(c);
            }
        }
        self
    }

    pub fn table(&self) -> &DelimiterTable {
        &self.table
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn generic_delimiters(&self) -> &[char] {
        &self.generic_delimiters
    }

    /// Every character the scanner treats as a delimiter.
    pub fn delimiters(&self) -> impl Iterator<Item = char> + '_ {
        self.table
            .delimiters()
            .chain(self.generic_delimiters.iter().copied())
    }

    /// Tokenize and parse `text`.
    pub fn parse(&self, text: &str) -> Result<Vec<Node>, ParseError> {
        self.parse_tokens(Tokenizer::new(text, self.delimiters()))
    }

    /// Like [`Parser::parse`], but input nested deeper than the limit comes
    /// back as one text node holding the whole input.
    pub fn parse_lossy(&self, text: &str) -> Vec<Node> {
        match self.parse(text) {
            Ok(nodes) => nodes,
            Err(err) => {
                warn!("{err}; returning input as plain text");
                vec![Node::text(text)]
            }
        }
    }

    /// Parse an already classified token stream.
    pub fn parse_tokens<I>(&self, tokens: I) -> Result<Vec<Node>, ParseError>
    where
        I: IntoIterator<Item = Token>,
    {
        let nodes = TreeBuilder::new(tokens.into_iter(), &self.table, self.max_depth).build()?;
        debug!("parsed {} top-level nodes", nodes.len());
        Ok(nodes)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(DelimiterTable::default())
    }
}

/// Parse `text` with the default delimiter table.
///
/// Never fails. See [`Parser::parse_lossy`].
pub fn parse(text: &str) -> Vec<Node> {
    Parser::default().parse_lossy(text)
}
