//! # markup-syntax
//!
//! Parses inline markup such as `*strong*`, `_emphasis_` and `~strike~` into a
//! tree of typed nodes. Unmatched or interleaved delimiters never cause an
//! error; they degrade to literal text.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Tokenizer → Tokens → TreeBuilder → Vec<Node>
//!               (Logos)              (recursive frames)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! [Logos] splits the input into segments, then the [`Tokenizer`] classifies
//! each delimiter character as an opener, a closer, or plain text by looking
//! at its neighbours. Ordinary characters are coalesced into text runs.
//!
//! ```text
//! "a *b*" → [Text("a "), LeftDelimiter('*'), Text("b"), RightDelimiter('*')]
//! ```
//!
//! ### 2. Parser ([`parser`] module)
//!
//! The tree builder opens a recursive frame for every left delimiter. All
//! frames share one stack of open delimiters, so a closer deep in the
//! recursion can close several enclosing frames at once when delimiters are
//! improperly nested. Any token stream can be fed in through
//! [`Parser::parse_tokens`]; the tokenizer is only the default source.
//!
//! ### 3. Rendering ([`render`] module)
//!
//! Turns nodes back into markup, plain text, or an indented debug tree.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Quick Start
//!
//! ```
//! use markup_syntax::{parse, Node};
//!
//! assert_eq!(
//!     parse("a *b* c"),
//!     vec![
//!         Node::text("a "),
//!         Node::strong(vec![Node::text("b")]),
//!         Node::text(" c"),
//!     ]
//! );
//!
//! // Unmatched delimiters are kept as text
//! assert_eq!(parse("*oops"), vec![Node::text("*"), Node::text("oops")]);
//! ```
//!
//! ## Configuration
//!
//! The [`DelimiterTable`] decides which characters produce which
//! [`ContainerKind`]. The default maps `*` to strong, `_` to emphasis and
//! `~` to strikethrough.
//!
//! ```
//! use markup_syntax::{ContainerKind, DelimiterTable, Node, Parser};
//!
//! let table = DelimiterTable::empty().with('+', ContainerKind::Strong);
//! let parser = Parser::new(table).with_max_depth(16);
//!
//! assert_eq!(
//!     parser.parse("+yes+").unwrap(),
//!     vec![Node::strong(vec![Node::text("yes")])]
//! );
//! ```

pub mod lexer;
pub mod node;
pub mod parser;
pub mod render;
pub mod token;

pub use lexer::Tokenizer;
pub use node::{ContainerKind, DelimiterTable, Node};
pub use parser::{DEFAULT_MAX_DEPTH, ParseError, Parser, parse};
pub use render::{format_tree, plain_text, to_markup};
pub use token::Token;
