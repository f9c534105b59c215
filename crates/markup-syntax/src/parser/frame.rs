//! The recursive frame algorithm.
//!
//! Each left delimiter starts a new frame (a recursive call of
//! [`TreeBuilder::frame`]). Frames keep their own `elements` list but share a
//! single stack of open delimiters. The stack is owned by the top-level parse
//! call and borrowed mutably by every frame through `&mut self`. Sharing it is
//! what lets one closer deep in the recursion terminate several enclosing
//! frames at once.

use log::trace;

use super::ParseError;
use crate::node::{DelimiterTable, Node};
use crate::token::Token;

/// How a frame ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Frame {
    /// A right delimiter closed the frame (or an ancestor). The nodes are
    /// always a single container.
    Matched(char, Vec<Node>),
    /// The token stream ran out first.
    Exhausted(Vec<Node>),
}

pub(crate) struct TreeBuilder<'t, I> {
    tokens: I,
    table: &'t DelimiterTable,
    /// Delimiters that have been opened and not yet closed, innermost last.
    open: Vec<char>,
    max_depth: usize,
}

impl<'t, I: Iterator<Item = Token>> TreeBuilder<'t, I> {
    pub(crate) fn new(tokens: I, table: &'t DelimiterTable, max_depth: usize) -> Self {
        Self {
            tokens,
            table,
            open: Vec::new(),
            max_depth,
        }
    }

    /// Run the root frame and return its nodes.
    pub(crate) fn build(mut self) -> Result<Vec<Node>, ParseError> {
        let nodes = match self.frame(None, 0)? {
            Frame::Matched(_, nodes) | Frame::Exhausted(nodes) => nodes,
        };
        debug_assert!(self.open.is_empty(), "open delimiters left: {:?}", self.open);
        Ok(nodes)
    }

    /// Parse tokens until this frame is closed or the stream ends.
    ///
    /// `opener` is the delimiter whose left token started this frame (`None`
    /// for the root). `depth` counts the frames above this one.
    fn frame(&mut self, opener: Option<char>, depth: usize) -> Result<Frame, ParseError> {
        let mut elements = Vec::new();

        while let Some(token) = self.tokens.next() {
            match token {
                Token::Text(text) => elements.push(Node::Text(text)),

                Token::LeftDelimiter(d) => {
                    if depth >= self.max_depth {
                        return Err(ParseError::DepthLimitExceeded {
                            limit: self.max_depth,
                        });
                    }

                    self.open.push(d);
                    match self.frame(Some(d), depth + 1)? {
                        Frame::Matched(closed, mut children) if closed != d && children.len() == 1 => {
                            // The child closed an ancestor, skipping over `d`.
                            // Flatten it and close this frame too.
                            trace!("delimiter {d:?} absorbed by closing {closed:?}");
                            match children.pop() {
                                Some(Node::Container { children: inner, .. }) => {
                                    elements.extend(inner)
                                }
                                Some(text) => elements.push(text),
                                None => {}
                            }
                            if let Some(kind) = self.table.kind(closed) {
                                return Ok(Frame::Matched(
                                    closed,
                                    vec![Node::container(kind, elements)],
                                ));
                            }
                        }
                        Frame::Matched(_, children) | Frame::Exhausted(children) => {
                            elements.extend(children)
                        }
                    }
                }

                Token::RightDelimiter(d) if self.table.contains(d) && self.open.contains(&d) => {
                    let node = self.close_container(d, elements);
                    return Ok(Frame::Matched(d, vec![node]));
                }

                Token::RightDelimiter(d) => {
                    trace!("closer {d:?} has no opener, keeping it as text");
                    elements.push(Node::Text(d.to_string()));
                }
            }
        }

        if let Some(d) = opener
            && self.open.last() == Some(&d)
        {
            self.open.pop();
            trace!("opener {d:?} never closed, keeping it as text");
            elements.insert(0, Node::Text(d.to_string()));
        }

        Ok(Frame::Exhausted(elements))
    }

    /// Close the span opened by `delimiter`, turning any delimiters opened
    /// after it into literal text at the front of `elements`.
    fn close_container(&mut self, delimiter: char, mut elements: Vec<Node>) -> Node {
        while let Some(popped) = self.open.pop() {
            if popped == delimiter {
                break;
            }
            elements.insert(0, Node::Text(popped.to_string()));
        }

        match self.table.make_container(delimiter, elements) {
            Some(node) => node,
            None => unreachable!("delimiter {delimiter:?} was checked against the table"),
        }
    }
}
