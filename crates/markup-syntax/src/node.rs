//! The node model produced by the tree builder, plus the delimiter table that
//! decides which characters produce which container kind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The kind of a container node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Strong emphasis, `*text*` by default.
    Strong,
    /// Emphasis, `_text_` by default.
    Emphasis,
    /// Strikethrough, `~text~` by default.
    Strikethrough,
}

impl ContainerKind {
    /// All container kinds, in declaration order.
    pub const ALL: [ContainerKind; 3] = [
        ContainerKind::Strong,
        ContainerKind::Emphasis,
        ContainerKind::Strikethrough,
    ];

    /// Human-readable name, as used in tree dumps.
    pub fn name(self) -> &'static str {
        match self {
            ContainerKind::Strong => "Strong",
            ContainerKind::Emphasis => "Emphasis",
            ContainerKind::Strikethrough => "Strikethrough",
        }
    }
}

/// A node of parsed inline markup.
///
/// The root of a parse is a plain `Vec<Node>` forest; there is no implicit
/// wrapper node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// Literal text. Unpaired delimiters also end up here.
    Text(String),
    /// A span opened and closed by a matching pair of delimiters.
    Container {
        kind: ContainerKind,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    pub fn container(kind: ContainerKind, children: Vec<Node>) -> Self {
        Node::Container { kind, children }
    }

    pub fn strong(children: Vec<Node>) -> Self {
        Self::container(ContainerKind::Strong, children)
    }

    pub fn emphasis(children: Vec<Node>) -> Self {
        Self::container(ContainerKind::Emphasis, children)
    }

    pub fn strikethrough(children: Vec<Node>) -> Self {
        Self::container(ContainerKind::Strikethrough, children)
    }

    /// Returns true for [`Node::Text`].
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// The container kind, or `None` for text.
    pub fn kind(&self) -> Option<ContainerKind> {
        match self {
            Node::Text(_) => None,
            Node::Container { kind, .. } => Some(*kind),
        }
    }

    /// Child nodes of a container. Text nodes have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Text(_) => &[],
            Node::Container { children, .. } => children,
        }
    }

    /// Concatenated text of every leaf below this node.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    pub(crate) fn push_plain_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Container { children, .. } => {
                for child in children {
                    child.push_plain_text(out);
                }
            }
        }
    }
}

/// Maps delimiter characters to container kinds.
///
/// Characters missing from the table can still be scanned and pushed as
/// delimiters, but they never produce a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterTable {
    kinds: BTreeMap<char, ContainerKind>,
}

impl DelimiterTable {
    /// An empty table. Nothing will ever pair.
    pub fn empty() -> Self {
        Self {
            kinds: BTreeMap::new(),
        }
    }

    /// Add or replace a mapping.
    pub fn with(mut self, delimiter: char, kind: ContainerKind) -> Self {
        self.insert(delimiter, kind);
        self
    }

    pub fn insert(&mut self, delimiter: char, kind: ContainerKind) -> Option<ContainerKind> {
        self.kinds.insert(delimiter, kind)
    }

    /// The kind `delimiter` produces, if it is in the table.
    pub fn kind(&self, delimiter: char) -> Option<ContainerKind> {
        self.kinds.get(&delimiter).copied()
    }

    pub fn contains(&self, delimiter: char) -> bool {
        self.kinds.contains_key(&delimiter)
    }

    /// The delimiter used to write `kind` back out. When several characters
    /// map to the same kind, the lowest one wins.
    pub fn delimiter_for(&self, kind: ContainerKind) -> Option<char> {
        self.kinds
            .iter()
            .find_map(|(c, k)| (*k == kind).then_some(*c))
    }

    /// Delimiter characters in ascending order.
    pub fn delimiters(&self) -> impl Iterator<Item = char> + '_ {
        self.kinds.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Build a container for `delimiter`, or `None` if the table has no
    /// mapping for it.
    pub fn make_container(&self, delimiter: char, children: Vec<Node>) -> Option<Node> {
        self.kind(delimiter)
            .map(|kind| Node::container(kind, children))
    }
}

impl Default for DelimiterTable {
    /// `*` strong, `_` emphasis, `~` strikethrough.
    fn default() -> Self {
        Self::empty()
            .with('*', ContainerKind::Strong)
            .with('_', ContainerKind::Emphasis)
            .with('~', ContainerKind::Strikethrough)
    }
}

impl FromIterator<(char, ContainerKind)> for DelimiterTable {
    fn from_iter<T: IntoIterator<Item = (char, ContainerKind)>>(iter: T) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}
