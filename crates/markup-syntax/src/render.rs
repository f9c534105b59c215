//! Rendering a node forest back to text.

use std::fmt::Write;

use crate::node::{DelimiterTable, Node};

/// Write `nodes` back out as markup, wrapping each container in the
/// delimiter `table` maps its kind to.
///
/// A container whose kind has no delimiter in the table is written without
/// any, so only its text survives.
pub fn to_markup(nodes: &[Node], table: &DelimiterTable) -> String {
    let mut out = String::new();
    for node in nodes {
        write_markup(node, table, &mut out);
    }
    out
}

fn write_markup(node: &Node, table: &DelimiterTable, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Container { kind, children } => {
            let delimiter = table.delimiter_for(*kind);
            out.extend(delimiter);
            for child in children {
                write_markup(child, table, out);
            }
            out.extend(delimiter);
        }
    }
}

/// Concatenated text of every leaf, without any delimiters.
pub fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.push_plain_text(&mut out);
    }
    out
}

/// Indented one-node-per-line dump, for debugging and snapshots.
///
/// ```text
/// Strong
///   Text "a"
/// Text " b"
/// ```
pub fn format_tree(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_tree(node, 0, &mut out);
    }
    out
}

fn write_tree(node: &Node, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    match node {
        // Writing to a String cannot fail.
        Node::Text(text) => {
            let _ = writeln!(out, "{prefix}Text {text:?}");
        }
        Node::Container { kind, children } => {
            let _ = writeln!(out, "{prefix}{}", kind.name());
            for child in children {
                write_tree(child, indent + 1, out);
            }
        }
    }
}
