//! Plain-text tree diagrams.
//!
//! One line per node, in pre-order:
//!
//! ```text
//! '- FIELD_DECLARATION
//!    |- TOKEN[type: 102, text: int]
//!    |- VARIABLE_DECLARATOR
//!    |  |- TOKEN[type: 102, text: x]
//!    |  |- TOKEN[type: 71, text: =]
//!    |  '- TOKEN[type: 60, text: 1]
//!    '- TOKEN[type: 67, text: ;]
//! ```
//!
//! This text is what golden files compare against, so the format is fixed:
//! `|- ` marks a node with siblings still to come, `'- ` the last child.
//! Each ancestor level contributes `|  ` while it still has siblings pending
//! and three spaces once it has none. Newlines inside token text are written
//! as `\n` so that a node never spans more than one line.

use std::fmt::{self, Write};

use crate::tree::{AstTree, NodeRange, Payload};

const BRANCH: &str = "|- ";
const LAST_BRANCH: &str = "'- ";
const CONTINUATION: &str = "|  ";
const PADDING: &str = "   ";

/// Renders `tree` into a new string.
pub fn render(tree: &AstTree) -> String {
    tree.to_string()
}

pub(crate) fn write_tree(tree: &AstTree, out: &mut impl Write) -> fmt::Result {
    // Each entry holds the siblings still to be printed at one depth.
    let mut stack = vec![NodeRange::single(tree.root())];

    while let Some(siblings) = stack.last_mut() {
        let Some(id) = siblings.pop_front() else {
            stack.pop();
            continue;
        };
        let is_last = siblings.is_empty();

        let depth = stack.len() - 1;
        for ancestors in &stack[..depth] {
            out.write_str(if ancestors.is_empty() { PADDING } else { CONTINUATION })?;
        }
        out.write_str(if is_last { LAST_BRANCH } else { BRANCH })?;

        let node = &tree[id];
        match node.payload() {
            Payload::Token(token) => {
                write!(out, "TOKEN[type: {}, text: ", token.kind)?;
                write_escaped(&token.text, out)?;
                out.write_char(']')?;
            }
            Payload::Rule(rule) => out.write_str(&rule.name)?,
        }
        out.write_char('\n')?;

        if !node.children().is_empty() {
            stack.push(node.children());
        }
    }

    Ok(())
}

fn write_escaped(text: &str, out: &mut impl Write) -> fmt::Result {
    let mut lines = text.split('\n');
    if let Some(first) = lines.next() {
        out.write_str(first)?;
    }
    for line in lines {
        out.write_str("\\n")?;
        out.write_str(line)?;
    }
    Ok(())
}
