//! Incremental builder for raw parse trees.

use parseva_kinds::TokenKind;

use crate::{Position, RawNode, RawRule};

/// Builds a `RawNode` tree from parser events.
///
/// Every `start_node` must be matched by a `finish_node`; tokens are attached
/// to the most recently started node. A token emitted while no node is open
/// becomes the whole tree.
pub struct Builder {
    opened: Vec<RawRule>,
    root: Option<RawNode>,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 128;

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self { opened: Vec::with_capacity(DEFAULT_TREE_DEPTH), root: None }
    }

    /// Starts a new rule node with the given structural label.
    pub fn start_node(&mut self, label: impl Into<Box<str>>) {
        self.opened.push(RawRule { label: label.into(), children: Vec::new() });
    }

    /// Finishes the most recently started node.
    #[track_caller]
    pub fn finish_node(&mut self) {
        let rule = self.opened.pop().expect("no opened nodes?");
        self.attach(RawNode::Rule(rule));
    }

    /// Adds a token to the current node.
    pub fn token(&mut self, kind: impl Into<TokenKind>, text: impl Into<String>, position: Position) {
        self.attach(RawNode::token(kind, text, position));
    }

    #[track_caller]
    fn attach(&mut self, node: RawNode) {
        match self.opened.last_mut() {
            Some(parent) => parent.children.push(node),
            None => {
                assert!(self.root.is_none(), "a tree has exactly one root");
                self.root = Some(node);
            }
        }
    }

    /// Finishes building and returns the root.
    #[track_caller]
    pub fn finish(mut self) -> RawNode {
        assert!(self.opened.is_empty(), "unfinished nodes: {}", self.opened.len());
        self.root.take().expect("empty tree")
    }
}
