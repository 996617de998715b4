use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use parseva_cst::Position;
use parseva_kinds::TokenKind;

use crate::arena::{Arena, Key, Range};

pub type NodeId = Key<AstNode>;
pub type NodeRange = Range<AstNode>;

/// A lexer token kept as a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lexer's own token type, never looked up by name.
    pub kind: TokenKind,
    pub text: Box<str>,
    pub position: Position,
}

/// A grammar rule that branched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Canonical token name, e.g. `FIELD_DECLARATION`.
    pub name: Arc<str>,
    /// Kind registered for `name`.
    pub kind: TokenKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Token(Token),
    Rule(Rule),
}

impl Payload {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Token(token) => token.kind,
            Self::Rule(rule) => rule.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub(crate) payload: Payload,
    pub(crate) parent: Option<NodeId>,
    pub(crate) sibling_index: u32,
    pub(crate) children: NodeRange,
    pub(crate) start: Option<Position>,
}

impl AstNode {
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn kind(&self) -> TokenKind {
        self.payload.kind()
    }

    pub fn is_token(&self) -> bool {
        matches!(self.payload, Payload::Token(_))
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Position among the parent's children; `0` for the root.
    pub fn sibling_index(&self) -> usize {
        self.sibling_index as usize
    }

    pub fn children(&self) -> NodeRange {
        self.children
    }

    /// Position of the first token covered by this node.
    ///
    /// `None` only for a rule that matched nothing.
    pub fn start(&self) -> Option<Position> {
        self.start
    }
}

/// A flattened syntax tree.
///
/// Nodes live in one arena and refer to each other by [`NodeId`]. The children
/// of a node are allocated next to each other, so they form a [`NodeRange`].
/// Trees are only produced by flattening and never change afterwards.
#[derive(Debug, PartialEq, Eq)]
pub struct AstTree {
    pub(crate) nodes: Arena<AstNode>,
    pub(crate) root: NodeId,
}

impl AstTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> &AstNode {
        &self.nodes[id]
    }

    pub fn children(&self, id: NodeId) -> &[AstNode] {
        &self.nodes[self.nodes[id].children]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Parent before children, children left to right.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { tree: self, stack: vec![NodeRange::single(self.root)] }
    }
}

impl Index<NodeId> for AstTree {
    type Output = AstNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id]
    }
}

impl fmt::Display for AstTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::render::write_tree(self, f)
    }
}

pub struct Preorder<'a> {
    tree: &'a AstTree,
    stack: Vec<NodeRange>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let siblings = self.stack.last_mut()?;
            let Some(id) = siblings.pop_front() else {
                self.stack.pop();
                continue;
            };
            let children = self.tree[id].children;
            if !children.is_empty() {
                self.stack.push(children);
            }
            return Some(id);
        }
    }
}
