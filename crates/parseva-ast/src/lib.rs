//! Simplified syntax trees.
//!
//! [`flatten`] turns a raw parse tree into an [`AstTree`] that keeps every
//! token and every rule that branched, classifying rules through a
//! [`Registry`](parseva_kinds::Registry). [`render`] prints the result as a
//! deterministic text diagram.

mod arena;
mod flatten;
mod render;
#[cfg(test)]
mod tests;
mod tree;

pub use arena::{Key, Range};
pub use flatten::{Flattener, LineBase, flatten};
pub use render::render;
pub use tree::{AstNode, AstTree, NodeId, NodeRange, Payload, Preorder, Rule, Token};
