//! Concrete parse trees as handed over by a grammar-driven parser.
//!
//! Every node is either a token, produced by the lexer, or a rule, labelled
//! with the name of the generated node type of the grammar rule that matched
//! it. Trees are plain owned values; parsers either construct them directly or
//! feed their events into a [`Builder`].

mod builder;
mod raw;

/// Event-driven construction of a `RawNode` tree.
pub use builder::Builder;
/// Raw tree types.
pub use raw::{Position, RawNode, RawRule, RawToken};
