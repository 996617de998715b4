//! Parse tree to AST conversion.
//!
//! Given the parse tree
//!
//! ```text
//! a
//! |- b
//! |  '- d
//! |     '- e
//! |        |- f
//! |        '- g
//! '- c
//! ```
//!
//! flattening keeps `a` and `e` and drops `b` and `d`:
//!
//! ```text
//! a
//! |- e
//! |  |- f
//! |  '- g
//! '- c
//! ```
//!
//! A rule node is kept only if it has two or more children (or none at all).
//! A chain of single-child rules disappears and its first descendant that is
//! a token or branches takes its place, the root included.

use std::sync::Arc;

use parseva_cst::{Position, RawNode};
use parseva_kinds::{Error, Registry, names};
use rustc_hash::FxHashMap;

use crate::arena::Arena;
use crate::tree::{AstNode, AstTree, NodeId, NodeRange, Payload, Rule, Token};

/// How line numbers are stored in the AST.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineBase {
    /// Lines as reported by the parser, starting at 1.
    #[default]
    OneBased,
    /// Lines starting at 0.
    ZeroBased,
}

/// Converts raw parse trees into [`AstTree`]s.
///
/// Rule labels are resolved once per flattener and cached, so reusing one
/// flattener over many trees of the same grammar only resolves each label
/// once.
pub struct Flattener<'r> {
    registry: &'r Registry,
    line_base: LineBase,
    rules: FxHashMap<Box<str>, Rule>,
}

impl<'r> Flattener<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry, line_base: LineBase::default(), rules: FxHashMap::default() }
    }

    pub fn line_base(mut self, line_base: LineBase) -> Self {
        self.line_base = line_base;
        self
    }

    /// Flattens `raw`, failing on the first rule label that cannot be
    /// classified.
    pub fn flatten(&mut self, raw: &RawNode) -> Result<AstTree, Error> {
        let mut nodes = Arena::new();
        let raw = elide(raw);
        let root = nodes.alloc(self.node(raw, None, 0)?);

        let mut work = vec![(root, raw)];
        while let Some((id, raw)) = work.pop() {
            let children = raw.children();
            if children.is_empty() {
                continue;
            }

            let first = nodes.next_key();
            for (index, child) in children.iter().enumerate() {
                nodes.alloc(self.node(elide(child), Some(id), index)?);
            }
            let range = NodeRange::new(first, nodes.next_key());
            nodes[id].children = range;

            work.extend(range.iter().zip(children).rev().map(|(id, child)| (id, elide(child))));
        }

        // Children are allocated after their parent, so walking backwards
        // sees every child's start before its parent needs it.
        let rules = nodes
            .iter_enumerated()
            .rev()
            .filter(|(_, node)| !node.children.is_empty())
            .map(|(id, node)| (id, node.children))
            .collect::<Vec<_>>();
        for (id, children) in rules {
            nodes[id].start = children.iter().find_map(|child| nodes[child].start);
        }

        Ok(AstTree { nodes, root })
    }

    fn node(
        &mut self,
        raw: &RawNode,
        parent: Option<NodeId>,
        index: usize,
    ) -> Result<AstNode, Error> {
        let (payload, start) = match raw {
            RawNode::Token(token) => {
                let position = self.position(token.position);
                let token = Token { kind: token.kind, text: token.text.as_str().into(), position };
                (Payload::Token(token), Some(position))
            }
            RawNode::Rule(rule) => (Payload::Rule(self.classify(&rule.label)?), None),
        };

        Ok(AstNode {
            payload,
            parent,
            sibling_index: index.try_into().expect("too many children"),
            children: NodeRange::EMPTY,
            start,
        })
    }

    fn classify(&mut self, label: &str) -> Result<Rule, Error> {
        if let Some(rule) = self.rules.get(label) {
            return Ok(rule.clone());
        }

        let name = names::canonical_name(label)?;
        let kind = self.registry.resolve(&name)?;
        let rule = Rule { name: Arc::from(name), kind };
        self.rules.insert(label.into(), rule.clone());
        Ok(rule)
    }

    fn position(&self, position: Position) -> Position {
        match self.line_base {
            LineBase::OneBased => position,
            LineBase::ZeroBased => position.to_zero_based(),
        }
    }
}

/// Flattens `raw` with default settings.
pub fn flatten(registry: &Registry, raw: &RawNode) -> Result<AstTree, Error> {
    Flattener::new(registry).flatten(raw)
}

/// Skips single-child rule nodes.
fn elide(mut raw: &RawNode) -> &RawNode {
    while let [only] = raw.children() {
        raw = only;
    }
    raw
}

#[cfg(test)]
mod tests {
    use parseva_kinds::{TokenKind, TokenTable};

    use super::*;

    fn registry() -> Registry {
        let table = TokenTable::parse("ID=1\nCOMMA=2\nLIST=100\nPAIR=101\nEMPTY=102\n").unwrap();
        Registry::build(&table).unwrap()
    }

    fn tok(text: &str, line: u32, column: u32) -> RawNode {
        RawNode::token(1, text, Position::new(line, column))
    }

    #[test]
    fn single_child_chain_is_elided() {
        let raw = RawNode::rule(
            "AContext",
            [RawNode::rule(
                "BContext",
                [RawNode::rule("PairContext", [tok("x", 1, 0), tok("y", 1, 2)])],
            )],
        );
        let tree = flatten(&registry(), &raw).unwrap();

        assert_eq!(tree.len(), 3);
        let root = &tree[tree.root()];
        assert_eq!(root.payload(), &Payload::Rule(Rule { name: "PAIR".into(), kind: TokenKind::new(101) }));
        assert_eq!(root.parent(), None);
        let texts = tree
            .children(tree.root())
            .iter()
            .map(|child| match child.payload() {
                Payload::Token(token) => &*token.text,
                Payload::Rule(rule) => &*rule.name,
            })
            .collect::<Vec<_>>();
        assert_eq!(texts, ["x", "y"]);
    }

    #[test]
    fn lone_token() {
        let raw = RawNode::token(42, "foo", Position::new(3, 5));
        let tree = flatten(&registry(), &raw).unwrap();

        assert_eq!(tree.len(), 1);
        let root = &tree[tree.root()];
        assert_eq!(
            root.payload(),
            &Payload::Token(Token {
                kind: TokenKind::new(42),
                text: "foo".into(),
                position: Position::new(3, 5),
            })
        );
        assert!(root.children().is_empty());
        assert_eq!(root.start(), Some(Position::new(3, 5)));
    }

    #[test]
    fn root_chain_down_to_a_token() {
        let raw = RawNode::rule("AContext", [RawNode::rule("BContext", [tok("x", 1, 0)])]);
        let tree = flatten(&registry(), &raw).unwrap();

        assert_eq!(tree.len(), 1);
        assert!(tree[tree.root()].is_token());
    }

    #[test]
    fn chains_below_a_branch_are_elided() {
        // LIST(PAIR-chain(x, y), COMMA, Wrapper(z))
        let raw = RawNode::rule(
            "ListContext",
            [
                RawNode::rule("WrapContext", [RawNode::rule("PairContext", [tok("x", 1, 0), tok("y", 1, 2)])]),
                RawNode::token(2, ",", Position::new(1, 3)),
                RawNode::rule("WrapContext", [tok("z", 2, 0)]),
            ],
        );
        let tree = flatten(&registry(), &raw).unwrap();

        let kinds = tree.children(tree.root()).iter().map(AstNode::kind).collect::<Vec<_>>();
        assert_eq!(kinds, [TokenKind::new(101), TokenKind::new(2), TokenKind::new(1)]);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn parents_and_sibling_indices() {
        let raw = RawNode::rule(
            "ListContext",
            [tok("a", 1, 0), RawNode::rule("PairContext", [tok("b", 1, 2), tok("c", 1, 4)]), tok("d", 1, 6)],
        );
        let tree = flatten(&registry(), &raw).unwrap();

        for id in tree.preorder() {
            let node = &tree[id];
            let Some(parent) = node.parent() else {
                assert_eq!(id, tree.root());
                assert_eq!(node.sibling_index(), 0);
                continue;
            };
            let position = tree[parent].children().iter().position(|child| child == id).unwrap();
            assert_eq!(node.sibling_index(), position);
        }
    }

    #[test]
    fn rule_start_is_first_token() {
        let raw = RawNode::rule(
            "ListContext",
            [
                RawNode::rule("WrapContext", [RawNode::rule("PairContext", [tok("x", 4, 2), tok("y", 4, 4)])]),
                tok("z", 5, 0),
            ],
        );
        let tree = flatten(&registry(), &raw).unwrap();

        assert_eq!(tree[tree.root()].start(), Some(Position::new(4, 2)));
        let pair = tree.children(tree.root())[0].clone();
        assert_eq!(pair.start(), Some(Position::new(4, 2)));
    }

    #[test]
    fn zero_based_lines() {
        let raw = RawNode::rule("PairContext", [tok("x", 1, 0), tok("y", 3, 7)]);
        let registry = registry();
        let tree = Flattener::new(&registry).line_base(LineBase::ZeroBased).flatten(&raw).unwrap();

        let starts = tree.children(tree.root()).iter().map(AstNode::start).collect::<Vec<_>>();
        assert_eq!(starts, [Some(Position::new(0, 0)), Some(Position::new(2, 7))]);
        assert_eq!(tree[tree.root()].start(), Some(Position::new(0, 0)));
    }

    #[test]
    fn empty_rule_is_kept() {
        let raw = RawNode::rule("PairContext", [tok("x", 1, 0), RawNode::rule("EmptyContext", [])]);
        let tree = flatten(&registry(), &raw).unwrap();

        let empty = &tree.children(tree.root())[1];
        assert_eq!(empty.kind(), TokenKind::new(102));
        assert!(empty.children().is_empty());
        assert_eq!(empty.start(), None);
    }

    #[test]
    fn unknown_token_name() {
        let raw = RawNode::rule("PairContext", [tok("x", 1, 0), RawNode::rule("MysteryContext", [tok("a", 1, 1), tok("b", 1, 2)])]);
        let err = flatten(&registry(), &raw).unwrap_err();
        assert_eq!(err, Error::UnknownTokenName { name: "MYSTERY".into() });
    }

    #[test]
    fn malformed_label() {
        let raw = RawNode::rule("Pair", [tok("x", 1, 0), tok("y", 1, 1)]);
        let err = flatten(&registry(), &raw).unwrap_err();
        assert_eq!(err, Error::MalformedLabel { label: "Pair".into() });
    }

    #[test]
    fn elided_labels_are_never_resolved() {
        // `Wrapper` has no `Context` suffix, but it only ever has one child.
        let raw = RawNode::rule("Wrapper", [RawNode::rule("PairContext", [tok("x", 1, 0), tok("y", 1, 1)])]);
        assert!(flatten(&registry(), &raw).is_ok());
    }

    #[test]
    fn labels_are_cached() {
        let registry = registry();
        let mut flattener = Flattener::new(&registry);
        let raw = RawNode::rule("PairContext", [tok("x", 1, 0), tok("y", 1, 1)]);
        let first = flattener.flatten(&raw).unwrap();
        let second = flattener.flatten(&raw).unwrap();
        assert_eq!(first, second);
        assert_eq!(flattener.rules.len(), 1);
    }

    #[test]
    fn deep_trees_do_not_recurse() {
        let mut raw = tok("leaf", 1, 0);
        for _ in 0..50_000 {
            raw = RawNode::rule("PairContext", [raw, tok("x", 1, 1)]);
        }
        let tree = flatten(&registry(), &raw).unwrap();
        assert_eq!(tree.len(), 100_001);
        assert_eq!(tree[tree.root()].start(), Some(Position::new(1, 0)));
    }

    #[test]
    fn rule_start_skips_empty_rules() {
        let raw = RawNode::rule("PairContext", [RawNode::rule("EmptyContext", []), tok("x", 2, 3)]);
        let tree = flatten(&registry(), &raw).unwrap();
        assert_eq!(tree[tree.root()].start(), Some(Position::new(2, 3)));
    }
}
