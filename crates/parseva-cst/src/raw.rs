use parseva_kinds::TokenKind;
use serde::{Deserialize, Serialize};

/// Location of a token as reported by the parser.
///
/// Lines are 1-based and columns 0-based, exactly as generated parsers report
/// them. Use [`Position::to_zero_based`] where a 0-based line is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The same position with a 0-based line.
    pub const fn to_zero_based(self) -> Self {
        Self { line: self.line.saturating_sub(1), column: self.column }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawToken {
    pub kind: TokenKind,
    pub text: String,
    #[serde(flatten)]
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRule {
    /// Name of the generated node type, e.g. `FieldDeclarationContext`.
    pub label: Box<str>,
    #[serde(default)]
    pub children: Vec<RawNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawNode {
    Token(RawToken),
    Rule(RawRule),
}

impl RawNode {
    pub fn token(kind: impl Into<TokenKind>, text: impl Into<String>, position: Position) -> Self {
        Self::Token(RawToken { kind: kind.into(), text: text.into(), position })
    }

    pub fn rule(label: impl Into<Box<str>>, children: impl IntoIterator<Item = Self>) -> Self {
        Self::Rule(RawRule { label: label.into(), children: children.into_iter().collect() })
    }

    pub fn children(&self) -> &[Self] {
        match self {
            Self::Token(_) => &[],
            Self::Rule(rule) => &rule.children,
        }
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Token(_) => None,
            Self::Rule(rule) => Some(&rule.label),
        }
    }

    /// Reads a tree from its JSON form.
    ///
    /// Nesting depth is unbounded: the stack grows on demand instead of
    /// failing at `serde_json`'s default recursion limit.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        deserializer.disable_recursion_limit();
        let node = Self::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        Ok(node)
    }
}

// Dropping nested `Vec<RawNode>`s recursively overflows the stack on deep
// trees, so children are detached and dropped from a worklist instead.
impl Drop for RawRule {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            if let RawNode::Rule(rule) = &mut node {
                pending.append(&mut rule.children);
            }
        }
    }
}
