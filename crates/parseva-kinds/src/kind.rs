use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric token type, as assigned by the lexer or the token table.
///
/// Negative values are legal: generated lexers use `-1` for end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenKind(i32);

impl TokenKind {
    pub const EOF: Self = Self(-1);
    /// Largest kind a registry accepts; kinds index a dense table.
    pub const MAX: Self = Self(u16::MAX as i32);

    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    /// Slot in a dense id-indexed table, `None` for negative kinds.
    pub(crate) fn slot(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl From<i32> for TokenKind {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
