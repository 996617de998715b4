use text_size::{TextRange, TextSize};

use crate::TokenKind;

/// Named token constants in declaration order.
///
/// The text form is the one parser generators write next to the generated
/// lexer: one `NAME=VALUE` entry per line, where `NAME` is either a symbolic
/// name or a quoted literal.
///
/// ```text
/// CLASS=9
/// IDENTIFIER=102
/// 'class'=9
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTable {
    entries: Vec<(Box<str>, TokenKind)>,
}

/// A line of a token table that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct TableError {
    /// 1-based line number.
    pub line: usize,
    /// Byte range of the offending line, without its terminator.
    pub range: TextRange,
    pub message: String,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self, TableError> {
        let mut table = Self::new();
        let mut offset = 0;

        for (index, raw_line) in text.split_inclusive('\n').enumerate() {
            let line = raw_line.trim_end_matches(['\n', '\r']);
            let start = offset;
            offset += raw_line.len();

            if line.trim().is_empty() {
                continue;
            }

            let error = |message: String| TableError {
                line: index + 1,
                range: TextRange::at(TextSize::new(start as u32), TextSize::new(line.len() as u32)),
                message,
            };

            let Some((name, value)) = line.rsplit_once('=') else {
                return Err(error(format!("expected `NAME=VALUE`, found `{line}`")));
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(error("missing token name".to_string()));
            }
            let value = value
                .trim()
                .parse::<i32>()
                .map_err(|err| error(format!("invalid value for `{name}`: {err}")))?;
            if value > TokenKind::MAX.get() {
                return Err(error(format!(
                    "value for `{name}` is out of range: {value} > {}",
                    TokenKind::MAX
                )));
            }

            table.push(name, TokenKind::new(value));
        }

        Ok(table)
    }

    pub fn push(&mut self, name: impl Into<Box<str>>, kind: TokenKind) {
        self.entries.push((name.into(), kind));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenKind)> {
        self.entries.iter().map(|(name, kind)| (&**name, *kind))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<Box<str>>> FromIterator<(N, TokenKind)> for TokenTable {
    fn from_iter<I: IntoIterator<Item = (N, TokenKind)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(name, kind)| (name.into(), kind)).collect() }
    }
}
