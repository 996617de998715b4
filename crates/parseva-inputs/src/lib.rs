//! Input files loaded by the driver.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
pub use line_index::LineIndex;
use line_index::LineCol;
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: Utf8PathBuf,
    text: String,
}

impl File {
    pub fn new(path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        Self { path: path.into(), text: text.into() }
    }

    pub fn read(path: impl Into<Utf8PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let text = std::fs::read_to_string(&path)?;
        Ok(Self { path, text })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.text)
    }

    /// The range of the character at a 1-based line and column.
    ///
    /// Positions past the end of the file clamp to its end.
    pub fn char_range(&self, line: usize, column: usize) -> TextRange {
        let line_col = LineCol {
            line: line.saturating_sub(1).try_into().unwrap_or(u32::MAX),
            col: column.saturating_sub(1).try_into().unwrap_or(u32::MAX),
        };
        let mut start = self
            .line_index()
            .offset(line_col)
            .map_or(self.text.len(), usize::from)
            .min(self.text.len());
        while !self.text.is_char_boundary(start) {
            start -= 1;
        }
        let len = self.text[start..].chars().next().map_or(0, char::len_utf8);
        TextRange::at(TextSize::new(start as u32), TextSize::new(len as u32))
    }
}
