//! Text positions in host conventions
//!
//! Tokens carry byte offsets. Text widgets address text by line and
//! column instead, with 1-based lines and columns counted in chars.
//! [`LineIndex`] converts between the two.

use std::fmt;

/// A `line.column` position in a text widget
///
/// Lines are 1-based, columns are 0-based and count Unicode scalar
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextIndex {
    pub line: usize,
    pub column: usize,
}

impl TextIndex {
    pub const START: TextIndex = TextIndex { line: 1, column: 0 };

    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for TextIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.line, self.column)
    }
}

/// Precomputed line starts for one text
pub struct LineIndex<'a> {
    text: &'a str,
    /// Byte offset of each line start
    line_starts: Vec<usize>,
    /// Char offset of each line start
    char_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        let mut char_starts = vec![0];
        for (chars, (pos, ch)) in text.char_indices().enumerate() {
            if ch == '\n' {
                line_starts.push(pos + 1);
                char_starts.push(chars + 1);
            }
        }
        Self {
            text,
            line_starts,
            char_starts,
        }
    }

    /// Number of lines (an empty text has one empty line)
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Zero-based line containing a byte offset
    fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset) - 1
    }

    /// Convert a byte offset to a `line.column` position
    ///
    /// Offsets past the end clamp to the end of the text.
    pub fn position(&self, offset: usize) -> TextIndex {
        let offset = self.clamp(offset);
        let line = self.line_of(offset);
        let column = self.text[self.line_starts[line]..offset].chars().count();
        TextIndex::new(line + 1, column)
    }

    /// Convert a byte offset to an absolute char offset
    pub fn char_offset(&self, offset: usize) -> usize {
        let offset = self.clamp(offset);
        let line = self.line_of(offset);
        self.char_starts[line] + self.text[self.line_starts[line]..offset].chars().count()
    }

    /// Convert a `line.column` position back to a byte offset
    ///
    /// Columns past the end of a line clamp to the line end, as text
    /// widgets do. Returns `None` for lines that do not exist.
    pub fn byte_offset(&self, index: TextIndex) -> Option<usize> {
        let line = index.line.checked_sub(1)?;
        let start = *self.line_starts.get(line)?;
        let end = self.line_end(line);
        let column = self.text[start..end]
            .char_indices()
            .nth(index.column)
            .map_or(end, |(pos, _)| start + pos);
        Some(column)
    }

    /// Byte range of a zero-based line, excluding its newline
    pub fn line_range(&self, line: usize) -> Option<std::ops::Range<usize>> {
        let start = *self.line_starts.get(line)?;
        Some(start..self.line_end(line))
    }

    fn line_end(&self, line: usize) -> usize {
        self.line_starts
            .get(line + 1)
            .map_or(self.text.len(), |next| next - 1)
    }

    fn clamp(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}
