//! Terminal output using crossterm
//!
//! Paints a buffer and its [`TagLayout`] to any writer, which makes the
//! terminal the host surface for the `hilite` binary.

use std::io::Write;
use std::ops::Range;

use crossterm::{
    queue,
    style::{self, Attribute, Print, SetAttribute, SetForegroundColor},
};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::syntax::{Color, LineIndex, Style, TagLayout, Token};

/// How to paint a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix each line with its number
    pub line_numbers: bool,
    /// Columns between tab stops
    pub tab_width: usize,
    /// Emit color and attribute escapes
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_numbers: false,
            tab_width: 4,
            color: true,
        }
    }
}

/// Writes highlighted text to a terminal (or any writer)
pub struct Terminal<W: Write> {
    out: W,
    options: RenderOptions,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, options: RenderOptions) -> Self {
        Self { out, options }
    }

    /// Paint `text` with the styles tagged in `layout`
    pub fn render(&mut self, text: &str, layout: &TagLayout) -> Result<()> {
        let index = LineIndex::new(text);
        let spans = styled_spans(&index, layout);
        let gutter = index.line_count().to_string().len();

        let mut spans = spans.iter().peekable();
        for line in 0..index.line_count() {
            let Some(range) = index.line_range(line) else {
                break;
            };
            // A trailing newline does not start a visible line
            if range.is_empty() && line + 1 == index.line_count() && line > 0 {
                break;
            }

            if self.options.line_numbers {
                self.set_dim(true)?;
                self.write_str(&format!("{:>width$} ", line + 1, width = gutter))?;
                self.reset_attributes()?;
            }

            let mut col = 0;
            let mut pos = range.start;
            while pos < range.end {
                while spans.peek().is_some_and(|(span, _)| span.end <= pos) {
                    spans.next();
                }
                let (end, style) = match spans.peek() {
                    Some((span, style)) if span.start <= pos => (span.end.min(range.end), Some(*style)),
                    Some((span, _)) => (span.start.min(range.end), None),
                    None => (range.end, None),
                };
                let segment = expand_tabs(&text[pos..end], &mut col, self.options.tab_width);
                match style {
                    Some(style) if self.options.color => {
                        self.apply_style(&style)?;
                        self.write_str(&segment)?;
                        self.reset_attributes()?;
                    }
                    _ => self.write_str(&segment)?,
                }
                pos = end;
            }
            self.write_str("\n")?;
        }
        self.flush()
    }

    /// Print a token listing, one `kind start..end "text"` per line
    pub fn dump_tokens(&mut self, text: &str, tokens: impl IntoIterator<Item = Token>) -> Result<()> {
        for token in tokens {
            let line = format!(
                "{} {}..{} \"{}\"\n",
                token.kind.tag_name(),
                token.start,
                token.end,
                token.text(text).escape_debug()
            );
            self.write_str(&line)?;
        }
        self.flush()
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Set foreground color and attributes
    pub fn apply_style(&mut self, style: &Style) -> Result<()> {
        if let Color::Rgb(r, g, b) = style.fg {
            queue!(self.out, SetForegroundColor(style::Color::Rgb { r, g, b }))?;
        }
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        Ok(())
    }

    /// Set dim/faint mode (for line numbers)
    pub fn set_dim(&mut self, enabled: bool) -> Result<()> {
        if !self.options.color {
            return Ok(());
        }
        if enabled {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        } else {
            queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
        }
        Ok(())
    }

    /// Reset all attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        if self.options.color {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    /// Write a string at current cursor position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(self.out, Print(s))?;
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Byte ranges and styles of every tag, in text order
fn styled_spans(index: &LineIndex<'_>, layout: &TagLayout) -> Vec<(Range<usize>, Style)> {
    let mut spans: Vec<_> = layout
        .tags()
        .iter()
        .filter_map(|tag| {
            let start = index.byte_offset(tag.start)?;
            let end = index.byte_offset(tag.end)?;
            let style = layout
                .style_for(tag.kind)
                .unwrap_or_else(|| tag.kind.default_style());
            (start < end).then_some((start..end, style))
        })
        .collect();
    spans.sort_by_key(|(range, _)| range.start);
    spans
}

/// Expand tabs to the next tab stop, tracking the display column
fn expand_tabs(s: &str, col: &mut usize, tab_width: usize) -> String {
    let tab_width = tab_width.max(1);
    let mut result = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch == '\t' {
            let spaces = tab_width - (*col % tab_width);
            result.extend(std::iter::repeat(' ').take(spaces));
            *col += spaces;
        } else {
            result.push(ch);
            *col += ch.width().unwrap_or(0);
        }
    }
    result
}
