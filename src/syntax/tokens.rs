//! Token types for syntax highlighting
//!
//! This module defines the lexical token kinds the tokenizers emit,
//! the positioned [`Token`] value and the default palette per kind.

use std::ops::Range;

use super::style::{Color, Style};

/// Lexical token kinds shared by all languages
///
/// Each language emits a subset. Plain identifiers and text outside
/// any construct are never emitted and keep the default appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    /// Reserved words (def, function, return, !important, @media)
    Keyword,
    /// String literals, including triple-quoted and template literals
    String,
    /// Line and block comments
    Comment,
    /// Numeric literals, CSS dimensions and hex colors
    Number,
    /// Operators and punctuation the palette colors
    Operator,
    /// Function names at definition or call sites
    Function,
    /// Class names at definition sites
    Class,
    /// Python decorators
    Decorator,
    /// HTML tag delimiters and names (`<div`, `</div`, `>`, `/>`)
    Tag,
    /// HTML attribute names, including the `=`
    Attribute,
    /// HTML attribute values
    AttributeValue,
    /// CSS selectors
    Selector,
    /// CSS property names
    Property,
    /// CSS property values
    Value,
}

impl TokenKind {
    pub const ALL: [TokenKind; 14] = [
        TokenKind::Keyword,
        TokenKind::String,
        TokenKind::Comment,
        TokenKind::Number,
        TokenKind::Operator,
        TokenKind::Function,
        TokenKind::Class,
        TokenKind::Decorator,
        TokenKind::Tag,
        TokenKind::Attribute,
        TokenKind::AttributeValue,
        TokenKind::Selector,
        TokenKind::Property,
        TokenKind::Value,
    ];

    /// Get the default style for this token kind
    pub const fn default_style(&self) -> Style {
        match self {
            TokenKind::Keyword => Style::fg(Color::hex(0x9D00FF)).with_bold(),
            TokenKind::String => Style::fg(Color::hex(0x00CC66)),
            TokenKind::Comment => Style::fg(Color::hex(0x00A5A5)).with_italic(),
            TokenKind::Number => Style::fg(Color::hex(0xFF6600)),
            TokenKind::Operator => Style::fg(Color::hex(0xFF1493)),
            TokenKind::Function => Style::fg(Color::hex(0x4169E1)),
            TokenKind::Class => Style::fg(Color::hex(0xDC143C)).with_bold(),
            TokenKind::Decorator => Style::fg(Color::hex(0xFF8C00)),
            TokenKind::Tag => Style::fg(Color::hex(0x1E90FF)),
            TokenKind::Attribute => Style::fg(Color::hex(0xFF7F50)),
            TokenKind::AttributeValue => Style::fg(Color::hex(0x00CC66)),
            TokenKind::Selector => Style::fg(Color::hex(0x1E90FF)),
            TokenKind::Property => Style::fg(Color::hex(0xFF00FF)),
            TokenKind::Value => Style::fg(Color::hex(0x32CD32)),
        }
    }

    /// Tag name a host surface registers for this kind
    pub const fn tag_name(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::String => "string",
            TokenKind::Comment => "comment",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::Function => "function",
            TokenKind::Class => "class",
            TokenKind::Decorator => "decorator",
            TokenKind::Tag => "tag",
            TokenKind::Attribute => "attribute",
            TokenKind::AttributeValue => "attributevalue",
            TokenKind::Selector => "selector",
            TokenKind::Property => "property",
            TokenKind::Value => "value",
        }
    }

    /// Parse a token kind from its tag name
    pub fn from_tag_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag_name() == name)
    }
}

/// A classified span of source text
///
/// `start..end` is a half-open range of byte offsets into the text the
/// tokenizer was given. Both ends fall on char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The source text this token covers
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles_not_empty() {
        for kind in TokenKind::ALL {
            assert!(!kind.default_style().is_default(), "{:?}", kind);
        }
        assert!(TokenKind::Keyword.default_style().bold);
        assert!(TokenKind::Comment.default_style().italic);
    }

    #[test]
    fn test_tag_name_roundtrip() {
        for kind in TokenKind::ALL {
            assert_eq!(TokenKind::from_tag_name(kind.tag_name()), Some(kind));
        }
    }

    #[test]
    fn test_from_tag_name_invalid() {
        assert_eq!(TokenKind::from_tag_name("sel"), None);
        assert_eq!(TokenKind::from_tag_name(""), None);
    }

    #[test]
    fn test_token_text() {
        let token = Token::new(TokenKind::Keyword, 4, 7);
        assert_eq!(token.text("    def f():"), "def");
        assert_eq!(token.len(), 3);
        assert!(!token.is_empty());
    }
}
