//! Style types for highlighted text
//!
//! A style is what a host surface paints for one tag. The palette is
//! fixed; hosts register it once per language through
//! [`StyleSurface::configure_tags`](super::StyleSurface::configure_tags).

use super::tokens::TokenKind;

/// Foreground colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Whatever the host draws unstyled text with
    #[default]
    Default,
    /// 24-bit color
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a `#RRGGBB` color
    pub const fn hex(value: u32) -> Self {
        Color::Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Parse a `#RRGGBB` or `RRGGBB` string
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::hex)
    }

    /// Format as `#RRGGBB`, or `None` for the host default
    pub fn to_hex(&self) -> Option<String> {
        match self {
            Color::Default => None,
            Color::Rgb(r, g, b) => Some(format!("#{:02X}{:02X}{:02X}", r, g, b)),
        }
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: color,
            bold: false,
            italic: false,
        }
    }

    /// Builder: set bold
    pub const fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub const fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Mapping from a token kind to the style its tag is painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRule {
    pub kind: TokenKind,
    pub style: Style,
}

impl StyleRule {
    pub const fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            style: kind.default_style(),
        }
    }

    /// Tag name the host registers this rule under
    pub fn tag_name(&self) -> &'static str {
        self.kind.tag_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert!(!style.bold);
        assert!(!style.italic);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::hex(0xFF0000)).with_bold().with_italic();
        assert_eq!(style.fg, Color::Rgb(255, 0, 0));
        assert!(style.bold);
        assert!(style.italic);
        assert!(!style.is_default());
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#9D00FF"), Some(Color::Rgb(0x9D, 0x00, 0xFF)));
        assert_eq!(Color::from_hex("00cc66"), Some(Color::Rgb(0x00, 0xCC, 0x66)));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color::hex(0x1E90FF).to_hex().as_deref(), Some("#1E90FF"));
        assert_eq!(Color::Default.to_hex(), None);
    }

    #[test]
    fn test_rule_uses_kind_style() {
        let rule = StyleRule::new(TokenKind::Comment);
        assert_eq!(rule.style, TokenKind::Comment.default_style());
        assert_eq!(rule.tag_name(), "comment");
    }
}
