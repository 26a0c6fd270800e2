//! HTML tokenizer
//!
//! Text between tags is never tokenized. Inside a tag, attribute names,
//! values and the closing `>` are classified until the tag ends.

use once_cell::sync::Lazy;

use crate::syntax::rules::RuleSet;
use crate::syntax::tokens::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Comment,
    Declaration,
    TagOpen,
    TagClose,
    QuotedValue,
    Attribute,
    Equals,
}

const TAG_OPEN: &str = r"</?[A-Za-z][\w:.\-]*";

/// Rules outside any tag
static TEXT_RULES: Lazy<RuleSet<Rule>> = Lazy::new(|| {
    RuleSet::new(&[
        (Rule::Comment, r"<!--(?s:.*?)(?:-->|\z)"),
        (Rule::Declaration, r"<![^>]*>?"),
        (Rule::TagOpen, TAG_OPEN),
    ])
    .expect("valid HTML text rules")
});

/// Rules between `<name` and the closing `>`
static TAG_RULES: Lazy<RuleSet<Rule>> = Lazy::new(|| {
    RuleSet::new(&[
        (Rule::TagClose, r"/?>"),
        (Rule::TagOpen, TAG_OPEN),
        (Rule::QuotedValue, r#""[^"]*(?:"|\z)|'[^']*(?:'|\z)"#),
        (Rule::Attribute, r#"[^\s"'<>/=]+(?:\s*=)?"#),
        (Rule::Equals, r"="),
    ])
    .expect("valid HTML tag rules")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Text,
    /// Inside a tag; `expect_value` is set right after an `=`
    Tag { expect_value: bool },
}

/// Lazy token stream over HTML source
#[derive(Debug, Clone)]
pub struct HtmlTokens<'a> {
    text: &'a str,
    pos: usize,
    mode: Mode,
}

/// Tokenize HTML source
pub fn tokenize(text: &str) -> HtmlTokens<'_> {
    HtmlTokens {
        text,
        pos: 0,
        mode: Mode::Text,
    }
}

impl<'a> Iterator for HtmlTokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let rules = match self.mode {
                Mode::Text => &*TEXT_RULES,
                Mode::Tag { .. } => &*TAG_RULES,
            };
            let Some(m) = rules.find_at(self.text, self.pos) else {
                self.pos = self.text.len();
                return None;
            };
            self.pos = m.end;

            let kind = match m.rule {
                Rule::Comment => TokenKind::Comment,
                Rule::Declaration => TokenKind::Tag,
                Rule::TagOpen => {
                    self.mode = Mode::Tag { expect_value: false };
                    TokenKind::Tag
                }
                Rule::TagClose => {
                    self.mode = Mode::Text;
                    TokenKind::Tag
                }
                Rule::QuotedValue => {
                    self.mode = Mode::Tag { expect_value: false };
                    TokenKind::AttributeValue
                }
                Rule::Attribute => {
                    let has_equals = self.text[m.start..m.end].ends_with('=');
                    let was_value = self.mode == Mode::Tag { expect_value: true };
                    self.mode = Mode::Tag { expect_value: has_equals };
                    if was_value && !has_equals {
                        TokenKind::AttributeValue
                    } else {
                        TokenKind::Attribute
                    }
                }
                Rule::Equals => {
                    self.mode = Mode::Tag { expect_value: true };
                    continue;
                }
            };
            return Some(Token::new(kind, m.start, m.end));
        }
    }
}

impl std::iter::FusedIterator for HtmlTokens<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(TokenKind, &str)> {
        tokenize(text).map(|t| (t.kind, t.text(text))).collect()
    }

    #[test]
    fn test_tag_with_attribute() {
        assert_eq!(
            kinds(r#"<div class="a">text</div>"#),
            vec![
                (TokenKind::Tag, "<div"),
                (TokenKind::Attribute, "class="),
                (TokenKind::AttributeValue, "\"a\""),
                (TokenKind::Tag, ">"),
                (TokenKind::Tag, "</div"),
                (TokenKind::Tag, ">"),
            ]
        );
    }

    #[test]
    fn test_text_is_not_tokenized() {
        assert_eq!(kinds("just some text = 'x' > y"), vec![]);
        assert_eq!(kinds("a < b"), vec![]);
    }

    #[test]
    fn test_self_closing_and_bare_attributes() {
        assert_eq!(
            kinds("<input disabled value=5 />"),
            vec![
                (TokenKind::Tag, "<input"),
                (TokenKind::Attribute, "disabled"),
                (TokenKind::Attribute, "value="),
                (TokenKind::AttributeValue, "5"),
                (TokenKind::Tag, "/>"),
            ]
        );
    }

    #[test]
    fn test_spaced_equals() {
        assert_eq!(
            kinds("<a href = 'x'>"),
            vec![
                (TokenKind::Tag, "<a"),
                (TokenKind::Attribute, "href ="),
                (TokenKind::AttributeValue, "'x'"),
                (TokenKind::Tag, ">"),
            ]
        );
    }

    #[test]
    fn test_comment_and_doctype() {
        assert_eq!(
            kinds("<!DOCTYPE html>\n<!-- <b>not a tag</b> -->"),
            vec![
                (TokenKind::Tag, "<!DOCTYPE html>"),
                (TokenKind::Comment, "<!-- <b>not a tag</b> -->"),
            ]
        );
    }

    #[test]
    fn test_unterminated_comment() {
        let text = "<p>hi</p><!-- open\n<div>";
        let tokens: Vec<_> = tokenize(text).collect();
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Comment);
        assert_eq!(last.end, text.len());
    }

    #[test]
    fn test_nested_comment_closes_at_first_terminator() {
        assert_eq!(
            kinds("<!-- a <!-- b --> c -->"),
            vec![(TokenKind::Comment, "<!-- a <!-- b -->")]
        );
    }

    #[test]
    fn test_unterminated_value() {
        let text = "<a title=\"never closed>\n<b>";
        let tokens: Vec<_> = tokenize(text).collect();
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::AttributeValue);
        assert_eq!(last.end, text.len());
    }

    #[test]
    fn test_unclosed_tag_before_new_tag() {
        assert_eq!(
            kinds("<div <span>"),
            vec![
                (TokenKind::Tag, "<div"),
                (TokenKind::Tag, "<span"),
                (TokenKind::Tag, ">"),
            ]
        );
    }

    #[test]
    fn test_multiline_tag() {
        assert_eq!(
            kinds("<img\n  src=\"a.png\"\n  alt=\"\">"),
            vec![
                (TokenKind::Tag, "<img"),
                (TokenKind::Attribute, "src="),
                (TokenKind::AttributeValue, "\"a.png\""),
                (TokenKind::Attribute, "alt="),
                (TokenKind::AttributeValue, "\"\""),
                (TokenKind::Tag, ">"),
            ]
        );
    }
}
