//! CSS tokenizer
//!
//! Tracks whether the scanner is in a selector, an at-rule prelude, a
//! property name or a property value, and keeps a stack of open blocks
//! so `@media { a { ... } }` returns to selectors after the inner `}`.

use once_cell::sync::Lazy;

use crate::syntax::rules::{RuleSet, BLOCK_COMMENT, QUOTED_STRING};
use crate::syntax::tokens::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Comment,
    String,
    AtKeyword,
    OpenBrace,
    CloseBrace,
    Semicolon,
    Colon,
    Comma,
    Combinator,
    Selector,
    Property,
    Important,
    Url,
    HexColor,
    Number,
    Word,
}

const NUMBER: &str = r"[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?(?:%|[a-zA-Z]+)?";
const URL: &str = r"(?i:url)\([^)\n]*\)?";

static SELECTOR_RULES: Lazy<RuleSet<Rule>> = Lazy::new(|| {
    RuleSet::new(&[
        (Rule::Comment, BLOCK_COMMENT),
        (Rule::String, QUOTED_STRING),
        (Rule::AtKeyword, r"@[\w-]+"),
        (Rule::OpenBrace, r"\{"),
        (Rule::CloseBrace, r"\}"),
        (Rule::Semicolon, r";"),
        (Rule::Combinator, r"[>+~,]"),
        (
            Rule::Selector,
            r#"(?:[^\s{}()\[\];,>+~/"'@]|\([^)\n{}]*\)?|\[[^\]\n{}]*\]?)+"#,
        ),
    ])
    .expect("valid CSS selector rules")
});

static PRELUDE_RULES: Lazy<RuleSet<Rule>> = Lazy::new(|| {
    RuleSet::new(&[
        (Rule::Comment, BLOCK_COMMENT),
        (Rule::String, QUOTED_STRING),
        (Rule::Url, URL),
        (Rule::OpenBrace, r"\{"),
        (Rule::CloseBrace, r"\}"),
        (Rule::Semicolon, r";"),
        (Rule::Number, NUMBER),
        (Rule::Word, r#"[^\s{};,/"'()0-9:][^\s{};,/"'():]*"#),
    ])
    .expect("valid CSS at-rule rules")
});

static PROPERTY_RULES: Lazy<RuleSet<Rule>> = Lazy::new(|| {
    RuleSet::new(&[
        (Rule::Comment, BLOCK_COMMENT),
        (Rule::String, QUOTED_STRING),
        (Rule::OpenBrace, r"\{"),
        (Rule::CloseBrace, r"\}"),
        (Rule::Semicolon, r";"),
        (Rule::Colon, r":"),
        (Rule::Property, r#"[^\s{}:;/"']+"#),
    ])
    .expect("valid CSS property rules")
});

static VALUE_RULES: Lazy<RuleSet<Rule>> = Lazy::new(|| {
    RuleSet::new(&[
        (Rule::Comment, BLOCK_COMMENT),
        (Rule::String, QUOTED_STRING),
        (Rule::OpenBrace, r"\{"),
        (Rule::CloseBrace, r"\}"),
        (Rule::Semicolon, r";"),
        (Rule::Comma, r","),
        (Rule::Important, r"(?i:!\s*important)"),
        (Rule::Url, URL),
        (Rule::HexColor, r"#[0-9a-fA-F]{3,8}\b"),
        (Rule::Number, NUMBER),
        (Rule::Word, r#"[^\s{};,/"'!()0-9+][^\s{};,/"'!()]*"#),
    ])
    .expect("valid CSS value rules")
});

/// What a `{` opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    /// Rules with selectors (top level, `@media`, `@supports`, ...)
    Rules,
    /// Declarations (`a { ... }`, `@font-face`, `@page`, ...)
    Declarations,
}

/// Where the scanner is within the current block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Selector,
    /// After an at-keyword, until its `{` or `;`
    Prelude { opens: Block },
    Property,
    Value,
}

/// At-rules whose block holds declarations rather than nested rules
fn at_rule_block(name: &str) -> Block {
    match name.to_ascii_lowercase().as_str() {
        "@font-face" | "@page" | "@counter-style" | "@property" | "@viewport"
        | "@font-palette-values" => Block::Declarations,
        _ => Block::Rules,
    }
}

/// Lazy token stream over CSS source
#[derive(Debug, Clone)]
pub struct CssTokens<'a> {
    text: &'a str,
    pos: usize,
    mode: Mode,
    /// Open blocks, innermost last
    blocks: Vec<Block>,
}

/// Tokenize CSS source
pub fn tokenize(text: &str) -> CssTokens<'_> {
    CssTokens {
        text,
        pos: 0,
        mode: Mode::Selector,
        blocks: Vec::new(),
    }
}

impl<'a> CssTokens<'a> {
    fn open(&mut self, block: Block) {
        self.blocks.push(block);
        self.mode = Self::mode_in(block);
    }

    /// Close the innermost block; a stray `}` at top level is ignored
    fn close(&mut self) {
        self.blocks.pop();
        self.mode = self
            .blocks
            .last()
            .map_or(Mode::Selector, |&block| Self::mode_in(block));
    }

    fn mode_in(block: Block) -> Mode {
        match block {
            Block::Rules => Mode::Selector,
            Block::Declarations => Mode::Property,
        }
    }
}

impl<'a> Iterator for CssTokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let rules = match self.mode {
            Mode::Selector => &*SELECTOR_RULES,
            Mode::Prelude { .. } => &*PRELUDE_RULES,
            Mode::Property => &*PROPERTY_RULES,
            Mode::Value => &*VALUE_RULES,
        };
        let Some(m) = rules.find_at(self.text, self.pos) else {
            self.pos = self.text.len();
            return None;
        };
        self.pos = m.end;

        let kind = match m.rule {
            Rule::Comment => TokenKind::Comment,
            Rule::String => TokenKind::String,
            Rule::AtKeyword => {
                let opens = at_rule_block(&self.text[m.start..m.end]);
                self.mode = Mode::Prelude { opens };
                TokenKind::Keyword
            }
            Rule::OpenBrace => {
                let block = match self.mode {
                    Mode::Selector => Block::Declarations,
                    Mode::Prelude { opens } => opens,
                    // A brace where a declaration belongs opens a nested
                    // declaration block, which keeps typing in progress
                    // from collapsing the rest of the sheet.
                    Mode::Property | Mode::Value => Block::Declarations,
                };
                self.open(block);
                TokenKind::Operator
            }
            Rule::CloseBrace => {
                self.close();
                TokenKind::Operator
            }
            Rule::Semicolon => {
                match self.mode {
                    Mode::Prelude { .. } => self.mode = Mode::Selector,
                    Mode::Value => self.mode = Mode::Property,
                    Mode::Selector | Mode::Property => {}
                }
                TokenKind::Operator
            }
            Rule::Colon => {
                self.mode = Mode::Value;
                TokenKind::Operator
            }
            Rule::Comma | Rule::Combinator => TokenKind::Operator,
            Rule::Selector => TokenKind::Selector,
            Rule::Property => TokenKind::Property,
            Rule::Important => TokenKind::Keyword,
            Rule::HexColor | Rule::Number => TokenKind::Number,
            Rule::Url | Rule::Word => TokenKind::Value,
        };
        Some(Token::new(kind, m.start, m.end))
    }
}

impl std::iter::FusedIterator for CssTokens<'_> {}
