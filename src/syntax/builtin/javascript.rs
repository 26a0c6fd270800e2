//! JavaScript tokenizer
//!
//! Template literals are the one construct that needs real state: the
//! text of a literal is a string, but `${ ... }` switches back to code
//! until the matching brace, and that code may open further literals.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::syntax::rules::{
    followed_by_identifier, paren_after, RuleSet, BLOCK_COMMENT, QUOTED_STRING,
};
use crate::syntax::tokens::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    BlockComment,
    LineComment,
    String,
    Backtick,
    Number,
    Word,
    OpenBrace,
    CloseBrace,
    Operator,
}

static RULES: Lazy<RuleSet<Rule>> = Lazy::new(|| {
    RuleSet::new(&[
        (Rule::BlockComment, BLOCK_COMMENT),
        (Rule::LineComment, r"//[^\n]*"),
        (Rule::String, QUOTED_STRING),
        (Rule::Backtick, r"`"),
        (
            Rule::Number,
            r"0[xXoObB][0-9a-fA-F_]+n?|(?:\d[\d_]*\.?[\d_]*|\.\d[\d_]*)(?:[eE][+-]?\d+)?n?",
        ),
        (Rule::Word, r"[\p{L}_$][\w$]*"),
        (Rule::OpenBrace, r"\{"),
        (Rule::CloseBrace, r"\}"),
        (Rule::Operator, r"=>|[+\-*/%=<>!&|^~?:,.;]"),
    ])
    .expect("valid JavaScript rules")
});

/// `= function` after a name, as in `const f = function () {}`
static FUNCTION_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*=\s*(?:async\s+)?function\b")
        .expect("valid function assignment pattern")
});

/// Check whether an identifier is a JavaScript keyword or literal
pub fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "async" | "await" | "break" | "case" | "catch" | "class" | "const"
            | "continue" | "debugger" | "default" | "delete" | "do" | "else"
            | "enum" | "export" | "extends" | "false" | "finally" | "for"
            | "function" | "if" | "implements" | "import" | "in" | "instanceof"
            | "interface" | "let" | "new" | "null" | "of" | "package" | "private"
            | "protected" | "public" | "return" | "static" | "super" | "switch"
            | "this" | "throw" | "true" | "try" | "typeof" | "undefined" | "var"
            | "void" | "while" | "with" | "yield"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    /// Inside the text of a template literal
    Template,
}

/// Where the text of a template literal stops
enum TemplateStop {
    /// Closing backtick at this offset
    Close(usize),
    /// `${` at this offset
    Interpolation(usize),
    /// Literal runs to end of text
    Eof,
}

/// Lazy token stream over JavaScript source
#[derive(Debug, Clone)]
pub struct JavaScriptTokens<'a> {
    text: &'a str,
    pos: usize,
    mode: Mode,
    /// Start of the current template string token, if it began with a
    /// backtick that has not been emitted yet
    template_start: Option<usize>,
    /// Open brace depth inside each active `${ ... }`, innermost last
    interpolations: Vec<u32>,
    /// Kind for the next identifier after `function` or `class`
    pending: Option<TokenKind>,
    /// Offset of the `(` following the last function name
    paren: Option<usize>,
}

/// Tokenize JavaScript source
pub fn tokenize(text: &str) -> JavaScriptTokens<'_> {
    JavaScriptTokens {
        text,
        pos: 0,
        mode: Mode::Code,
        template_start: None,
        interpolations: Vec::new(),
        pending: None,
        paren: None,
    }
}

impl<'a> JavaScriptTokens<'a> {
    fn scan_template(&self) -> TemplateStop {
        let mut chars = self.text[self.pos..].char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '\\' => {
                    chars.next();
                }
                '`' => return TemplateStop::Close(self.pos + i),
                '$' if matches!(chars.peek(), Some((_, '{'))) => {
                    return TemplateStop::Interpolation(self.pos + i);
                }
                _ => {}
            }
        }
        TemplateStop::Eof
    }

    fn next_template(&mut self) -> Option<Token> {
        let start = self.template_start.take().unwrap_or(self.pos);
        match self.scan_template() {
            TemplateStop::Close(at) => {
                self.pos = at + 1;
                self.mode = Mode::Code;
                Some(Token::new(TokenKind::String, start, self.pos))
            }
            TemplateStop::Interpolation(at) if at > start => {
                // Emit the literal text first; the `${` comes next call
                self.pos = at;
                Some(Token::new(TokenKind::String, start, at))
            }
            TemplateStop::Interpolation(at) => {
                self.pos = at + 2;
                self.mode = Mode::Code;
                self.interpolations.push(0);
                Some(Token::new(TokenKind::Operator, at, self.pos))
            }
            TemplateStop::Eof => {
                self.pos = self.text.len();
                (start < self.pos).then(|| Token::new(TokenKind::String, start, self.pos))
            }
        }
    }

    fn next_code(&mut self) -> Option<Token> {
        loop {
            let Some(m) = RULES.find_at(self.text, self.pos) else {
                self.pos = self.text.len();
                return None;
            };
            self.pos = m.end;

            let kind = match m.rule {
                Rule::BlockComment | Rule::LineComment => TokenKind::Comment,
                Rule::String => TokenKind::String,
                Rule::Number => TokenKind::Number,
                Rule::Operator => TokenKind::Operator,
                Rule::Backtick => {
                    self.mode = Mode::Template;
                    self.template_start = Some(m.start);
                    self.pending = None;
                    return self.next_template();
                }
                Rule::OpenBrace => {
                    if let Some(depth) = self.interpolations.last_mut() {
                        *depth += 1;
                    }
                    continue;
                }
                Rule::CloseBrace => match self.interpolations.last_mut() {
                    Some(0) => {
                        self.interpolations.pop();
                        self.mode = Mode::Template;
                        TokenKind::Operator
                    }
                    Some(depth) => {
                        *depth -= 1;
                        continue;
                    }
                    None => continue,
                },
                Rule::Word => {
                    let word = &self.text[m.start..m.end];
                    if is_keyword(word) {
                        self.pending = match word {
                            "function" => Some(TokenKind::Function),
                            "class" => Some(TokenKind::Class),
                            _ => None,
                        }
                        .filter(|_| followed_by_identifier(self.text, m.end));
                        return Some(Token::new(TokenKind::Keyword, m.start, m.end));
                    }
                    let paren = paren_after(self.text, m.end);
                    let kind = match self.pending.take() {
                        Some(kind) => kind,
                        None if paren.is_some() => TokenKind::Function,
                        None if FUNCTION_ASSIGNMENT.is_match(&self.text[m.end..]) => {
                            TokenKind::Function
                        }
                        None => continue,
                    };
                    if kind == TokenKind::Function {
                        self.paren = paren;
                    }
                    kind
                }
            };
            self.pending = None;
            return Some(Token::new(kind, m.start, m.end));
        }
    }
}

impl<'a> Iterator for JavaScriptTokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(at) = self.paren.take() {
            self.pos = at + 1;
            return Some(Token::new(TokenKind::Operator, at, at + 1));
        }
        if self.pos >= self.text.len() {
            return None;
        }
        match self.mode {
            Mode::Code => self.next_code(),
            Mode::Template => self.next_template(),
        }
    }
}

impl std::iter::FusedIterator for JavaScriptTokens<'_> {}
