//! Python tokenizer

use once_cell::sync::Lazy;

use crate::syntax::rules::{followed_by_identifier, paren_after, RuleSet, QUOTED_STRING};
use crate::syntax::tokens::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    TripleString,
    String,
    Comment,
    Decorator,
    Number,
    Word,
    Operator,
}

static RULES: Lazy<RuleSet<Rule>> = Lazy::new(|| {
    let string = format!("(?i:[rbuf]{{0,2}})(?:{})", QUOTED_STRING);
    RuleSet::new(&[
        (
            Rule::TripleString,
            r#"(?i:[rbuf]{0,2})(?:"""(?s:\\.|.)*?(?:"""|\z)|'''(?s:\\.|.)*?(?:'''|\z))"#,
        ),
        (Rule::String, string.as_str()),
        (Rule::Comment, r"#[^\n]*"),
        (Rule::Decorator, r"@[\p{L}_][\w.]*"),
        (
            Rule::Number,
            r"0[xXoObB][0-9a-fA-F_]+|(?:\d[\d_]*\.\d*|\.\d+|\d[\d_]*)(?:[eE][+-]?\d+)?[jJ]?",
        ),
        (Rule::Word, r"[\p{L}_]\w*"),
        (Rule::Operator, r"[+\-*/%=<>!&|^~:,.;@]"),
    ])
    .expect("valid Python rules")
});

/// Check whether an identifier is a Python keyword
pub fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "False" | "None" | "True" | "and" | "as" | "assert" | "async" | "await"
            | "break" | "class" | "continue" | "def" | "del" | "elif" | "else"
            | "except" | "finally" | "for" | "from" | "global" | "if" | "import"
            | "in" | "is" | "lambda" | "nonlocal" | "not" | "or" | "pass"
            | "raise" | "return" | "try" | "while" | "with" | "yield"
    )
}

/// Lazy token stream over Python source
///
/// The only state is which name a preceding `def` or `class` expects,
/// and the `(` owed after a function name.
#[derive(Debug, Clone)]
pub struct PythonTokens<'a> {
    text: &'a str,
    pos: usize,
    /// Kind for the next identifier after `def` or `class`
    pending: Option<TokenKind>,
    /// Offset of the `(` following the last function name
    paren: Option<usize>,
}

/// Tokenize Python source
pub fn tokenize(text: &str) -> PythonTokens<'_> {
    PythonTokens {
        text,
        pos: 0,
        pending: None,
        paren: None,
    }
}

impl<'a> Iterator for PythonTokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(at) = self.paren.take() {
            self.pos = at + 1;
            return Some(Token::new(TokenKind::Operator, at, at + 1));
        }
        loop {
            let Some(m) = RULES.find_at(self.text, self.pos) else {
                self.pos = self.text.len();
                return None;
            };
            self.pos = m.end;

            let kind = match m.rule {
                Rule::TripleString | Rule::String => TokenKind::String,
                Rule::Comment => TokenKind::Comment,
                Rule::Decorator => TokenKind::Decorator,
                Rule::Number => TokenKind::Number,
                Rule::Operator => TokenKind::Operator,
                Rule::Word => {
                    let word = &self.text[m.start..m.end];
                    if is_keyword(word) {
                        self.pending = match word {
                            "def" => Some(TokenKind::Function),
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

impl std::iter::FusedIterator for PythonTokens<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(TokenKind, &str)> {
        tokenize(text).map(|t| (t.kind, t.text(text))).collect()
    }

    #[test]
    fn test_unterminated_string_reaches_end() {
        let text = "x = 'abc";
        let tokens: Vec<_> = tokenize(text).collect();
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::String);
        assert_eq!(last.text(text), "'abc");
        assert_eq!(last.end, text.len());
    }

    #[test]
    fn test_def_and_call() {
        assert_eq!(
            kinds("def greet(name):\n    print(name)"),
            vec![
                (TokenKind::Keyword, "def"),
                (TokenKind::Function, "greet"),
                (TokenKind::Operator, "("),
                (TokenKind::Operator, ":"),
                (TokenKind::Function, "print"),
                (TokenKind::Operator, "("),
            ]
        );
    }

    #[test]
    fn test_call_paren_after_whitespace() {
        let text = "print (x)";
        let tokens: Vec<_> = tokenize(text).collect();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Function, 0, 5),
                Token::new(TokenKind::Operator, 6, 7),
            ]
        );
    }

    #[test]
    fn test_class_with_base_has_no_paren() {
        assert_eq!(
            kinds("class Point(Base):"),
            vec![
                (TokenKind::Keyword, "class"),
                (TokenKind::Class, "Point"),
                (TokenKind::Operator, ":"),
            ]
        );
    }

    #[test]
    fn test_class_name() {
        assert_eq!(
            kinds("class Point:"),
            vec![
                (TokenKind::Keyword, "class"),
                (TokenKind::Class, "Point"),
                (TokenKind::Operator, ":"),
            ]
        );
    }

    #[test]
    fn test_keywords_are_whole_words() {
        // "format", "iffy" and "classic" contain keywords but are not keywords
        assert_eq!(kinds("format iffy classic"), vec![]);
        assert_eq!(kinds("if x in y"), vec![
            (TokenKind::Keyword, "if"),
            (TokenKind::Keyword, "in"),
        ]);
    }

    #[test]
    fn test_triple_quoted_string() {
        let text = "s = \"\"\"one\n'two'\nthree\"\"\" # done";
        assert_eq!(
            kinds(text),
            vec![
                (TokenKind::Operator, "="),
                (TokenKind::String, "\"\"\"one\n'two'\nthree\"\"\""),
                (TokenKind::Comment, "# done"),
            ]
        );
    }

    #[test]
    fn test_unterminated_triple_string() {
        let text = "'''doc\nstill doc";
        let tokens: Vec<_> = tokenize(text).collect();
        assert_eq!(tokens, vec![Token::new(TokenKind::String, 0, text.len())]);
    }

    #[test]
    fn test_prefixed_strings() {
        assert_eq!(
            kinds("f'{x}' rb\"raw\""),
            vec![(TokenKind::String, "f'{x}'"), (TokenKind::String, "rb\"raw\"")]
        );
    }

    #[test]
    fn test_comment_stops_at_newline() {
        assert_eq!(
            kinds("# note 'x\nreturn 1"),
            vec![
                (TokenKind::Comment, "# note 'x"),
                (TokenKind::Keyword, "return"),
                (TokenKind::Number, "1"),
            ]
        );
    }

    #[test]
    fn test_hash_inside_string() {
        assert_eq!(kinds("'#not comment'"), vec![(TokenKind::String, "'#not comment'")]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("1 2.5 .5 1e3 0xFF x1"),
            vec![
                (TokenKind::Number, "1"),
                (TokenKind::Number, "2.5"),
                (TokenKind::Number, ".5"),
                (TokenKind::Number, "1e3"),
                (TokenKind::Number, "0xFF"),
            ]
        );
    }

    #[test]
    fn test_decorator() {
        assert_eq!(
            kinds("@property\ndef size(self):"),
            vec![
                (TokenKind::Decorator, "@property"),
                (TokenKind::Keyword, "def"),
                (TokenKind::Function, "size"),
                (TokenKind::Operator, "("),
                (TokenKind::Operator, ":"),
            ]
        );
    }

    #[test]
    fn test_escaped_quote() {
        assert_eq!(kinds(r#""a\"b""#), vec![(TokenKind::String, r#""a\"b""#)]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").next(), None);
    }
}
