//! Supported languages
//!
//! [`Language`] is a closed set: dispatch to a tokenizer or a style
//! table is an exhaustive match, so adding a language means the compiler
//! points at every place that needs it.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::builtin::{self, CssTokens, HtmlTokens, JavaScriptTokens, PythonTokens};
use super::style::StyleRule;
use super::tokens::{Token, TokenKind};
use crate::error::Error;

/// A language the highlighter can tokenize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    JavaScript,
    Html,
    Css,
}

const PYTHON_STYLES: &[StyleRule] = &[
    StyleRule::new(TokenKind::Keyword),
    StyleRule::new(TokenKind::String),
    StyleRule::new(TokenKind::Comment),
    StyleRule::new(TokenKind::Number),
    StyleRule::new(TokenKind::Operator),
    StyleRule::new(TokenKind::Function),
    StyleRule::new(TokenKind::Class),
    StyleRule::new(TokenKind::Decorator),
];

const JAVASCRIPT_STYLES: &[StyleRule] = &[
    StyleRule::new(TokenKind::Keyword),
    StyleRule::new(TokenKind::String),
    StyleRule::new(TokenKind::Comment),
    StyleRule::new(TokenKind::Number),
    StyleRule::new(TokenKind::Operator),
    StyleRule::new(TokenKind::Function),
    StyleRule::new(TokenKind::Class),
];

const HTML_STYLES: &[StyleRule] = &[
    StyleRule::new(TokenKind::Tag),
    StyleRule::new(TokenKind::Attribute),
    StyleRule::new(TokenKind::AttributeValue),
    StyleRule::new(TokenKind::Comment),
];

const CSS_STYLES: &[StyleRule] = &[
    StyleRule::new(TokenKind::Selector),
    StyleRule::new(TokenKind::Property),
    StyleRule::new(TokenKind::Value),
    StyleRule::new(TokenKind::Comment),
    StyleRule::new(TokenKind::Number),
    StyleRule::new(TokenKind::Keyword),
    StyleRule::new(TokenKind::String),
    StyleRule::new(TokenKind::Operator),
];

impl Language {
    /// Languages in dropdown order
    pub const ALL: [Language; 4] = [
        Language::Python,
        Language::JavaScript,
        Language::Html,
        Language::Css,
    ];

    /// Stable identifier, as used by the config file and `--language`
    pub fn id(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Html => "html",
            Language::Css => "css",
        }
    }

    /// Name shown to users
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Html => "HTML",
            Language::Css => "CSS",
        }
    }

    /// File extensions that select this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &["py", "pyw"],
            Language::JavaScript => &["js", "mjs", "cjs"],
            Language::Html => &["html", "htm"],
            Language::Css => &["css"],
        }
    }

    /// Look up a language by id or display name, ignoring case
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL.into_iter().find(|lang| {
            lang.id().eq_ignore_ascii_case(id) || lang.display_name().eq_ignore_ascii_case(id)
        })
    }

    /// Infer a language from a file extension (with or without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        Self::ALL.into_iter().find(|lang| {
            lang.extensions()
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
    }

    /// Infer a language from a file name
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(path.extension()?.to_str()?)
    }

    /// Static style table for the kinds this language emits
    pub fn style_rules(&self) -> &'static [StyleRule] {
        match self {
            Language::Python => PYTHON_STYLES,
            Language::JavaScript => JAVASCRIPT_STYLES,
            Language::Html => HTML_STYLES,
            Language::Css => CSS_STYLES,
        }
    }

    /// Tokenize text with this language's scanner
    pub fn tokenize<'a>(&self, text: &'a str) -> Tokens<'a> {
        match self {
            Language::Python => Tokens::Python(builtin::python::tokenize(text)),
            Language::JavaScript => Tokens::JavaScript(builtin::javascript::tokenize(text)),
            Language::Html => Tokens::Html(builtin::html::tokenize(text)),
            Language::Css => Tokens::Css(builtin::css::tokenize(text)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| Error::UnsupportedLanguage(s.to_string()))
    }
}

/// Token stream for any supported language
#[derive(Debug, Clone)]
pub enum Tokens<'a> {
    Python(PythonTokens<'a>),
    JavaScript(JavaScriptTokens<'a>),
    Html(HtmlTokens<'a>),
    Css(CssTokens<'a>),
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self {
            Tokens::Python(tokens) => tokens.next(),
            Tokens::JavaScript(tokens) => tokens.next(),
            Tokens::Html(tokens) => tokens.next(),
            Tokens::Css(tokens) => tokens.next(),
        }
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_detect_language() {
        assert_eq!(Language::from_path(Path::new("main.py")), Some(Language::Python));
        assert_eq!(Language::from_path(Path::new("app.js")), Some(Language::JavaScript));
        assert_eq!(Language::from_path(Path::new("index.html")), Some(Language::Html));
        assert_eq!(Language::from_path(Path::new("INDEX.HTM")), Some(Language::Html));
        assert_eq!(Language::from_path(Path::new("site.css")), Some(Language::Css));
        assert_eq!(Language::from_path(Path::new("main.rs")), None);
        assert_eq!(Language::from_path(Path::new("no_extension")), None);
        assert_eq!(Language::from_extension(".py"), Some(Language::Python));
    }

    #[test]
    fn test_ids_and_names() {
        for lang in Language::ALL {
            assert_eq!(Language::from_id(lang.id()), Some(lang));
            assert_eq!(Language::from_id(lang.display_name()), Some(lang));
            assert_eq!(lang.to_string(), lang.id());
        }
        assert_eq!(Language::JavaScript.display_name(), "JavaScript");
        assert_eq!(Language::default(), Language::Python);
    }

    #[test]
    fn test_from_str_unsupported() {
        assert_eq!("CSS".parse::<Language>().unwrap(), Language::Css);
        let err = "cobol".parse::<Language>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage(ref id) if id == "cobol"));
    }

    #[test]
    fn test_style_rules_cover_emitted_kinds() {
        let samples = [
            (Language::Python, "@d\nclass A:\n def f(x): return g(1) # c\ns = 'x'"),
            (Language::JavaScript, "class A {}\nfunction f() { return `x${1}` } // c"),
            (Language::Html, "<!-- c --><a href=\"x\">t</a>"),
            (Language::Css, "@media x { a { b: 1px 'x' !important; } } /* c */"),
        ];
        for (lang, text) in samples {
            let styled: HashSet<_> = lang.style_rules().iter().map(|r| r.kind).collect();
            for token in lang.tokenize(text) {
                assert!(styled.contains(&token.kind), "{} emits unstyled {:?}", lang, token.kind);
            }
        }
    }

    #[test]
    fn test_serde_uses_ids() {
        #[derive(Deserialize)]
        struct Wrapper {
            lang: Language,
        }
        let parsed: Wrapper = toml::from_str("lang = \"javascript\"").unwrap();
        assert_eq!(parsed.lang, Language::JavaScript);
    }
}
