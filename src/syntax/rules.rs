//! Pattern rules for syntax highlighting
//!
//! A [`RuleSet`] compiles an ordered list of patterns into a single
//! alternation. Searching from a position returns the leftmost match in
//! the rest of the text and, among rules that match there, the first one
//! listed. Scanners list longer constructs first (`"""` before `"`,
//! `/>` before `>`), which makes the first match the longest one.
//!
//! Patterns must only use non-capturing groups: each rule owns exactly
//! one capture group in the compiled alternation.

use regex::Regex;

/// A match reported by [`RuleSet::find_at`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<R> {
    /// Which rule matched
    pub rule: R,
    /// Byte offset where the match starts (inclusive)
    pub start: usize,
    /// Byte offset where the match ends (exclusive)
    pub end: usize,
}

/// An ordered set of pattern rules searched as one regex
pub struct RuleSet<R> {
    /// Compiled alternation, one capture group per rule
    pattern: Regex,
    /// Rule tags in priority order (highest first)
    rules: Vec<R>,
}

impl<R: Copy> RuleSet<R> {
    /// Compile rules, highest priority first
    pub fn new(rules: &[(R, &str)]) -> Result<Self, regex::Error> {
        let alternation = rules
            .iter()
            .map(|(_, pattern)| format!("({})", pattern))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&alternation)?;
        if pattern.captures_len() != rules.len() + 1 {
            return Err(regex::Error::Syntax(
                "rule patterns must not contain capture groups".to_string(),
            ));
        }
        Ok(Self {
            pattern,
            rules: rules.iter().map(|(rule, _)| *rule).collect(),
        })
    }

    /// Find the next rule match at or after `start`
    ///
    /// Empty matches are never reported, so a scanner that always moves
    /// to the returned `end` is guaranteed to terminate.
    pub fn find_at(&self, text: &str, start: usize) -> Option<RuleMatch<R>> {
        let mut from = start;
        while from < text.len() {
            let caps = self.pattern.captures_at(text, from)?;
            let found = self
                .rules
                .iter()
                .enumerate()
                .find_map(|(i, rule)| caps.get(i + 1).map(|m| (*rule, m)));
            let (rule, m) = found?;
            if m.end() > m.start() {
                return Some(RuleMatch {
                    rule,
                    start: m.start(),
                    end: m.end(),
                });
            }
            from = next_char_boundary(text, m.start());
        }
        None
    }

    /// Number of rules in the set
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Byte offset of the char after the one starting at `pos`
pub fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}

/// Offset of a `(` that follows `pos` after optional whitespace
pub fn paren_after(text: &str, pos: usize) -> Option<usize> {
    let rest = text[pos..].trim_start();
    rest.starts_with('(').then(|| text.len() - rest.len())
}

/// Check whether an identifier starts after `pos` and optional whitespace
pub fn followed_by_identifier(text: &str, pos: usize) -> bool {
    text[pos..]
        .trim_start()
        .starts_with(|c: char| c.is_alphabetic() || c == '_' || c == '$')
}

/// Double- and single-quoted strings that stop at an unescaped newline
///
/// The closing quote is optional so an unterminated string still yields
/// a token reaching the end of its line.
pub const QUOTED_STRING: &str =
    r#""(?:[^"\\\n]|\\(?s:.))*"?|'(?:[^'\\\n]|\\(?s:.))*'?"#;

/// `/* ... */` comments, running to end of text when unterminated
pub const BLOCK_COMMENT: &str = r"/\*(?s:.*?)(?:\*/|\z)";

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Test {
        Comment,
        Number,
        Word,
    }

    fn rules() -> RuleSet<Test> {
        RuleSet::new(&[
            (Test::Comment, BLOCK_COMMENT),
            (Test::Number, r"\d+"),
            (Test::Word, r"\w+"),
        ])
        .unwrap()
    }

    #[test]
    fn test_find_leftmost() {
        let rules = rules();
        let m = rules.find_at("  abc 123", 0).unwrap();
        assert_eq!(m, RuleMatch { rule: Test::Word, start: 2, end: 5 });
        let m = rules.find_at("  abc 123", 5).unwrap();
        assert_eq!(m, RuleMatch { rule: Test::Number, start: 6, end: 9 });
        assert_eq!(rules.find_at("  abc 123", 9), None);
        assert_eq!(rules.find_at("   ", 0), None);
    }

    #[test]
    fn test_priority_at_same_position() {
        // Number is listed before Word, so digits are numbers even though
        // Word would also match them.
        let m = rules().find_at("42", 0).unwrap();
        assert_eq!(m.rule, Test::Number);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let m = rules().find_at("x /* open", 0).unwrap();
        assert_eq!(m.rule, Test::Word);
        let m = rules().find_at("x /* open", 1).unwrap();
        assert_eq!(m, RuleMatch { rule: Test::Comment, start: 2, end: 9 });
    }

    #[test]
    fn test_empty_matches_skipped() {
        let rules = RuleSet::new(&[(Test::Word, r"a*")]).unwrap();
        let m = rules.find_at("xyaa", 0).unwrap();
        assert_eq!((m.start, m.end), (2, 4));
        assert_eq!(rules.find_at("xyz", 0), None);
    }

    #[test]
    fn test_capture_groups_rejected() {
        assert!(RuleSet::new(&[(Test::Word, r"(a)b")]).is_err());
        assert!(RuleSet::new(&[(Test::Word, r"(?:a)b")]).is_ok());
    }

    #[test]
    fn test_quoted_string() {
        let rules = RuleSet::new(&[(Test::Word, QUOTED_STRING)]).unwrap();
        let text = r#"x = "a\"b" + 'open"#;
        let m = rules.find_at(text, 0).unwrap();
        assert_eq!(&text[m.start..m.end], r#""a\"b""#);
        let m = rules.find_at(text, m.end).unwrap();
        assert_eq!(&text[m.start..m.end], "'open");

        let text = "'line one\nline two'";
        let m = rules.find_at(text, 0).unwrap();
        assert_eq!(&text[m.start..m.end], "'line one");
    }

    #[test]
    fn test_paren_after() {
        assert_eq!(paren_after("print (x)", 5), Some(6));
        assert_eq!(paren_after("f(x)", 1), Some(1));
        assert_eq!(paren_after("f\n  (", 1), Some(4));
        assert_eq!(paren_after("f = 1", 1), None);
        assert_eq!(paren_after("f", 1), None);
    }

    #[test]
    fn test_followed_by_identifier() {
        assert!(followed_by_identifier("function add(", 8));
        assert!(followed_by_identifier("class\n  _Base", 5));
        assert!(!followed_by_identifier("function (x)", 8));
        assert!(!followed_by_identifier("class {", 5));
        assert!(!followed_by_identifier("def", 3));
    }

    #[test]
    fn test_next_char_boundary() {
        assert_eq!(next_char_boundary("aé", 0), 1);
        assert_eq!(next_char_boundary("aé", 1), 3);
        assert_eq!(next_char_boundary("aé", 3), 3);
    }
}
