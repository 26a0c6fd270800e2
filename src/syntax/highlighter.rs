//! Applying tokens to a text surface
//!
//! The highlighter does not draw anything. It clears a host surface and
//! hands it one `(kind, start, end)` tag per token; the host decides
//! what a tag looks like. Every pass re-tokenizes the whole buffer.

use tracing::{debug, error, trace};

use super::index::{LineIndex, TextIndex};
use super::language::Language;
use super::style::{Style, StyleRule};
use super::tokens::{Token, TokenKind};
use crate::error::Result;

/// A host text surface that displays tagged ranges
pub trait StyleSurface {
    /// Remove every tag previously added
    fn clear_tags(&mut self);

    /// Tag the range `[start, end)` with a token kind
    fn add_tag(&mut self, kind: TokenKind, start: TextIndex, end: TextIndex);

    /// Register the styles for a language's tags
    fn configure_tags(&mut self, _rules: &[StyleRule]) {}
}

/// One tag applied to a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaggedRange {
    pub kind: TokenKind,
    pub start: TextIndex,
    pub end: TextIndex,
}

impl TaggedRange {
    /// Check if this range covers a position
    pub fn contains(&self, index: TextIndex) -> bool {
        self.start <= index && index < self.end
    }
}

/// In-memory surface recording the current tag layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagLayout {
    tags: Vec<TaggedRange>,
    styles: Vec<StyleRule>,
}

impl TagLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags in the order they were applied
    pub fn tags(&self) -> &[TaggedRange] {
        &self.tags
    }

    /// The tag covering a position, if any
    pub fn tag_at(&self, index: TextIndex) -> Option<&TaggedRange> {
        self.tags.iter().find(|tag| tag.contains(index))
    }

    /// Style registered for a kind, if the current language uses it
    pub fn style_for(&self, kind: TokenKind) -> Option<Style> {
        self.styles
            .iter()
            .find(|rule| rule.kind == kind)
            .map(|rule| rule.style)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl StyleSurface for TagLayout {
    fn clear_tags(&mut self) {
        self.tags.clear();
    }

    fn add_tag(&mut self, kind: TokenKind, start: TextIndex, end: TextIndex) {
        self.tags.push(TaggedRange { kind, start, end });
    }

    fn configure_tags(&mut self, rules: &[StyleRule]) {
        self.styles = rules.to_vec();
    }
}

/// Summary of one highlight pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightReport {
    pub language: Language,
    /// Tags applied
    pub tokens: usize,
    /// Length of the text in bytes
    pub bytes: usize,
}

/// Drives a tokenizer over a buffer and tags the results
#[derive(Debug, Default)]
pub struct Highlighter {
    /// Language of the previous pass
    language: Option<Language>,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Language used by the most recent pass
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Re-tag the whole of `text` on `surface`
    ///
    /// Clears every existing tag first, so calling this twice with the
    /// same input leaves the same layout, and switching language leaves
    /// nothing from the previous one.
    pub fn apply<S>(&mut self, surface: &mut S, text: &str, language: Language) -> HighlightReport
    where
        S: StyleSurface + ?Sized,
    {
        if self.language != Some(language) {
            trace!(from = ?self.language, to = %language, "language switch");
            self.language = Some(language);
        }

        surface.clear_tags();

        let index = LineIndex::new(text);
        let mut prev_end = 0;
        let mut tokens = 0;
        for token in language.tokenize(text) {
            if !is_well_formed(&token, prev_end, text) {
                error!(?token, prev_end, len = text.len(), %language, "tokenizer produced an invalid span");
                debug_assert!(false, "invalid {} token {:?}", language, token);
                continue;
            }
            surface.add_tag(token.kind, index.position(token.start), index.position(token.end));
            prev_end = token.end;
            tokens += 1;
        }

        debug!(%language, tokens, bytes = text.len(), "highlight pass");
        HighlightReport {
            language,
            tokens,
            bytes: text.len(),
        }
    }

    /// Like [`apply`](Self::apply), resolving the language from its id
    pub fn apply_named<S>(&mut self, surface: &mut S, text: &str, id: &str) -> Result<HighlightReport>
    where
        S: StyleSurface + ?Sized,
    {
        let language = id.parse::<Language>()?;
        Ok(self.apply(surface, text, language))
    }
}

fn is_well_formed(token: &Token, prev_end: usize, text: &str) -> bool {
    token.start < token.end
        && token.end <= text.len()
        && token.start >= prev_end
        && text.is_char_boundary(token.start)
        && text.is_char_boundary(token.end)
}
