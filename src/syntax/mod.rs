//! Syntax highlighting engine
//!
//! This module provides:
//! - Per-language tokenizers producing lazy token streams
//! - The language table (ids, names, extensions, style tables)
//! - The highlighter that applies tokens to a host surface

mod style;
mod tokens;
mod rules;
mod index;
mod language;
mod highlighter;
pub mod builtin;

pub use style::{Color, Style, StyleRule};
pub use tokens::{Token, TokenKind};
pub use rules::{RuleMatch, RuleSet};
pub use index::{LineIndex, TextIndex};
pub use language::{Language, Tokens};
pub use highlighter::{HighlightReport, Highlighter, StyleSurface, TagLayout, TaggedRange};
