//! hilite - lexical syntax highlighting for a small text editor
//!
//! Tokenizes Python, JavaScript, HTML and CSS on every keystroke and
//! hands the results to a host text surface as tagged ranges.

pub mod config;
pub mod error;
pub mod session;
pub mod syntax;
pub mod terminal;

pub use error::{Error, Result};
pub use session::Session;
pub use syntax::{Highlighter, Language, StyleSurface, TagLayout, Token, TokenKind};
