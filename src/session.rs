//! Editor session
//!
//! Owns what the editor shell would otherwise keep as ambient state: the
//! buffer text, the selected language and the surface showing both.
//! Each notification from the shell re-runs a full highlight pass.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::syntax::{HighlightReport, Highlighter, Language, StyleSurface};

/// A buffer, its language and the surface it is highlighted on
pub struct Session<S: StyleSurface> {
    text: String,
    language: Language,
    surface: S,
    highlighter: Highlighter,
    last_report: Option<HighlightReport>,
}

impl<S: StyleSurface> Session<S> {
    /// Create an empty session in the default language
    pub fn new(surface: S) -> Self {
        Self::with_language(surface, Language::default())
    }

    /// Create an empty session in a given language
    pub fn with_language(mut surface: S, language: Language) -> Self {
        surface.configure_tags(language.style_rules());
        surface.clear_tags();
        Self {
            text: String::new(),
            language,
            surface,
            highlighter: Highlighter::new(),
            last_report: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Summary of the most recent highlight pass
    pub fn last_report(&self) -> Option<HighlightReport> {
        self.last_report
    }

    /// The buffer changed
    pub fn on_text_changed(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.rehighlight();
    }

    /// The user picked a different language
    pub fn on_language_changed(&mut self, language: Language) {
        if language != self.language {
            self.language = language;
            self.surface.configure_tags(language.style_rules());
        }
        self.rehighlight();
    }

    /// The user picked a language by its dropdown id
    pub fn on_language_selected(&mut self, id: &str) -> Result<()> {
        let language = id.parse::<Language>()?;
        self.on_language_changed(language);
        Ok(())
    }

    /// A file was loaded into the buffer
    ///
    /// The extension picks the language; an unknown one keeps the
    /// current language.
    pub fn open(&mut self, path: &Path, contents: impl Into<String>) {
        if let Some(language) = Language::from_path(path) {
            debug!(path = %path.display(), %language, "language from extension");
            if language != self.language {
                self.language = language;
                self.surface.configure_tags(language.style_rules());
            }
        }
        self.on_text_changed(contents);
    }

    /// Start a new empty buffer, keeping the language
    pub fn new_file(&mut self) {
        self.on_text_changed(String::new());
    }

    /// Give up the session, returning its surface
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn rehighlight(&mut self) {
        let report = self
            .highlighter
            .apply(&mut self.surface, &self.text, self.language);
        self.last_report = Some(report);
    }
}
