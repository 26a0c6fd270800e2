//! Error types for hilite

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for hilite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Highlighter and shell error types
///
/// Malformed source text is never an error: tokenizers degrade to
/// best-effort tokens instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Cannot write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("{0}")]
    Message(String),
}
