//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cimport operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The input could not be turned into a translation unit at all
    #[error("Parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A tree-sitter grammar could not be loaded
    #[error("Grammar error: {0}")]
    Grammar(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Rendering a signature to text failed
    #[error("Render error: {0}")]
    Render(String),

    /// Strict mode rejected a run that skipped declarations
    #[error("{skipped} declaration(s) in {} could not be translated", path.display())]
    Incomplete { path: PathBuf, skipped: usize },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a parse error for a whole input file
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Grammar(_))
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
