use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tree_sitter::{Language, Parser};

/// Source dialect, selecting the tree-sitter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    C,
    Cpp,
}

impl Dialect {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "h" | "c" => Some(Dialect::C),
            "hpp" | "hh" | "hxx" | "h++" | "cpp" | "cc" | "cxx" | "c++" => Some(Dialect::Cpp),
            _ => None,
        }
    }

    /// Dialect implied by a path, defaulting to C for unknown extensions.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or(Dialect::C)
    }

    pub fn is_header_path(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .is_some()
    }

    pub fn parser(self) -> Result<Parser> {
        let mut parser = Parser::new();
        let language: Language = match self {
            Dialect::C => tree_sitter_c::LANGUAGE.into(),
            Dialect::Cpp => tree_sitter_cpp::LANGUAGE.into(),
        };
        parser
            .set_language(&language)
            .map_err(|e| Error::Grammar(format!("Failed to set {self} language: {e}")))?;
        Ok(parser)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::C => write!(f, "C"),
            Dialect::Cpp => write!(f, "C++"),
        }
    }
}
