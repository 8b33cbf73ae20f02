//! Non-fatal problems reported while translating a header.
//!
//! A diagnostic never aborts a run. Declaration-level diagnostics mean the
//! declaration was skipped; analyzer diagnostics are warnings attached to a
//! signature that was still emitted.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A foreign type has no canonical mapping.
    UnresolvedType,
    /// A pointer's referee resolved to `Unknown`.
    UnresolvedReferee,
    /// The target registry has no symbol for a mapped type.
    MissingTypeSymbol,
    /// The input file could not be parsed at all.
    ParseFailure,
    /// Two parameters of one signature share a name.
    DuplicateParameter,
    /// A name is not a valid target-language identifier.
    InvalidIdentifier,
}

impl DiagnosticKind {
    /// Whether the diagnostic caused a declaration (or the run) to be dropped.
    pub fn is_rejection(self) -> bool {
        matches!(
            self,
            Self::UnresolvedType
                | Self::UnresolvedReferee
                | Self::MissingTypeSymbol
                | Self::ParseFailure
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedType => write!(f, "unresolved_type"),
            Self::UnresolvedReferee => write!(f, "unresolved_referee"),
            Self::MissingTypeSymbol => write!(f, "missing_type_symbol"),
            Self::ParseFailure => write!(f, "parse_failure"),
            Self::DuplicateParameter => write!(f, "duplicate_parameter"),
            Self::InvalidIdentifier => write!(f, "invalid_identifier"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Declaration the diagnostic is about, if any.
    pub declaration: Option<String>,
    pub message: String,
    /// 1-based source line of the declaration.
    pub line: Option<usize>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            declaration: None,
            message: message.into(),
            line: None,
        }
    }

    pub fn for_declaration(
        kind: DiagnosticKind,
        declaration: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            declaration: Some(declaration.into()),
            message: message.into(),
            line: Some(line),
        }
    }

    /// Log the diagnostic through `tracing` and hand it back.
    pub fn emit(self) -> Self {
        match (&self.declaration, self.line) {
            (Some(decl), Some(line)) => tracing::warn!(
                kind = %self.kind,
                declaration = %decl,
                line,
                "{}",
                self.message
            ),
            _ => tracing::warn!(kind = %self.kind, "{}", self.message),
        }
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_kinds() {
        assert!(DiagnosticKind::UnresolvedType.is_rejection());
        assert!(DiagnosticKind::UnresolvedReferee.is_rejection());
        assert!(DiagnosticKind::ParseFailure.is_rejection());
        assert!(!DiagnosticKind::DuplicateParameter.is_rejection());
    }

    #[test]
    fn test_display_with_line() {
        let diag = Diagnostic::for_declaration(
            DiagnosticKind::UnresolvedType,
            "make_point",
            7,
            "no mapping for return type `struct point` (Record)",
        );
        assert_eq!(
            diag.to_string(),
            "line 7: [unresolved_type] no mapping for return type `struct point` (Record)"
        );
    }
}
