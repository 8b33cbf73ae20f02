//! Canonical signature types produced by the translator.
//!
//! Every foreign declaration type is folded into the closed [`CanonicalType`]
//! set. A [`FunctionSignature`] is only ever constructed from fully resolved
//! types; anything that still contains [`CanonicalType::Unknown`] is rejected
//! by the builder before it reaches this module's consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of types a C declaration can be translated into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "referee", rename_all = "snake_case")]
pub enum CanonicalType {
    Unit,
    Bool,
    Int,
    U64,
    F64,
    Char,
    /// Opaque C string (`char *` and friends). No referee is tracked.
    String,
    /// Typed pointer. The referee may itself be a reference.
    Reference(Box<CanonicalType>),
    /// No mapping exists for the foreign type.
    Unknown,
}

/// Discriminant of a [`CanonicalType`] without its payload.
///
/// Used as the lookup key of the target type registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalKind {
    Unit,
    Bool,
    Int,
    U64,
    F64,
    Char,
    String,
    Reference,
    Unknown,
}

impl CanonicalType {
    pub fn reference(referee: CanonicalType) -> Self {
        Self::Reference(Box::new(referee))
    }

    pub fn kind(&self) -> CanonicalKind {
        match self {
            Self::Unit => CanonicalKind::Unit,
            Self::Bool => CanonicalKind::Bool,
            Self::Int => CanonicalKind::Int,
            Self::U64 => CanonicalKind::U64,
            Self::F64 => CanonicalKind::F64,
            Self::Char => CanonicalKind::Char,
            Self::String => CanonicalKind::String,
            Self::Reference(_) => CanonicalKind::Reference,
            Self::Unknown => CanonicalKind::Unknown,
        }
    }

    /// The pointed-to type of a reference.
    pub fn referee(&self) -> Option<&CanonicalType> {
        match self {
            Self::Reference(referee) => Some(referee),
            _ => None,
        }
    }

    /// True when no `Unknown` appears anywhere in the type.
    ///
    /// `Reference(Unknown)` is unresolved, as is any reference chain that
    /// bottoms out in `Unknown`.
    pub fn is_resolved(&self) -> bool {
        let mut current = self;
        loop {
            match current {
                Self::Unknown => return false,
                Self::Reference(referee) => current = referee,
                _ => return true,
            }
        }
    }

    /// Number of reference layers wrapping the innermost type.
    pub fn reference_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Self::Reference(referee) = current {
            depth += 1;
            current = referee;
        }
        depth
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "Unit"),
            Self::Bool => write!(f, "Bool"),
            Self::Int => write!(f, "Int"),
            Self::U64 => write!(f, "U64"),
            Self::F64 => write!(f, "F64"),
            Self::Char => write!(f, "Char"),
            Self::String => write!(f, "String"),
            Self::Reference(referee) => write!(f, "Reference({referee})"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One parameter of a translated signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: CanonicalType,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, ty: CanonicalType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Name used for a parameter the declaration left unnamed.
    pub fn synthesized_name(position: usize) -> String {
        format!("arg{position}")
    }
}

/// A complete, self-consistent callable signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    pub parameters: Vec<ParamSpec>,
    pub return_type: CanonicalType,
    pub is_variadic: bool,
}

impl FunctionSignature {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }
}
