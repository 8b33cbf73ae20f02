use super::registry::TypeRegistry;
use crate::core::{CanonicalKind, CanonicalType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type annotation attached to a translated signature for the renderer.
///
/// References always carry the referee's annotation, so `int **` becomes
/// `Reference(Reference(Builtin("int")))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeAnnotation {
    Builtin { symbol: String },
    Reference(Box<TypeAnnotation>),
}

impl TypeAnnotation {
    pub fn builtin(symbol: impl Into<String>) -> Self {
        Self::Builtin {
            symbol: symbol.into(),
        }
    }

    /// Annotation for a resolved canonical type.
    ///
    /// `None` when the type (or any referee) is `Unknown` or lacks a
    /// registered symbol.
    pub fn for_type(ty: &CanonicalType, registry: &TypeRegistry) -> Option<Self> {
        match ty {
            CanonicalType::Unknown => None,
            CanonicalType::Reference(referee) => {
                registry.internal_type_for(CanonicalKind::Reference)?;
                let inner = Self::for_type(referee, registry)?;
                Some(Self::Reference(Box::new(inner)))
            }
            builtin => registry.symbol_of(builtin.kind()).map(Self::builtin),
        }
    }

    /// Symbol of the innermost builtin.
    pub fn innermost_symbol(&self) -> &str {
        match self {
            Self::Builtin { symbol } => symbol,
            Self::Reference(inner) => inner.innermost_symbol(),
        }
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin { symbol } => f.write_str(symbol),
            Self::Reference(inner) => write!(f, "&{inner}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_annotation() {
        let registry = TypeRegistry::builtin();
        assert_eq!(
            TypeAnnotation::for_type(&CanonicalType::Int, &registry),
            Some(TypeAnnotation::builtin("int"))
        );
    }

    #[test]
    fn test_reference_is_two_level() {
        let registry = TypeRegistry::builtin();
        let annotation =
            TypeAnnotation::for_type(&CanonicalType::reference(CanonicalType::F64), &registry)
                .unwrap();
        assert_eq!(
            annotation,
            TypeAnnotation::Reference(Box::new(TypeAnnotation::builtin("f64")))
        );
        assert_eq!(annotation.to_string(), "&f64");
        assert_eq!(annotation.innermost_symbol(), "f64");
    }

    #[test]
    fn test_unresolved_reference_has_no_annotation() {
        let registry = TypeRegistry::builtin();
        let ty = CanonicalType::reference(CanonicalType::Unknown);
        assert_eq!(TypeAnnotation::for_type(&ty, &registry), None);
    }

    #[test]
    fn test_missing_symbol_has_no_annotation() {
        let registry = TypeRegistry::empty();
        assert_eq!(TypeAnnotation::for_type(&CanonicalType::Bool, &registry), None);
    }
}
