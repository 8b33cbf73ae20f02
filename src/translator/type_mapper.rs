//! Foreign type → canonical type mapping.
//!
//! The mapping table is closed: anything not listed classifies as
//! [`CanonicalType::Unknown`].
//!
//! | foreign kind                      | canonical |
//! |-----------------------------------|-----------|
//! | `double`                          | `F64`     |
//! | `void`                            | `Unit`    |
//! | `bool` / `_Bool`                  | `Bool`    |
//! | `unsigned long`                   | `U64`     |
//! | `int`, `unsigned int`             | `Int`     |
//! | `char`, `signed char` (scalar)    | `Char`    |
//! | pointer to any character type     | `String`  |
//! | pointer to anything else          | `Reference(classify(pointee))` |

use crate::core::CanonicalType;
use crate::inspector::{ForeignType, TypeKind};

/// Default bound on pointer nesting before a type is treated as unmappable.
pub const DEFAULT_MAX_POINTER_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapper {
    max_pointer_depth: usize,
}

impl Default for TypeMapper {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POINTER_DEPTH)
    }
}

impl TypeMapper {
    pub fn new(max_pointer_depth: usize) -> Self {
        Self { max_pointer_depth }
    }

    pub fn max_pointer_depth(&self) -> usize {
        self.max_pointer_depth
    }

    pub fn classify(&self, ty: &ForeignType) -> CanonicalType {
        self.classify_at_depth(ty, 0)
    }

    fn classify_at_depth(&self, ty: &ForeignType, depth: usize) -> CanonicalType {
        if ty.kind() != TypeKind::Pointer {
            return classify_scalar(ty.kind());
        }
        if depth >= self.max_pointer_depth {
            return CanonicalType::Unknown;
        }
        match ty.pointee() {
            Some(pointee) if pointee.kind().is_character() => CanonicalType::String,
            Some(pointee) => {
                CanonicalType::reference(self.classify_at_depth(pointee, depth + 1))
            }
            None => CanonicalType::reference(CanonicalType::Unknown),
        }
    }
}

/// Classify a type with the default pointer depth bound.
pub fn classify(ty: &ForeignType) -> CanonicalType {
    TypeMapper::default().classify(ty)
}

fn classify_scalar(kind: TypeKind) -> CanonicalType {
    match kind {
        TypeKind::Double => CanonicalType::F64,
        TypeKind::Void => CanonicalType::Unit,
        TypeKind::Bool => CanonicalType::Bool,
        TypeKind::ULong => CanonicalType::U64,
        TypeKind::Int | TypeKind::UInt => CanonicalType::Int,
        TypeKind::CharS | TypeKind::SChar => CanonicalType::Char,
        _ => CanonicalType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scalar(kind: TypeKind) -> ForeignType {
        ForeignType::new(kind, kind.to_string())
    }

    fn pointer_to(kind: TypeKind, depth: usize) -> ForeignType {
        (0..depth).fold(scalar(kind), |ty, _| ForeignType::pointer(ty))
    }

    #[test]
    fn test_table_kinds() {
        assert_eq!(classify(&scalar(TypeKind::Double)), CanonicalType::F64);
        assert_eq!(classify(&scalar(TypeKind::Void)), CanonicalType::Unit);
        assert_eq!(classify(&scalar(TypeKind::Bool)), CanonicalType::Bool);
        assert_eq!(classify(&scalar(TypeKind::ULong)), CanonicalType::U64);
        assert_eq!(classify(&scalar(TypeKind::Int)), CanonicalType::Int);
        assert_eq!(classify(&scalar(TypeKind::UInt)), CanonicalType::Int);
        assert_eq!(classify(&scalar(TypeKind::CharS)), CanonicalType::Char);
        assert_eq!(classify(&scalar(TypeKind::SChar)), CanonicalType::Char);
    }

    #[test]
    fn test_kinds_outside_table_are_unknown() {
        for kind in [
            TypeKind::UChar,
            TypeKind::Short,
            TypeKind::UShort,
            TypeKind::Long,
            TypeKind::LongLong,
            TypeKind::ULongLong,
            TypeKind::Float,
            TypeKind::LongDouble,
            TypeKind::Record,
            TypeKind::Enum,
            TypeKind::Typedef,
            TypeKind::Array,
            TypeKind::LValueReference,
            TypeKind::Auto,
            TypeKind::Unexposed,
        ] {
            assert_eq!(classify(&scalar(kind)), CanonicalType::Unknown, "{kind}");
        }
    }

    #[test]
    fn test_pointer_to_any_char_is_string() {
        for kind in [TypeKind::CharS, TypeKind::SChar, TypeKind::UChar] {
            assert_eq!(classify(&pointer_to(kind, 1)), CanonicalType::String);
        }
    }

    #[test]
    fn test_pointer_to_pointer_to_int() {
        assert_eq!(
            classify(&pointer_to(TypeKind::Int, 2)),
            CanonicalType::reference(CanonicalType::reference(CanonicalType::Int))
        );
    }

    #[test]
    fn test_pointer_to_char_pointer_is_reference_to_string() {
        assert_eq!(
            classify(&pointer_to(TypeKind::CharS, 2)),
            CanonicalType::reference(CanonicalType::String)
        );
    }

    #[test]
    fn test_pointer_to_unsupported_kind() {
        let ty = classify(&pointer_to(TypeKind::Record, 1));
        assert_eq!(ty, CanonicalType::reference(CanonicalType::Unknown));
        assert!(!ty.is_resolved());
    }

    #[test]
    fn test_pointer_to_function_is_unresolved() {
        let func = ForeignType::function(scalar(TypeKind::Void), vec![], false);
        let ty = classify(&ForeignType::pointer(func));
        assert_eq!(ty, CanonicalType::reference(CanonicalType::Unknown));
    }

    #[test]
    fn test_depth_bound() {
        let mapper = TypeMapper::new(2);
        assert!(mapper.classify(&pointer_to(TypeKind::Int, 2)).is_resolved());
        assert!(!mapper.classify(&pointer_to(TypeKind::Int, 3)).is_resolved());
    }

    proptest! {
        #[test]
        fn prop_pointer_depth_matches_reference_depth(depth in 1usize..48) {
            let ty = classify(&pointer_to(TypeKind::Double, depth));
            prop_assert!(ty.is_resolved());
            prop_assert_eq!(ty.reference_depth(), depth);
        }
    }
}
