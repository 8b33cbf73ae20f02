//! The declaration-translation engine: type mapping, signature building and
//! the traversal that drives them over a translation unit.

pub mod builder;
pub mod type_mapper;
pub mod visitor;

pub use builder::{BuildError, SignatureBuilder, TypePosition};
pub use type_mapper::{classify, TypeMapper, DEFAULT_MAX_POINTER_DEPTH};
pub use visitor::{DeclarationVisitor, Extraction};

use crate::inspector::TranslationUnit;
use crate::target::TypeRegistry;

/// Extract every translatable signature from `unit`.
pub fn extract_signatures(
    unit: &TranslationUnit,
    mapper: TypeMapper,
    registry: &TypeRegistry,
) -> Extraction {
    let builder = SignatureBuilder::new(mapper, registry);
    DeclarationVisitor::new(&builder).extract(unit)
}
