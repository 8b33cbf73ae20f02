//! Target-language side of a translation: the builtin type registry, the
//! type annotations handed to renderers, and the function nodes that carry
//! a signature through analysis and rendering.

pub mod annotation;
pub mod node;
pub mod registry;

pub use annotation::TypeAnnotation;
pub use node::{Analysis, FunctionTypeNode};
pub use registry::{TypeHandle, TypeRegistry};
