pub mod diagnostics;
pub mod errors;
pub mod types;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use errors::{Error, Result};
pub use types::{CanonicalKind, CanonicalType, FunctionSignature, ParamSpec};
