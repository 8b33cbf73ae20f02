//! Translate the function declarations of C and C++ headers into extern
//! signatures for a target language.
//!
//! The pipeline is parse ([`inspector`]), build ([`translator`]), analyze
//! ([`sema`]), render ([`io::output`]) and write, driven by
//! [`driver::Translator`]:
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = cimport::translate(Path::new("math.h"), Path::new("math.m"))?;
//! println!("{} signatures, {} skipped", report.signatures, report.skipped());
//! # Ok::<(), cimport::Error>(())
//! ```

// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod driver;
pub mod inspector;
pub mod io;
pub mod observability;
pub mod sema;
pub mod target;
pub mod translator;

// Re-export commonly used types
pub use crate::core::{
    CanonicalKind, CanonicalType, Diagnostic, DiagnosticKind, Error, FunctionSignature,
    ParamSpec, Result,
};

pub use crate::config::{CimportConfig, ParseFailurePolicy};

pub use crate::driver::{translate, TranslateOptions, TranslationReport, Translator};

pub use crate::io::output::{create_renderer, OutputFormat, Renderer};

pub use crate::target::{FunctionTypeNode, TypeAnnotation, TypeRegistry};

pub use crate::translator::{classify, SignatureBuilder, TypeMapper};
