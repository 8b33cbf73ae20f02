//! Semantic analysis of translated signatures.
//!
//! Analysis never drops a signature; problems are recorded as warnings on the
//! node's [`Analysis`](crate::target::Analysis).

pub mod analyzer;

pub use analyzer::{SemanticAnalyzer, SignatureAnalyzer};
