use super::annotation::TypeAnnotation;
use super::registry::TypeHandle;
use crate::core::{Diagnostic, FunctionSignature};
use serde::Serialize;

/// Result of semantic analysis, stored on the node it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Analysis {
    pub return_handle: Option<TypeHandle>,
    pub parameter_handles: Vec<Option<TypeHandle>>,
    pub warnings: Vec<Diagnostic>,
}

impl Analysis {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// An extern function declaration ready for analysis and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionTypeNode {
    pub signature: FunctionSignature,
    pub return_annotation: TypeAnnotation,
    pub parameter_annotations: Vec<TypeAnnotation>,
    pub is_extern: bool,
    /// 1-based line of the C declaration.
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
}

impl FunctionTypeNode {
    pub fn name(&self) -> &str {
        &self.signature.name
    }

    /// Parameter names paired with their annotations.
    pub fn annotated_parameters(&self) -> impl Iterator<Item = (&str, &TypeAnnotation)> {
        self.signature
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .zip(self.parameter_annotations.iter())
    }

    pub fn is_analyzed(&self) -> bool {
        self.analysis.is_some()
    }
}
