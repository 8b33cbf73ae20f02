use crate::core::{Diagnostic, DiagnosticKind};
use crate::target::{Analysis, FunctionTypeNode, TypeRegistry};
use std::collections::HashSet;

/// Validates a function node and records the outcome on it.
pub trait SemanticAnalyzer {
    fn analyze(&self, node: &mut FunctionTypeNode);
}

/// Default analyzer: binds every type to a registry handle and checks that
/// names are usable in the target language.
pub struct SignatureAnalyzer<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> SignatureAnalyzer<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    fn check_names(&self, node: &FunctionTypeNode) -> Vec<Diagnostic> {
        let name = node.name();
        let mut warnings = Vec::new();

        if !is_identifier(name) {
            warnings.push(Diagnostic::for_declaration(
                DiagnosticKind::InvalidIdentifier,
                name,
                node.line,
                format!("function name `{name}` is not a valid identifier"),
            ));
        }

        let mut seen = HashSet::new();
        for param in &node.signature.parameters {
            if !seen.insert(param.name.as_str()) {
                warnings.push(Diagnostic::for_declaration(
                    DiagnosticKind::DuplicateParameter,
                    name,
                    node.line,
                    format!("parameter `{}` of `{name}` is declared twice", param.name),
                ));
            }
            if !is_identifier(&param.name) {
                warnings.push(Diagnostic::for_declaration(
                    DiagnosticKind::InvalidIdentifier,
                    name,
                    node.line,
                    format!(
                        "parameter `{}` of `{name}` is not a valid identifier",
                        param.name
                    ),
                ));
            }
        }
        warnings
    }
}

impl SemanticAnalyzer for SignatureAnalyzer<'_> {
    fn analyze(&self, node: &mut FunctionTypeNode) {
        let signature = &node.signature;
        let return_handle = self
            .registry
            .internal_type_for(signature.return_type.kind());
        let parameter_handles = signature
            .parameters
            .iter()
            .map(|p| self.registry.internal_type_for(p.ty.kind()))
            .collect();

        let warnings = self
            .check_names(node)
            .into_iter()
            .map(Diagnostic::emit)
            .collect();

        node.analysis = Some(Analysis {
            return_handle,
            parameter_handles,
            warnings,
        });
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}
