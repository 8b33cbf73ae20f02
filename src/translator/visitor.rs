//! Declaration visitor.
//!
//! Walks a whole translation unit and collects a signature for every plain
//! function and method. A rejected declaration produces a diagnostic and the
//! walk carries on with the next one.

use super::builder::SignatureBuilder;
use crate::core::Diagnostic;
use crate::inspector::{Cursor, TranslationUnit, VisitResult};
use crate::observability::set_current_declaration;
use crate::target::FunctionTypeNode;
use tracing::{debug, debug_span};

/// Signatures in document order plus the diagnostics of rejected ones.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub signatures: Vec<FunctionTypeNode>,
    pub diagnostics: Vec<Diagnostic>,
    /// Function-like declarations seen, accepted or not.
    pub candidates: usize,
}

impl Extraction {
    pub fn rejected(&self) -> usize {
        self.candidates - self.signatures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.rejected() == 0
    }
}

pub struct DeclarationVisitor<'b, 'r> {
    builder: &'b SignatureBuilder<'r>,
}

impl<'b, 'r> DeclarationVisitor<'b, 'r> {
    pub fn new(builder: &'b SignatureBuilder<'r>) -> Self {
        Self { builder }
    }

    pub fn extract(&self, unit: &TranslationUnit) -> Extraction {
        let _span = debug_span!("extract", file = %unit.path().display()).entered();
        let mut extraction = Extraction::default();
        unit.visit(|cursor| {
            self.visit_cursor(cursor, &mut extraction);
            VisitResult::Continue
        });
        debug!(
            accepted = extraction.signatures.len(),
            rejected = extraction.rejected(),
            "Extraction finished"
        );
        extraction
    }

    fn visit_cursor(&self, cursor: &Cursor<'_>, extraction: &mut Extraction) {
        if !cursor.kind().is_function_like() {
            return;
        }
        extraction.candidates += 1;
        let _decl = set_current_declaration(cursor.name(), cursor.location().line);
        match self.builder.build(cursor) {
            Ok(node) => {
                debug!(function = node.name(), line = node.line, "Built signature");
                extraction.signatures.push(node);
            }
            Err(err) => {
                let diagnostic = err.into_diagnostic(cursor.location().line).emit();
                extraction.diagnostics.push(diagnostic);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CanonicalType, DiagnosticKind};
    use crate::inspector::{parse_source, Dialect};
    use crate::target::TypeRegistry;
    use crate::translator::TypeMapper;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn extract(source: &str, dialect: Dialect) -> Extraction {
        let registry = TypeRegistry::builtin();
        let builder = SignatureBuilder::new(TypeMapper::default(), &registry);
        let unit = parse_source("test", source, dialect).unwrap();
        DeclarationVisitor::new(&builder).extract(&unit)
    }

    fn names(extraction: &Extraction) -> Vec<&str> {
        extraction.signatures.iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_rejection_does_not_stop_traversal() {
        let source = indoc! {"
            struct point origin(void);
            int add(int a, int b);
        "};
        let extraction = extract(source, Dialect::C);
        assert_eq!(names(&extraction), vec!["add"]);
        assert_eq!(extraction.diagnostics.len(), 1);
        assert_eq!(extraction.diagnostics[0].kind, DiagnosticKind::UnresolvedType);
        assert_eq!(extraction.diagnostics[0].declaration.as_deref(), Some("origin"));
        assert_eq!(extraction.diagnostics[0].line, Some(1));
        assert_eq!(extraction.rejected(), 1);
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let source = indoc! {"
            int f(int x);
            int f(int x) { return x; }
            int g(void);
        "};
        let extraction = extract(source, Dialect::C);
        assert_eq!(names(&extraction), vec!["f", "f", "g"]);
        assert!(extraction.is_complete());
    }

    #[test]
    fn test_non_functions_are_ignored() {
        let source = indoc! {"
            int counter;
            typedef int (*callback)(int);
            int (*handler)(int);
            double mean(double *values, unsigned long n);
        "};
        let extraction = extract(source, Dialect::C);
        assert_eq!(names(&extraction), vec!["mean"]);
        assert_eq!(extraction.candidates, 1);
        assert!(extraction.diagnostics.is_empty());
    }

    #[test]
    fn test_nested_methods_follow_document_order() {
        let source = indoc! {"
            int first(int a);
            namespace geometry {
                class Circle {
                public:
                    double radius() const;
                    Circle(double r);
                };
            }
            extern \"C\" {
                void last(void);
            }
        "};
        let extraction = extract(source, Dialect::Cpp);
        assert_eq!(names(&extraction), vec!["first", "radius", "last"]);
        assert_eq!(
            extraction.signatures[1].signature.return_type,
            CanonicalType::F64
        );
    }

    #[test]
    fn test_local_declarations_inside_bodies_are_visited() {
        let source = indoc! {"
            int outer(int x) {
                int helper(int);
                return helper(x);
            }
        "};
        let extraction = extract(source, Dialect::C);
        assert_eq!(names(&extraction), vec!["outer", "helper"]);
    }
}
