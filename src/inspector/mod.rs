//! C declaration inspector.
//!
//! Parses one C or C++ file with tree-sitter and exposes its declarations
//! through a depth-first [`TranslationUnit::visit`] that hands out borrowed
//! [`Cursor`]s. Cursor kinds and type kinds follow a compiler front end's
//! vocabulary so consumers never deal with raw syntax nodes.
//!
//! ## Usage
//!
//! ```ignore
//! use cimport::inspector::{self, VisitResult};
//!
//! let unit = inspector::parse(path, None)?;
//! unit.visit(|cursor| {
//!     println!("{} declared at line {}", cursor.name(), cursor.location().line);
//!     VisitResult::Continue
//! });
//! ```

mod cursor;
mod declarator;
mod dialect;
mod foreign;

pub use cursor::{Cursor, CursorKind, Location};
pub use declarator::{ParamDecl, MAX_DECLARATOR_NESTING};
pub use dialect::Dialect;
pub use foreign::{ForeignType, FunctionType, TypeKind};

use crate::core::{Error, Result};
use declarator::DeclaratorResolver;
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Tree};

/// Callback verdict for [`TranslationUnit::visit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitResult {
    Continue,
    Stop,
}

/// One parsed input file.
pub struct TranslationUnit {
    path: PathBuf,
    dialect: Dialect,
    source: String,
    tree: Tree,
}

/// Parse the file at `path`. The dialect defaults to the one implied by the
/// file extension.
pub fn parse(path: &Path, dialect: Option<Dialect>) -> Result<TranslationUnit> {
    let bytes = fs::read(path)
        .map_err(|e| Error::parse(path, format!("Unable to read translation unit: {e}")))?;
    let source = String::from_utf8(bytes)
        .map_err(|_| Error::parse(path, "Translation unit is not valid UTF-8"))?;
    parse_source(path, source, dialect.unwrap_or_else(|| Dialect::from_path(path)))
}

/// Parse in-memory source text as if it were read from `path`.
pub fn parse_source(
    path: impl Into<PathBuf>,
    source: impl Into<String>,
    dialect: Dialect,
) -> Result<TranslationUnit> {
    let path = path.into();
    let source = source.into();
    let mut parser = dialect.parser()?;
    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| Error::parse(&path, "Unable to parse translation unit"))?;
    Ok(TranslationUnit {
        path,
        dialect,
        source,
        tree,
    })
}

impl TranslationUnit {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// True if tree-sitter had to recover from syntax errors.
    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Visit every declared entity depth-first in document order.
    ///
    /// Descends into every node (namespaces, linkage blocks, class bodies,
    /// function bodies). Returns [`VisitResult::Stop`] if the callback asked
    /// to stop.
    pub fn visit<F>(&self, mut callback: F) -> VisitResult
    where
        F: FnMut(&Cursor<'_>) -> VisitResult,
    {
        let mut walker = self.tree.walk();
        loop {
            let node = walker.node();
            if is_declaration(node) {
                for cursor in self.cursors_for(node) {
                    if callback(&cursor) == VisitResult::Stop {
                        return VisitResult::Stop;
                    }
                }
            }

            if walker.goto_first_child() {
                continue;
            }
            loop {
                if walker.goto_next_sibling() {
                    break;
                }
                if !walker.goto_parent() {
                    return VisitResult::Continue;
                }
            }
        }
    }

    /// Number of entities [`visit`](Self::visit) would report.
    pub fn declaration_count(&self) -> usize {
        let mut count = 0;
        self.visit(|_| {
            count += 1;
            VisitResult::Continue
        });
        count
    }

    fn cursors_for<'a>(&'a self, decl: Node<'a>) -> Vec<Cursor<'a>> {
        let resolver = DeclaratorResolver::new(&self.source, self.dialect);
        let specifier = resolver.specifier_type(decl);
        let base = specifier.clone().unwrap_or_else(|| match self.dialect {
            // Implicit int of pre-standard C.
            Dialect::C => ForeignType::new(TypeKind::Int, "int"),
            Dialect::Cpp => ForeignType::new(TypeKind::Void, "void"),
        });

        let mut walker = decl.walk();
        let declarators: Vec<Node<'a>> = decl
            .children_by_field_name("declarator", &mut walker)
            .collect();

        declarators
            .into_iter()
            .filter_map(|declarator| {
                let declared = resolver.resolve(Some(declarator), base.clone());
                let name_node = declared.name?;
                let position = name_node.start_position();
                let kind = cursor_kind(
                    decl,
                    name_node,
                    &declared.ty,
                    specifier.is_some() || self.dialect == Dialect::C,
                );
                Some(Cursor {
                    kind,
                    name: resolver.text(unqualified(name_node)),
                    ty: declared.ty,
                    params: declared.params,
                    location: Location {
                        line: position.row + 1,
                        column: position.column + 1,
                    },
                    node: decl,
                })
            })
            .collect()
    }
}

fn is_declaration(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "declaration" | "field_declaration" | "function_definition" | "type_definition"
    )
}

fn cursor_kind(decl: Node<'_>, name: Node<'_>, ty: &ForeignType, has_type: bool) -> CursorKind {
    if decl.kind() == "type_definition" {
        return CursorKind::TypedefDecl;
    }
    if name.kind() == "operator_cast" {
        return CursorKind::ConversionFunction;
    }
    if !ty.kind().is_function() {
        return if decl.kind() == "field_declaration" {
            CursorKind::FieldDecl
        } else {
            CursorKind::VarDecl
        };
    }

    let parent_kind = decl.parent().map(|p| p.kind());
    if parent_kind == Some("template_declaration") {
        return CursorKind::FunctionTemplate;
    }
    if unqualified(name).kind() == "destructor_name" {
        return CursorKind::Destructor;
    }
    if !has_type {
        return CursorKind::Constructor;
    }
    if parent_kind == Some("field_declaration_list") || name.kind() == "qualified_identifier" {
        CursorKind::CxxMethod
    } else {
        CursorKind::FunctionDecl
    }
}

/// Strip namespace/class qualification and template arguments from a name.
fn unqualified(mut node: Node<'_>) -> Node<'_> {
    while matches!(node.kind(), "qualified_identifier" | "template_function") {
        match node.child_by_field_name("name") {
            Some(name) => node = name,
            None => break,
        }
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn collect(source: &str, dialect: Dialect) -> Vec<(String, CursorKind)> {
        let unit = parse_source("test", source, dialect).unwrap();
        let mut seen = Vec::new();
        unit.visit(|cursor| {
            seen.push((cursor.name().to_string(), cursor.kind()));
            VisitResult::Continue
        });
        seen
    }

    #[test]
    fn test_function_declaration_accessors() {
        let unit = parse_source("t.h", "unsigned long hash(const char *key, int len);", Dialect::C)
            .unwrap();
        let mut checked = false;
        unit.visit(|cursor| {
            assert_eq!(cursor.kind(), CursorKind::FunctionDecl);
            assert_eq!(cursor.name(), "hash");
            assert_eq!(cursor.result_type().map(|t| t.kind()), Some(TypeKind::ULong));
            assert_eq!(cursor.argument_count(), 2);
            assert_eq!(cursor.argument_name(0), Some("key"));
            let key = cursor.argument_type(0).unwrap();
            assert_eq!(key.kind(), TypeKind::Pointer);
            assert_eq!(key.pointee().map(|p| p.kind()), Some(TypeKind::CharS));
            assert_eq!(cursor.argument_type(1).map(|t| t.kind()), Some(TypeKind::Int));
            assert!(!cursor.is_variadic());
            assert_eq!(cursor.location().line, 1);
            checked = true;
            VisitResult::Continue
        });
        assert!(checked);
    }

    #[test]
    fn test_void_parameter_list_is_empty() {
        let unit = parse_source("t.h", "int rand(void);", Dialect::C).unwrap();
        unit.visit(|cursor| {
            assert_eq!(cursor.argument_count(), 0);
            assert_eq!(cursor.ty().kind(), TypeKind::FunctionProto);
            VisitResult::Continue
        });
    }

    #[test]
    fn test_empty_c_parameter_list_has_no_prototype() {
        let unit = parse_source("t.h", "int legacy();", Dialect::C).unwrap();
        unit.visit(|cursor| {
            assert_eq!(cursor.ty().kind(), TypeKind::FunctionNoProto);
            assert_eq!(cursor.argument_count(), 0);
            assert!(!cursor.is_variadic());
            VisitResult::Continue
        });
    }

    #[test]
    fn test_variadic_detection() {
        let unit = parse_source("t.h", "int printf(const char *fmt, ...);", Dialect::C).unwrap();
        unit.visit(|cursor| {
            assert!(cursor.is_variadic());
            assert_eq!(cursor.argument_count(), 1);
            VisitResult::Continue
        });
    }

    #[test]
    fn test_function_pointer_variable_is_not_a_function() {
        let seen = collect("int (*handler)(int);", Dialect::C);
        assert_eq!(seen, vec![("handler".to_string(), CursorKind::VarDecl)]);
    }

    #[test]
    fn test_multiple_declarators() {
        let seen = collect("int a(int), b(void), c;", Dialect::C);
        assert_eq!(
            seen,
            vec![
                ("a".to_string(), CursorKind::FunctionDecl),
                ("b".to_string(), CursorKind::FunctionDecl),
                ("c".to_string(), CursorKind::VarDecl),
            ]
        );
    }

    #[test]
    fn test_typedef_and_struct_fields() {
        let source = indoc! {"
            typedef int handle_t;
            struct ops {
                int (*open)(const char *path);
                int flags;
            };
        "};
        let seen = collect(source, Dialect::C);
        assert_eq!(
            seen,
            vec![
                ("handle_t".to_string(), CursorKind::TypedefDecl),
                ("open".to_string(), CursorKind::FieldDecl),
                ("flags".to_string(), CursorKind::FieldDecl),
            ]
        );
    }

    #[test]
    fn test_cpp_methods_and_special_members() {
        let source = indoc! {"
            class Widget {
            public:
                Widget(int id);
                ~Widget();
                int id() const;
                static double scale(double factor);
            };
            int Widget::id() const { return 0; }
        "};
        let seen = collect(source, Dialect::Cpp);
        assert_eq!(
            seen,
            vec![
                ("Widget".to_string(), CursorKind::Constructor),
                ("~Widget".to_string(), CursorKind::Destructor),
                ("id".to_string(), CursorKind::CxxMethod),
                ("scale".to_string(), CursorKind::CxxMethod),
                ("id".to_string(), CursorKind::CxxMethod),
            ]
        );
    }

    #[test]
    fn test_function_template_is_not_function_decl() {
        let seen = collect("template <typename T> T identity(T value);", Dialect::Cpp);
        assert_eq!(
            seen,
            vec![("identity".to_string(), CursorKind::FunctionTemplate)]
        );
    }

    #[test]
    fn test_visit_stops_when_asked() {
        let unit = parse_source("t.h", "int a(void); int b(void);", Dialect::C).unwrap();
        let mut names = Vec::new();
        let result = unit.visit(|cursor| {
            names.push(cursor.name().to_string());
            VisitResult::Stop
        });
        assert_eq!(result, VisitResult::Stop);
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_deep_pointer_parameter_collapses_and_siblings_survive() {
        let source = format!("int deep(int {}p);\nint ok(int a);\n", "*".repeat(100_000));
        let unit = parse_source("t.h", source, Dialect::C).unwrap();
        let mut seen = Vec::new();
        unit.visit(|cursor| {
            if cursor.name() == "deep" {
                let param = cursor.argument_type(0).unwrap();
                assert_eq!(param.kind(), TypeKind::Unexposed);
                assert!(param.spelling().len() < 64);
            }
            seen.push((cursor.name().to_string(), cursor.kind()));
            VisitResult::Continue
        });
        assert_eq!(
            seen,
            vec![
                ("deep".to_string(), CursorKind::FunctionDecl),
                ("ok".to_string(), CursorKind::FunctionDecl),
            ]
        );
    }

    #[test]
    fn test_deep_function_declarators_keep_a_function_cursor() {
        let levels = MAX_DECLARATOR_NESTING;
        let source = format!("int {}f(int){};", "(*".repeat(levels), ")(int)".repeat(levels));
        let unit = parse_source("t.h", source, Dialect::C).unwrap();
        let mut checked = false;
        unit.visit(|cursor| {
            assert_eq!(cursor.name(), "f");
            assert_eq!(cursor.kind(), CursorKind::FunctionDecl);
            assert_eq!(cursor.result_type().map(|t| t.kind()), Some(TypeKind::Unexposed));
            checked = true;
            VisitResult::Continue
        });
        assert!(checked);
    }

    #[test]
    fn test_nesting_below_the_limit_is_resolved() {
        let source = format!("int shallow(int {}p);", "*".repeat(MAX_DECLARATOR_NESTING - 1));
        let unit = parse_source("t.h", source, Dialect::C).unwrap();
        unit.visit(|cursor| {
            let mut ty = cursor.argument_type(0).unwrap();
            let mut pointers = 0;
            while let Some(inner) = ty.pointee() {
                pointers += 1;
                ty = inner;
            }
            assert_eq!(pointers, MAX_DECLARATOR_NESTING - 1);
            assert_eq!(ty.kind(), TypeKind::Int);
            VisitResult::Continue
        });
    }

    #[test]
    fn test_parse_missing_file_fails() {
        let err = parse(Path::new("/definitely/not/here.h"), None)
            .err()
            .expect("missing file should not parse");
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_declaration_count() {
        let unit = parse_source("t.h", "int a; int f(int); struct s { int x; };", Dialect::C)
            .unwrap();
        assert_eq!(unit.declaration_count(), 3);
    }
}
