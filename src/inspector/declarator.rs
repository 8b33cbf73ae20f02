//! Turning declaration specifiers and declarators into foreign types.
//!
//! C declarators read inside-out: `int *(*f)(char)` wraps `int` in a
//! pointer, then a function, then another pointer before reaching the name.
//! [`DeclaratorResolver::resolve`] walks the declarator chain from the
//! outside in, wrapping the specifier type at each step, so the type in hand
//! when the name is reached is the declared entity's type.
//!
//! Nesting is bounded by [`MAX_DECLARATOR_NESTING`]. Past it the type
//! collapses to an `Unexposed` placeholder, so a pathological declarator
//! yields one unresolved declaration instead of an unbounded type chain.

use super::dialect::Dialect;
use super::foreign::{ForeignType, TypeKind};
use tree_sitter::Node;

/// Pointer, reference, array and function layers kept per declaration.
pub const MAX_DECLARATOR_NESTING: usize = 256;

const NESTED_TOO_DEEPLY: &str = "<declarator nested too deeply>";

/// One parameter of a function declarator.
#[derive(Debug, Clone)]
pub struct ParamDecl<'a> {
    pub name: Option<&'a str>,
    pub ty: ForeignType,
}

/// The outcome of applying a declarator to a specifier type.
#[derive(Debug, Clone)]
pub(crate) struct Declared<'a> {
    /// Innermost name node, if the declarator is not abstract.
    pub name: Option<Node<'a>>,
    pub ty: ForeignType,
    /// Parameters of the function declarator closest to the name.
    pub params: Vec<ParamDecl<'a>>,
}

pub(crate) struct DeclaratorResolver<'a> {
    source: &'a str,
    dialect: Dialect,
}

impl<'a> DeclaratorResolver<'a> {
    pub fn new(source: &'a str, dialect: Dialect) -> Self {
        Self { source, dialect }
    }

    pub fn text(&self, node: Node<'a>) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    /// Type named by the `type` field of a declaration-like node.
    pub fn specifier_type(&self, decl: Node<'a>) -> Option<ForeignType> {
        decl.child_by_field_name("type").map(|ty| self.base_type(ty))
    }

    fn base_type(&self, node: Node<'a>) -> ForeignType {
        let spelling = self.text(node);
        let kind = match node.kind() {
            "primitive_type" | "sized_type_specifier" => kind_from_words(spelling),
            "type_identifier" if spelling == "_Bool" => TypeKind::Bool,
            "type_identifier" | "qualified_identifier" | "template_type" => TypeKind::Typedef,
            "struct_specifier" | "union_specifier" | "class_specifier" => TypeKind::Record,
            "enum_specifier" => TypeKind::Enum,
            "placeholder_type_specifier" | "auto" => TypeKind::Auto,
            _ => TypeKind::Unexposed,
        };
        ForeignType::new(kind, spelling)
    }

    /// Apply `declarator` to `base`, returning the declared name and type.
    pub fn resolve(&self, declarator: Option<Node<'a>>, base: ForeignType) -> Declared<'a> {
        self.resolve_nested(declarator, base, 0)
    }

    /// `depth` counts the layers already applied by enclosing declarators,
    /// so parameters of nested function declarators share one budget.
    fn resolve_nested(
        &self,
        declarator: Option<Node<'a>>,
        base: ForeignType,
        mut depth: usize,
    ) -> Declared<'a> {
        let mut ty = base;
        let mut params = Vec::new();
        let mut current = declarator;

        while let Some(node) = current {
            current = match node.kind() {
                "pointer_declarator" | "abstract_pointer_declarator" => {
                    ty = nest(&mut depth, ty, ForeignType::pointer);
                    node.child_by_field_name("declarator")
                }
                "reference_declarator" | "abstract_reference_declarator" => {
                    ty = if has_token(node, "&&") {
                        nest(&mut depth, ty, ForeignType::rvalue_reference)
                    } else {
                        nest(&mut depth, ty, ForeignType::lvalue_reference)
                    };
                    last_named_child(node)
                }
                "array_declarator" | "abstract_array_declarator" => {
                    ty = nest(&mut depth, ty, ForeignType::array);
                    node.child_by_field_name("declarator")
                }
                "function_declarator" | "abstract_function_declarator" => {
                    depth += 1;
                    if depth > MAX_DECLARATOR_NESTING {
                        ty = ForeignType::function_no_proto(nested_too_deeply());
                        params = Vec::new();
                    } else {
                        let (function, declared_params) = self.function_type(node, ty, depth);
                        ty = function;
                        params = declared_params;
                    }
                    node.child_by_field_name("declarator")
                }
                "init_declarator" => node.child_by_field_name("declarator"),
                "parenthesized_declarator"
                | "abstract_parenthesized_declarator"
                | "attributed_declarator" => first_declarator_child(node),
                _ => {
                    return Declared {
                        name: Some(node),
                        ty,
                        params,
                    }
                }
            };
        }

        Declared {
            name: None,
            ty,
            params,
        }
    }

    fn function_type(
        &self,
        declarator: Node<'a>,
        result: ForeignType,
        depth: usize,
    ) -> (ForeignType, Vec<ParamDecl<'a>>) {
        let Some(list) = declarator.child_by_field_name("parameters") else {
            return (ForeignType::function_no_proto(result), Vec::new());
        };

        let mut params = Vec::new();
        let mut variadic = false;
        let mut saw_entry = false;
        let mut walker = list.walk();
        for child in list.children(&mut walker) {
            match child.kind() {
                "parameter_declaration" | "optional_parameter_declaration" => {
                    saw_entry = true;
                    params.push(self.parameter(child, depth));
                }
                "variadic_parameter_declaration" => {
                    saw_entry = true;
                    let name = child
                        .child_by_field_name("declarator")
                        .map(|d| self.text(d));
                    params.push(ParamDecl {
                        name,
                        ty: ForeignType::new(TypeKind::Unexposed, self.text(child)),
                    });
                }
                "variadic_parameter" | "..." => {
                    saw_entry = true;
                    variadic = true;
                }
                _ => {}
            }
        }

        if is_void_list(&params) {
            params.clear();
        }

        // An empty C parameter list declares a function without a prototype.
        if !saw_entry && self.dialect == Dialect::C {
            return (ForeignType::function_no_proto(result), params);
        }

        let types = params.iter().map(|p| p.ty.clone()).collect();
        (ForeignType::function(result, types, variadic), params)
    }

    fn parameter(&self, node: Node<'a>, depth: usize) -> ParamDecl<'a> {
        let base = self
            .specifier_type(node)
            .unwrap_or_else(|| ForeignType::new(TypeKind::Unexposed, self.text(node)));
        let declared = self.resolve_nested(node.child_by_field_name("declarator"), base, depth);
        ParamDecl {
            name: declared.name.map(|n| self.text(n)).filter(|n| !n.is_empty()),
            ty: declared.ty.decayed(),
        }
    }
}

/// Wrap `ty` one layer deeper, or collapse it once the budget is spent.
fn nest(
    depth: &mut usize,
    ty: ForeignType,
    wrap: impl FnOnce(ForeignType) -> ForeignType,
) -> ForeignType {
    *depth += 1;
    if *depth > MAX_DECLARATOR_NESTING {
        nested_too_deeply()
    } else {
        wrap(ty)
    }
}

fn nested_too_deeply() -> ForeignType {
    ForeignType::new(TypeKind::Unexposed, NESTED_TOO_DEEPLY)
}

/// Kind of a builtin written as a sequence of keywords (`unsigned long int`).
pub(crate) fn kind_from_words(spelling: &str) -> TypeKind {
    let mut signed = false;
    let mut unsigned = false;
    let mut longs = 0;
    let mut short = false;
    let mut base = None;

    for word in spelling.split_whitespace() {
        match word {
            "signed" => signed = true,
            "unsigned" => unsigned = true,
            "long" => longs += 1,
            "short" => short = true,
            other => base = Some(other),
        }
    }

    match base {
        Some("void") => TypeKind::Void,
        Some("bool") | Some("_Bool") => TypeKind::Bool,
        Some("char") if unsigned => TypeKind::UChar,
        Some("char") if signed => TypeKind::SChar,
        Some("char") => TypeKind::CharS,
        Some("float") => TypeKind::Float,
        Some("double") if longs > 0 => TypeKind::LongDouble,
        Some("double") => TypeKind::Double,
        None | Some("int") => integer_kind(unsigned, short, longs),
        Some(_) => TypeKind::Typedef,
    }
}

fn integer_kind(unsigned: bool, short: bool, longs: usize) -> TypeKind {
    match (unsigned, short, longs) {
        (false, true, _) => TypeKind::Short,
        (true, true, _) => TypeKind::UShort,
        (false, false, 0) => TypeKind::Int,
        (true, false, 0) => TypeKind::UInt,
        (false, false, 1) => TypeKind::Long,
        (true, false, 1) => TypeKind::ULong,
        (false, false, _) => TypeKind::LongLong,
        (true, false, _) => TypeKind::ULongLong,
    }
}

/// `(void)` is an empty parameter list, not one `void` parameter.
fn is_void_list(params: &[ParamDecl<'_>]) -> bool {
    matches!(params, [only] if only.name.is_none() && only.ty.kind() == TypeKind::Void)
}

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut walker = node.walk();
    let found = node.children(&mut walker).any(|c| c.kind() == token);
    found
}

fn last_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let count = node.named_child_count();
    if count == 0 {
        None
    } else {
        node.named_child(count - 1)
    }
}

fn first_declarator_child(node: Node<'_>) -> Option<Node<'_>> {
    if let Some(inner) = node.child_by_field_name("declarator") {
        return Some(inner);
    }
    let mut walker = node.walk();
    let found = node
        .named_children(&mut walker)
        .find(|c| !matches!(c.kind(), "attribute_specifier" | "attribute_declaration" | "comment"));
    found
}
