use super::declarator::ParamDecl;
use super::foreign::ForeignType;
use tree_sitter::Node;

/// What a declaration cursor declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorKind {
    /// A free function, declared or defined.
    FunctionDecl,
    /// A member function, in a class body or defined out of line.
    CxxMethod,
    Constructor,
    Destructor,
    ConversionFunction,
    FunctionTemplate,
    VarDecl,
    FieldDecl,
    TypedefDecl,
}

impl CursorKind {
    pub fn is_function_like(self) -> bool {
        matches!(self, Self::FunctionDecl | Self::CxxMethod)
    }
}

/// 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// Borrowed view of one declared entity.
///
/// Cursors only live for the duration of a visit callback; everything they
/// hand out borrows from the translation unit.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    pub(crate) kind: CursorKind,
    pub(crate) name: &'a str,
    pub(crate) ty: ForeignType,
    pub(crate) params: Vec<ParamDecl<'a>>,
    pub(crate) location: Location,
    pub(crate) node: Node<'a>,
}

impl<'a> Cursor<'a> {
    pub fn kind(&self) -> CursorKind {
        self.kind
    }

    /// Declared name, exactly as spelled (unqualified for members).
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Type of the declared entity.
    pub fn ty(&self) -> &ForeignType {
        &self.ty
    }

    pub fn result_type(&self) -> Option<&ForeignType> {
        self.ty.result_type()
    }

    pub fn argument_count(&self) -> usize {
        self.params.len()
    }

    pub fn argument_type(&self, index: usize) -> Option<&ForeignType> {
        self.params.get(index).map(|p| &p.ty)
    }

    /// Declared parameter name, `None` for unnamed parameters.
    pub fn argument_name(&self, index: usize) -> Option<&'a str> {
        self.params.get(index).and_then(|p| p.name)
    }

    pub fn is_variadic(&self) -> bool {
        self.ty.function_type().is_some_and(|f| f.variadic)
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// The declaration node the cursor was derived from.
    pub fn node(&self) -> Node<'a> {
        self.node
    }
}
