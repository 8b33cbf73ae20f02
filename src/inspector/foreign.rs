//! Foreign (C-side) type descriptors.
//!
//! Kinds follow the vocabulary of a C compiler front end rather than the
//! syntax they were written in: `unsigned long int` and `long unsigned` are
//! both [`TypeKind::ULong`], `const` and other qualifiers are dropped.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Void,
    Bool,
    /// Plain `char` (signed on the targets this tool assumes).
    CharS,
    /// Explicit `signed char`.
    SChar,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Float,
    Double,
    LongDouble,
    Pointer,
    LValueReference,
    RValueReference,
    Record,
    Enum,
    Typedef,
    FunctionProto,
    FunctionNoProto,
    Array,
    Auto,
    Unexposed,
}

impl TypeKind {
    pub fn is_character(self) -> bool {
        matches!(self, Self::CharS | Self::SChar | Self::UChar)
    }

    pub fn is_function(self) -> bool {
        matches!(self, Self::FunctionProto | Self::FunctionNoProto)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Void => "Void",
            Self::Bool => "Bool",
            Self::CharS => "Char_S",
            Self::SChar => "SChar",
            Self::UChar => "UChar",
            Self::Short => "Short",
            Self::UShort => "UShort",
            Self::Int => "Int",
            Self::UInt => "UInt",
            Self::Long => "Long",
            Self::ULong => "ULong",
            Self::LongLong => "LongLong",
            Self::ULongLong => "ULongLong",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::LongDouble => "LongDouble",
            Self::Pointer => "Pointer",
            Self::LValueReference => "LValueReference",
            Self::RValueReference => "RValueReference",
            Self::Record => "Record",
            Self::Enum => "Enum",
            Self::Typedef => "Typedef",
            Self::FunctionProto => "FunctionProto",
            Self::FunctionNoProto => "FunctionNoProto",
            Self::Array => "Array",
            Self::Auto => "Auto",
            Self::Unexposed => "Unexposed",
        };
        f.write_str(name)
    }
}

/// Result and parameter types of a function type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub result: ForeignType,
    pub params: Vec<ForeignType>,
    pub variadic: bool,
}

/// A C type as seen by the inspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignType {
    kind: TypeKind,
    spelling: String,
    pointee: Option<Box<ForeignType>>,
    function: Option<Box<FunctionType>>,
}

impl ForeignType {
    pub fn new(kind: TypeKind, spelling: impl Into<String>) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            pointee: None,
            function: None,
        }
    }

    pub fn pointer(pointee: ForeignType) -> Self {
        Self::wrapping(TypeKind::Pointer, format!("{} *", pointee.spelling), pointee)
    }

    pub fn lvalue_reference(pointee: ForeignType) -> Self {
        Self::wrapping(
            TypeKind::LValueReference,
            format!("{} &", pointee.spelling),
            pointee,
        )
    }

    pub fn rvalue_reference(pointee: ForeignType) -> Self {
        Self::wrapping(
            TypeKind::RValueReference,
            format!("{} &&", pointee.spelling),
            pointee,
        )
    }

    pub fn array(element: ForeignType) -> Self {
        Self::wrapping(TypeKind::Array, format!("{}[]", element.spelling), element)
    }

    pub fn function(result: ForeignType, params: Vec<ForeignType>, variadic: bool) -> Self {
        Self::function_of_kind(TypeKind::FunctionProto, result, params, variadic)
    }

    pub fn function_no_proto(result: ForeignType) -> Self {
        Self::function_of_kind(TypeKind::FunctionNoProto, result, Vec::new(), false)
    }

    fn function_of_kind(
        kind: TypeKind,
        result: ForeignType,
        params: Vec<ForeignType>,
        variadic: bool,
    ) -> Self {
        let mut args: Vec<&str> = params.iter().map(|p| p.spelling.as_str()).collect();
        if variadic {
            args.push("...");
        }
        let spelling = format!("{} ({})", result.spelling, args.join(", "));
        Self {
            kind,
            spelling,
            pointee: None,
            function: Some(Box::new(FunctionType {
                result,
                params,
                variadic,
            })),
        }
    }

    fn wrapping(kind: TypeKind, spelling: String, inner: ForeignType) -> Self {
        Self {
            kind,
            spelling,
            pointee: Some(Box::new(inner)),
            function: None,
        }
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Source-like spelling used in diagnostics.
    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    /// Pointee of pointer and reference kinds, element of arrays.
    pub fn pointee(&self) -> Option<&ForeignType> {
        self.pointee.as_deref()
    }

    pub fn function_type(&self) -> Option<&FunctionType> {
        self.function.as_deref()
    }

    pub fn result_type(&self) -> Option<&ForeignType> {
        self.function_type().map(|f| &f.result)
    }

    /// Parameter adjustment: arrays and functions decay to pointers.
    pub fn decayed(self) -> Self {
        match self.kind {
            TypeKind::Array => match self.pointee {
                Some(element) => Self::pointer(*element),
                None => self,
            },
            kind if kind.is_function() => Self::pointer(self),
            _ => self,
        }
    }
}

impl fmt::Display for ForeignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` ({})", self.spelling, self.kind)
    }
}
