//! Function signature builder.
//!
//! Builds one [`FunctionTypeNode`] from one function-like cursor, or rejects
//! the whole declaration. There is no partial result: a single unmappable
//! parameter drops the declaration.

use super::type_mapper::TypeMapper;
use crate::core::{CanonicalType, Diagnostic, DiagnosticKind, FunctionSignature, ParamSpec};
use crate::inspector::{Cursor, ForeignType, TypeKind};
use crate::target::{FunctionTypeNode, TypeAnnotation, TypeRegistry};
use std::fmt;
use thiserror::Error;

/// Where in a signature a type appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypePosition {
    Return,
    Parameter { index: usize, name: Option<String> },
}

impl fmt::Display for TypePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Return => write!(f, "return type"),
            Self::Parameter {
                index,
                name: Some(name),
            } => write!(f, "type of parameter {index} `{name}`"),
            Self::Parameter { index, name: None } => write!(f, "type of parameter {index}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("`{function}` has no function type")]
    NotAFunction { function: String },

    #[error("no mapping for {position} {foreign} of function `{function}`")]
    UnresolvedType {
        function: String,
        position: TypePosition,
        foreign: String,
    },

    #[error("referee {referee} of {position} {foreign} of function `{function}` has no mapping")]
    UnresolvedReferee {
        function: String,
        position: TypePosition,
        foreign: String,
        referee: String,
    },

    #[error("no target type symbol for {position} `{canonical}` of function `{function}`")]
    MissingTypeSymbol {
        function: String,
        position: TypePosition,
        canonical: CanonicalType,
    },
}

impl BuildError {
    pub fn function(&self) -> &str {
        match self {
            Self::NotAFunction { function }
            | Self::UnresolvedType { function, .. }
            | Self::UnresolvedReferee { function, .. }
            | Self::MissingTypeSymbol { function, .. } => function,
        }
    }

    pub fn diagnostic_kind(&self) -> DiagnosticKind {
        match self {
            Self::NotAFunction { .. } | Self::UnresolvedType { .. } => {
                DiagnosticKind::UnresolvedType
            }
            Self::UnresolvedReferee { .. } => DiagnosticKind::UnresolvedReferee,
            Self::MissingTypeSymbol { .. } => DiagnosticKind::MissingTypeSymbol,
        }
    }

    pub fn into_diagnostic(self, line: usize) -> Diagnostic {
        Diagnostic::for_declaration(
            self.diagnostic_kind(),
            self.function().to_string(),
            line,
            self.to_string(),
        )
    }
}

pub struct SignatureBuilder<'r> {
    mapper: TypeMapper,
    registry: &'r TypeRegistry,
}

impl<'r> SignatureBuilder<'r> {
    pub fn new(mapper: TypeMapper, registry: &'r TypeRegistry) -> Self {
        Self { mapper, registry }
    }

    pub fn build(&self, cursor: &Cursor<'_>) -> Result<FunctionTypeNode, BuildError> {
        let name = cursor.name().to_string();

        let result = cursor
            .result_type()
            .ok_or_else(|| BuildError::NotAFunction {
                function: name.clone(),
            })?;
        let return_type = self.resolve(&name, TypePosition::Return, result)?;

        let mut parameters = Vec::with_capacity(cursor.argument_count());
        for index in 0..cursor.argument_count() {
            let declared_name = cursor.argument_name(index).filter(|n| !n.is_empty());
            let position = TypePosition::Parameter {
                index,
                name: declared_name.map(str::to_string),
            };
            let foreign = cursor
                .argument_type(index)
                .ok_or_else(|| BuildError::UnresolvedType {
                    function: name.clone(),
                    position: position.clone(),
                    foreign: "<missing>".to_string(),
                })?;
            let ty = self.resolve(&name, position, foreign)?;
            let param_name = declared_name
                .map(str::to_string)
                .unwrap_or_else(|| ParamSpec::synthesized_name(index));
            parameters.push(ParamSpec::new(param_name, ty));
        }

        let return_annotation = self.annotate(&name, TypePosition::Return, &return_type)?;
        let parameter_annotations = parameters
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let position = TypePosition::Parameter {
                    index,
                    name: Some(param.name.clone()),
                };
                self.annotate(&name, position, &param.ty)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FunctionTypeNode {
            signature: FunctionSignature {
                name,
                parameters,
                return_type,
                is_variadic: cursor.is_variadic(),
            },
            return_annotation,
            parameter_annotations,
            is_extern: true,
            line: cursor.location().line,
            analysis: None,
        })
    }

    fn resolve(
        &self,
        function: &str,
        position: TypePosition,
        foreign: &ForeignType,
    ) -> Result<CanonicalType, BuildError> {
        let ty = self.mapper.classify(foreign);
        if ty.is_resolved() {
            return Ok(ty);
        }
        match ty {
            CanonicalType::Reference(_) => Err(BuildError::UnresolvedReferee {
                function: function.to_string(),
                position,
                foreign: foreign.to_string(),
                referee: self.describe_referee(foreign),
            }),
            _ => Err(BuildError::UnresolvedType {
                function: function.to_string(),
                position,
                foreign: foreign.to_string(),
            }),
        }
    }

    fn describe_referee(&self, foreign: &ForeignType) -> String {
        let mut current = foreign;
        let mut depth = 0;
        while current.kind() == TypeKind::Pointer {
            match current.pointee() {
                Some(pointee) => current = pointee,
                None => return "<opaque>".to_string(),
            }
            depth += 1;
        }
        if depth > self.mapper.max_pointer_depth() {
            format!(
                "{current} (nested deeper than {} pointers)",
                self.mapper.max_pointer_depth()
            )
        } else {
            current.to_string()
        }
    }

    fn annotate(
        &self,
        function: &str,
        position: TypePosition,
        ty: &CanonicalType,
    ) -> Result<TypeAnnotation, BuildError> {
        TypeAnnotation::for_type(ty, self.registry).ok_or_else(|| BuildError::MissingTypeSymbol {
            function: function.to_string(),
            position,
            canonical: ty.clone(),
        })
    }
}
