use crate::core::CanonicalKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque handle of a target-language type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeHandle(u32);

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct TypeEntry {
    kind: CanonicalKind,
    symbol: String,
}

/// Registry of the target language's builtin types.
///
/// `Reference` is registered as the `&` type constructor. `Unknown` never
/// has a handle.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    entries: Vec<TypeEntry>,
    by_kind: HashMap<CanonicalKind, TypeHandle>,
}

const BUILTINS: &[(CanonicalKind, &str)] = &[
    (CanonicalKind::Unit, "()"),
    (CanonicalKind::Bool, "bool"),
    (CanonicalKind::Int, "int"),
    (CanonicalKind::U64, "u64"),
    (CanonicalKind::F64, "f64"),
    (CanonicalKind::Char, "char"),
    (CanonicalKind::String, "string"),
    (CanonicalKind::Reference, "&"),
];

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TypeRegistry {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            by_kind: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        BUILTINS
            .iter()
            .fold(Self::empty(), |mut registry, (kind, symbol)| {
                registry.register(*kind, *symbol);
                registry
            })
    }

    /// Register (or re-register) the symbol for a canonical kind.
    pub fn register(&mut self, kind: CanonicalKind, symbol: impl Into<String>) -> Option<TypeHandle> {
        if kind == CanonicalKind::Unknown {
            return None;
        }
        let symbol = symbol.into();
        if let Some(&handle) = self.by_kind.get(&kind) {
            self.entries[handle.0 as usize].symbol = symbol;
            return Some(handle);
        }
        let handle = TypeHandle(self.entries.len() as u32);
        self.entries.push(TypeEntry { kind, symbol });
        self.by_kind.insert(kind, handle);
        Some(handle)
    }

    pub fn internal_type_for(&self, kind: CanonicalKind) -> Option<TypeHandle> {
        self.by_kind.get(&kind).copied()
    }

    pub fn symbol_for(&self, handle: TypeHandle) -> Option<&str> {
        self.entries
            .get(handle.0 as usize)
            .map(|entry| entry.symbol.as_str())
    }

    pub fn kind_of(&self, handle: TypeHandle) -> Option<CanonicalKind> {
        self.entries.get(handle.0 as usize).map(|entry| entry.kind)
    }

    /// Shorthand for `internal_type_for` followed by `symbol_for`.
    pub fn symbol_of(&self, kind: CanonicalKind) -> Option<&str> {
        self.internal_type_for(kind)
            .and_then(|handle| self.symbol_for(handle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_symbols() {
        let registry = TypeRegistry::builtin();
        assert_eq!(registry.symbol_of(CanonicalKind::Int), Some("int"));
        assert_eq!(registry.symbol_of(CanonicalKind::Unit), Some("()"));
        assert_eq!(registry.symbol_of(CanonicalKind::String), Some("string"));
        assert_eq!(registry.symbol_of(CanonicalKind::Reference), Some("&"));
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_unknown_has_no_handle() {
        let mut registry = TypeRegistry::builtin();
        assert_eq!(registry.internal_type_for(CanonicalKind::Unknown), None);
        assert_eq!(registry.register(CanonicalKind::Unknown, "?"), None);
    }

    #[test]
    fn test_handle_round_trips_kind() {
        let registry = TypeRegistry::builtin();
        let handle = registry.internal_type_for(CanonicalKind::F64).unwrap();
        assert_eq!(registry.kind_of(handle), Some(CanonicalKind::F64));
    }

    #[test]
    fn test_reregister_keeps_handle() {
        let mut registry = TypeRegistry::builtin();
        let before = registry.internal_type_for(CanonicalKind::U64);
        let after = registry.register(CanonicalKind::U64, "ulong");
        assert_eq!(before, after);
        assert_eq!(registry.symbol_of(CanonicalKind::U64), Some("ulong"));
    }
}
