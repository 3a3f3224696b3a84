//! TypeEntry enum for unified type storage.
//!
//! This module provides `TypeEntry`, a single enum wrapping the three kinds of
//! type the registry resolves references to.

use crate::Marshaling;

use super::{BuiltinEntry, ClassEntry, EnumTypeEntry};

/// Kind of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Builtin,
    Enum,
    Object,
}

/// Unified type entry for registry storage.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeEntry {
    /// Builtin scalar or value type.
    Builtin(BuiltinEntry),
    /// Companion type of an enum or bit-field.
    Enum(EnumTypeEntry),
    /// Object type.
    Class(ClassEntry),
}

impl TypeEntry {
    /// Host name (registry key).
    pub fn name(&self) -> &str {
        match self {
            TypeEntry::Builtin(e) => e.name(),
            TypeEntry::Enum(e) => &e.name,
            TypeEntry::Class(e) => &e.name,
        }
    }

    /// Julia type name.
    pub fn target_name(&self) -> &str {
        match self {
            TypeEntry::Builtin(e) => e.target_name(),
            TypeEntry::Enum(e) => &e.target_name,
            TypeEntry::Class(e) => &e.target_name,
        }
    }

    pub fn marshaling(&self) -> &Marshaling {
        match self {
            TypeEntry::Builtin(e) => &e.marshaling,
            TypeEntry::Enum(e) => &e.marshaling,
            TypeEntry::Class(e) => &e.marshaling,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeEntry::Builtin(_) => TypeKind::Builtin,
            TypeEntry::Enum(_) => TypeKind::Enum,
            TypeEntry::Class(_) => TypeKind::Object,
        }
    }

    /// Annotation used for a parameter of this type.
    ///
    /// Object parameters use the abstract tag so subclasses are accepted.
    pub fn parameter_annotation(&self) -> String {
        match self {
            TypeEntry::Class(e) => e.abstract_name(),
            _ => self.target_name().to_string(),
        }
    }

    // === Type Checks ===

    pub fn is_void(&self) -> bool {
        matches!(self, TypeEntry::Builtin(e) if e.kind.is_void())
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, TypeEntry::Builtin(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, TypeEntry::Enum(_))
    }

    pub fn is_class(&self) -> bool {
        matches!(self, TypeEntry::Class(_))
    }

    // === Downcasting ===

    pub fn as_builtin(&self) -> Option<&BuiltinEntry> {
        match self {
            TypeEntry::Builtin(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumTypeEntry> {
        match self {
            TypeEntry::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassEntry> {
        match self {
            TypeEntry::Class(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BuiltinEntry> for TypeEntry {
    fn from(entry: BuiltinEntry) -> Self {
        TypeEntry::Builtin(entry)
    }
}

impl From<EnumTypeEntry> for TypeEntry {
    fn from(entry: EnumTypeEntry) -> Self {
        TypeEntry::Enum(entry)
    }
}

impl From<ClassEntry> for TypeEntry {
    fn from(entry: ClassEntry) -> Self {
        TypeEntry::Class(entry)
    }
}
