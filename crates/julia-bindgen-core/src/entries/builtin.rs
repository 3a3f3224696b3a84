//! Builtin type entry.

use crate::{BuiltinKind, Marshaling};

/// Registry entry for a builtin type.
///
/// Builtins have no members, just a kind and the marshaling used for them at
/// the call boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinEntry {
    pub kind: BuiltinKind,
    pub marshaling: Marshaling,
}

impl BuiltinEntry {
    pub fn new(kind: BuiltinKind, marshaling: Marshaling) -> Self {
        Self { kind, marshaling }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn target_name(&self) -> &'static str {
        self.kind.target_name()
    }
}
