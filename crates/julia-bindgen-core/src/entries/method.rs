//! Method entries.
//!
//! This module provides `MethodEntry` for bound methods together with their
//! arguments and synthesized default values.

use crate::naming::escape_julia_keyword;
use crate::{HostValue, TypeRef};

/// A default argument value.
///
/// Keeps the host value next to the literal synthesized from it, so errors
/// and documentation can refer to the original.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultValue {
    pub value: HostValue,
    /// Julia source literal.
    pub literal: String,
}

impl DefaultValue {
    pub fn new(value: HostValue, literal: impl Into<String>) -> Self {
        Self {
            value,
            literal: literal.into(),
        }
    }
}

/// A method argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentEntry {
    pub name: String,
    pub target_name: String,
    pub type_ref: TypeRef,
    pub default: Option<DefaultValue>,
}

impl ArgumentEntry {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        let name = name.into();
        Self {
            target_name: escape_julia_keyword(&name),
            name,
            type_ref,
            default: None,
        }
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Registry entry for a bound method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodEntry {
    /// Host method name, also the interned name used to look up the bind.
    pub name: String,
    /// Julia routine name.
    pub target_name: String,

    // === Flags ===
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_vararg: bool,

    // === Signature ===
    pub return_type: TypeRef,
    pub arguments: Vec<ArgumentEntry>,

    pub doc: Option<String>,
}

impl MethodEntry {
    /// Create a method returning `return_type` with no arguments.
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        let name = name.into();
        Self {
            target_name: escape_julia_keyword(&name),
            name,
            is_static: false,
            is_virtual: false,
            is_vararg: false,
            return_type,
            arguments: Vec::new(),
            doc: None,
        }
    }

    // === Builder Methods ===

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_virtual(mut self, is_virtual: bool) -> Self {
        self.is_virtual = is_virtual;
        self
    }

    pub fn with_vararg(mut self, is_vararg: bool) -> Self {
        self.is_vararg = is_vararg;
        self
    }

    pub fn with_argument(mut self, argument: ArgumentEntry) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    // === Queries ===

    /// Whether the method is bound at all.
    pub fn is_bindable(&self) -> bool {
        !self.is_static && !self.is_virtual && !self.is_vararg
    }
}
