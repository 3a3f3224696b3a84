//! TypeRegistry - the three type maps of one generation run.
//!
//! This module provides [`TypeRegistry`], which owns every type entry the
//! emitter can refer to:
//!
//! - **Builtins**: the fixed allow-list, filled once from a static table
//! - **Enums**: companion entries for every populated enum
//! - **Classes**: object types, inserted parent-first
//!
//! References between entries are by host name, so a [`TypeRef`] is resolved
//! against the registry only when it is needed.
//!
//! # Thread Safety
//!
//! The registry is owned by a single generation run and is not shared. It is
//! filled during population and only read afterwards.
//!
//! # Example
//!
//! ```
//! use julia_bindgen_registry::TypeRegistry;
//! use julia_bindgen_core::TypeRef;
//!
//! let registry = TypeRegistry::with_builtins();
//! let int = registry.resolve(&TypeRef::new("int")).unwrap();
//! assert_eq!(int.target_name(), "Int32");
//! ```

use rustc_hash::FxHashMap;

use julia_bindgen_core::{
    BuiltinEntry, BuiltinKind, ClassEntry, EnumTypeEntry, RegistrationError, TypeEntry, TypeRef,
};

use crate::builtins::builtin_entries;

/// Builtin used for enum references whose enum has no surviving constants.
const EMPTY_ENUM_FALLBACK: &str = "int";

/// Type storage for one generation run.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    builtins: FxHashMap<String, TypeEntry>,
    enums: FxHashMap<String, TypeEntry>,
    classes: FxHashMap<String, TypeEntry>,
    /// Class names in registration order.
    class_order: Vec<String>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all builtins pre-registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register every builtin from the static table.
    pub fn register_builtins(&mut self) {
        for entry in builtin_entries() {
            self.register_builtin(entry);
        }
    }

    /// Register a builtin, replacing any previous entry of the same kind.
    pub fn register_builtin(&mut self, entry: BuiltinEntry) {
        self.builtins
            .insert(entry.name().to_string(), TypeEntry::Builtin(entry));
    }

    /// Register the companion type of an enum.
    pub fn register_enum(&mut self, entry: EnumTypeEntry) -> Result<(), RegistrationError> {
        if self.enums.contains_key(&entry.name) {
            return Err(RegistrationError::DuplicateType(entry.name));
        }
        self.enums.insert(entry.name.clone(), TypeEntry::Enum(entry));
        Ok(())
    }

    /// Register an object type.
    ///
    /// The parent must already be registered; the root has no parent.
    pub fn register_class(&mut self, entry: ClassEntry) -> Result<(), RegistrationError> {
        if self.classes.contains_key(&entry.name) {
            return Err(RegistrationError::DuplicateType(entry.name));
        }
        if let Some(parent) = &entry.parent
            && !self.classes.contains_key(parent)
        {
            return Err(RegistrationError::UnknownParent {
                class: entry.name.clone(),
                parent: parent.clone(),
            });
        }

        self.class_order.push(entry.name.clone());
        self.classes.insert(entry.name.clone(), TypeEntry::Class(entry));
        Ok(())
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Resolve a type reference.
    ///
    /// Builtins are searched first, then classes, then (for enum references)
    /// enums. An enum reference whose enum was never registered falls back
    /// to the 32-bit integer builtin. `None` means the name is unknown.
    pub fn resolve(&self, type_ref: &TypeRef) -> Option<&TypeEntry> {
        if let Some(entry) = self.builtins.get(&type_ref.name) {
            return Some(entry);
        }
        if let Some(entry) = self.classes.get(&type_ref.name) {
            return Some(entry);
        }
        if type_ref.is_enum {
            return self
                .enums
                .get(&type_ref.name)
                .or_else(|| self.builtins.get(EMPTY_ENUM_FALLBACK));
        }
        None
    }

    pub fn builtin(&self, kind: BuiltinKind) -> Option<&BuiltinEntry> {
        self.builtins.get(kind.name()).and_then(TypeEntry::as_builtin)
    }

    pub fn enum_type(&self, name: &str) -> Option<&EnumTypeEntry> {
        self.enums.get(name).and_then(TypeEntry::as_enum)
    }

    pub fn class(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.get(name).and_then(TypeEntry::as_class)
    }

    pub fn contains_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Classes in registration order (parents before children).
    pub fn classes(&self) -> impl Iterator<Item = &ClassEntry> {
        self.class_order.iter().filter_map(|name| self.class(name))
    }

    /// Class names in registration order.
    pub fn class_names(&self) -> &[String] {
        &self.class_order
    }

    /// The class itself followed by its ancestors, up to and including the root.
    pub fn ancestors<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a ClassEntry> + 'a {
        std::iter::successors(self.class(name), move |class| {
            class.parent.as_deref().and_then(|parent| self.class(parent))
        })
    }

    /// Whether `class` is `ancestor` or inherits from it.
    pub fn inherits(&self, class: &str, ancestor: &str) -> bool {
        self.ancestors(class).any(|c| c.name == ancestor)
    }

    // ==========================================================================
    // Counts
    // ==========================================================================

    pub fn builtin_count(&self) -> usize {
        self.builtins.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}
