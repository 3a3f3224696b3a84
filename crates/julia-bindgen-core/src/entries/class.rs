//! Class type entry.
//!
//! This module provides `ClassEntry` for object types exposed by the host
//! class database.

use crate::{ApiType, Marshaling};

use super::{ConstantEntry, EnumEntry, MethodEntry, PropertyEntry};

/// Class-level documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDocumentation {
    pub brief: String,
    pub description: String,
}

/// Registry entry for an object type.
///
/// Objects cross the call boundary as an opaque native handle. The parent is
/// held by host name and resolved through the registry on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassEntry {
    /// Host class name.
    pub name: String,
    /// Julia name of the concrete struct.
    pub target_name: String,
    /// Parent class host name; `None` only for the root.
    pub parent: Option<String>,
    pub api_type: ApiType,

    // === Flags ===
    pub is_singleton: bool,
    pub is_instantiable: bool,
    pub is_ref_counted: bool,

    pub doc: Option<ClassDocumentation>,

    // === Members ===
    pub enums: Vec<EnumEntry>,
    pub constants: Vec<ConstantEntry>,
    pub methods: Vec<MethodEntry>,
    pub properties: Vec<PropertyEntry>,

    pub marshaling: Marshaling,
}

impl ClassEntry {
    /// Create a class entry with no members.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            marshaling: Marshaling::object_handle(&name),
            target_name: name.clone(),
            name,
            parent: None,
            api_type: ApiType::Core,
            is_singleton: false,
            is_instantiable: false,
            is_ref_counted: false,
            doc: None,
            enums: Vec::new(),
            constants: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
        }
    }

    // === Builder Methods ===

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_api_type(mut self, api_type: ApiType) -> Self {
        self.api_type = api_type;
        self
    }

    pub fn with_singleton(mut self, is_singleton: bool) -> Self {
        self.is_singleton = is_singleton;
        self
    }

    pub fn with_instantiable(mut self, is_instantiable: bool) -> Self {
        self.is_instantiable = is_instantiable;
        self
    }

    pub fn with_ref_counted(mut self, is_ref_counted: bool) -> Self {
        self.is_ref_counted = is_ref_counted;
        self
    }

    pub fn with_doc(mut self, doc: Option<ClassDocumentation>) -> Self {
        self.doc = doc;
        self
    }

    pub fn with_enum(mut self, entry: EnumEntry) -> Self {
        self.enums.push(entry);
        self
    }

    pub fn with_constant(mut self, constant: ConstantEntry) -> Self {
        self.constants.push(constant);
        self
    }

    pub fn with_method(mut self, method: MethodEntry) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_property(mut self, property: PropertyEntry) -> Self {
        self.properties.push(property);
        self
    }

    // === Naming ===

    /// Abstract tag type that subclasses inherit from.
    pub fn abstract_name(&self) -> String {
        format!("Godot{}", self.target_name)
    }

    /// Concrete type of the lazily resolved singleton instance.
    pub fn singleton_name(&self) -> String {
        format!("{}Singleton", self.target_name)
    }

    /// Module holding the class's enums and constants.
    pub fn info_module_name(&self) -> String {
        format!("{}Info", self.target_name)
    }

    // === Queries ===

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodEntry> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&EnumEntry> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn find_property(&self, name: &str) -> Option<&PropertyEntry> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeRef;

    #[test]
    fn derived_names() {
        let class = ClassEntry::new("Node").with_parent("Object");
        assert_eq!(class.abstract_name(), "GodotNode");
        assert_eq!(class.singleton_name(), "NodeSingleton");
        assert_eq!(class.info_module_name(), "NodeInfo");
        assert!(!class.is_root());
        assert_eq!(class.marshaling.output.render("ret"), "Node(ret[])");
    }

    #[test]
    fn member_lookup() {
        let class = ClassEntry::new("Node")
            .with_method(MethodEntry::new("get_name", TypeRef::new("StringName")))
            .with_property(PropertyEntry::new("name", -1).with_getter("get_name"));
        assert!(class.find_method("get_name").is_some());
        assert!(class.find_method("set_name").is_none());
        assert_eq!(
            class.find_property("name").and_then(|p| p.getter.as_deref()),
            Some("get_name")
        );
    }
}
