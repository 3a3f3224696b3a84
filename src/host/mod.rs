//! Host collaborators.
//!
//! The generator only reads from the host: a class database describing the
//! reflected object model, and an optional documentation database. Both are
//! traits so the CLI can feed JSON dumps while an embedding engine can answer
//! from its live registry.

mod json;

pub use json::{JsonClassDb, JsonDocDatabase, JsonValue};

use serde::Deserialize;

use julia_bindgen_core::{ApiType, HostValue, MethodFlags, PropertyUsage, TypeMeta, VariantType};

// ============================================================================
// Reflection data
// ============================================================================

/// A property, argument or return slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PropertyInfo {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub variant_type: VariantType,
    /// Class or enum name qualifying the type (`Node`, `Node.ProcessMode`).
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub usage: PropertyUsage,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>, variant_type: VariantType) -> Self {
        Self {
            name: name.into(),
            variant_type,
            ..Self::default()
        }
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_usage(mut self, usage: PropertyUsage) -> Self {
        self.usage = usage;
        self
    }
}

/// A method as listed by the class database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MethodInfo {
    pub name: String,
    #[serde(default)]
    pub flags: MethodFlags,
    #[serde(rename = "return", default)]
    pub return_value: PropertyInfo,
    #[serde(default)]
    pub arguments: Vec<PropertyInfo>,
    /// Width metadata, used when the method has no bind.
    #[serde(default)]
    pub return_meta: TypeMeta,
    #[serde(default)]
    pub argument_meta: Vec<TypeMeta>,
}

impl MethodInfo {
    /// Width metadata of argument `index`, or of the return value for `-1`.
    pub fn meta(&self, index: i32) -> TypeMeta {
        if index < 0 {
            return self.return_meta;
        }
        self.argument_meta
            .get(index as usize)
            .copied()
            .unwrap_or_default()
    }
}

/// The concrete binding object behind a method.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodBindInfo {
    pub is_static: bool,
    pub is_vararg: bool,
    pub argument_count: usize,
    pub return_meta: TypeMeta,
    pub argument_meta: Vec<TypeMeta>,
    /// Defaults for the trailing arguments, in argument order.
    pub default_arguments: Vec<HostValue>,
}

impl MethodBindInfo {
    /// Width metadata of argument `index`, or of the return value for `-1`.
    pub fn argument_meta(&self, index: i32) -> TypeMeta {
        if index < 0 {
            return self.return_meta;
        }
        self.argument_meta
            .get(index as usize)
            .copied()
            .unwrap_or_default()
    }

    fn first_defaulted(&self) -> usize {
        self.argument_count
            .saturating_sub(self.default_arguments.len())
    }

    pub fn has_default_argument(&self, index: usize) -> bool {
        index < self.argument_count && index >= self.first_defaulted()
    }

    pub fn default_argument(&self, index: usize) -> Option<&HostValue> {
        if !self.has_default_argument(index) {
            return None;
        }
        self.default_arguments.get(index - self.first_defaulted())
    }
}

/// An enum declared by a class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EnumInfo {
    pub name: String,
    /// Member constant names, in declaration order.
    #[serde(default)]
    pub constants: Vec<String>,
    #[serde(default)]
    pub is_bitfield: bool,
}

/// A constant of the global scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GlobalConstantInfo {
    pub name: String,
    pub value: i64,
    /// Enum the constant belongs to, if any.
    #[serde(default, rename = "enum")]
    pub enum_name: Option<String>,
    #[serde(default)]
    pub is_bitfield: bool,
}

// ============================================================================
// Class database
// ============================================================================

/// Read-only query surface of the host's reflection registry.
pub trait ClassDb {
    /// Classes that directly inherit from `class`.
    fn direct_inheriters(&self, class: &str) -> Vec<String>;

    fn api_type(&self, class: &str) -> ApiType;
    fn is_class_exposed(&self, class: &str) -> bool;
    fn is_class_enabled(&self, class: &str) -> bool;
    fn parent_class(&self, class: &str) -> Option<String>;
    fn is_singleton(&self, class: &str) -> bool;
    fn can_instantiate(&self, class: &str) -> bool;

    /// Whether `class` is `ancestor` or inherits from it.
    fn is_parent_class(&self, class: &str, ancestor: &str) -> bool;

    /// Properties declared by `class` itself.
    fn property_list(&self, class: &str) -> Vec<PropertyInfo>;
    fn property_setter(&self, class: &str, property: &str) -> Option<String>;
    fn property_getter(&self, class: &str, property: &str) -> Option<String>;
    /// `None` when the host reports the property as invalid.
    fn property_index(&self, class: &str, property: &str) -> Option<i32>;

    /// Methods declared by `class` itself.
    fn method_list(&self, class: &str) -> Vec<MethodInfo>;
    /// Binding object of a method; virtual methods have none.
    fn method_bind(&self, class: &str, method: &str) -> Option<MethodBindInfo>;

    /// Integer constants declared by `class`, in declaration order.
    fn integer_constant_list(&self, class: &str) -> Vec<String>;
    fn integer_constant(&self, class: &str, name: &str) -> Option<i64>;
    fn enum_list(&self, class: &str) -> Vec<EnumInfo>;

    fn global_constants(&self) -> Vec<GlobalConstantInfo>;
}

// ============================================================================
// Documentation
// ============================================================================

/// Documentation of one class member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemberDoc {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Documentation block of one class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClassDoc {
    pub name: String,
    #[serde(default)]
    pub brief_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub methods: Vec<MemberDoc>,
    #[serde(default)]
    pub properties: Vec<MemberDoc>,
    #[serde(default)]
    pub constants: Vec<MemberDoc>,
}

impl ClassDoc {
    pub fn method(&self, name: &str) -> Option<&MemberDoc> {
        self.methods.iter().find(|d| d.name == name)
    }

    pub fn property(&self, name: &str) -> Option<&MemberDoc> {
        self.properties.iter().find(|d| d.name == name)
    }

    pub fn constant(&self, name: &str) -> Option<&MemberDoc> {
        self.constants.iter().find(|d| d.name == name)
    }
}

/// Name of the documentation block holding global constants.
pub const GLOBAL_SCOPE_DOC: &str = "@GlobalScope";

/// Read-only documentation lookup.
pub trait DocDatabase {
    /// Documentation of a class by its documented name.
    fn class_doc(&self, name: &str) -> Option<&ClassDoc>;

    /// Documentation of a host class.
    ///
    /// Classes exposed with a leading underscore are documented without it.
    fn doc_for_class(&self, class: &str) -> Option<&ClassDoc> {
        self.class_doc(class.strip_prefix('_').unwrap_or(class))
    }

    fn global_scope(&self) -> Option<&ClassDoc> {
        self.class_doc(GLOBAL_SCOPE_DOC)
    }
}

/// Documentation database without entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDocs;

impl DocDatabase for NoDocs {
    fn class_doc(&self, _name: &str) -> Option<&ClassDoc> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind(argc: usize, defaults: Vec<HostValue>) -> MethodBindInfo {
        MethodBindInfo {
            argument_count: argc,
            default_arguments: defaults,
            ..MethodBindInfo::default()
        }
    }

    #[test]
    fn trailing_defaults() {
        let b = bind(3, vec![HostValue::Int(1), HostValue::Bool(true)]);
        assert!(!b.has_default_argument(0));
        assert!(b.has_default_argument(1));
        assert_eq!(b.default_argument(1), Some(&HostValue::Int(1)));
        assert_eq!(b.default_argument(2), Some(&HostValue::Bool(true)));
        assert_eq!(b.default_argument(3), None);
        assert_eq!(b.default_argument(0), None);
    }

    #[test]
    fn meta_lookup() {
        let b = MethodBindInfo {
            argument_count: 1,
            return_meta: TypeMeta::Uint8,
            argument_meta: vec![TypeMeta::Int16],
            ..MethodBindInfo::default()
        };
        assert_eq!(b.argument_meta(-1), TypeMeta::Uint8);
        assert_eq!(b.argument_meta(0), TypeMeta::Int16);
        assert_eq!(b.argument_meta(5), TypeMeta::None);
    }

    #[test]
    fn underscore_classes_use_plain_doc() {
        struct OneDoc(ClassDoc);
        impl DocDatabase for OneDoc {
            fn class_doc(&self, name: &str) -> Option<&ClassDoc> {
                (name == self.0.name).then_some(&self.0)
            }
        }

        let docs = OneDoc(ClassDoc {
            name: "Engine".into(),
            ..ClassDoc::default()
        });
        assert!(docs.doc_for_class("_Engine").is_some());
        assert!(docs.doc_for_class("Engine").is_some());
        assert!(NoDocs.doc_for_class("Engine").is_none());
    }
}
