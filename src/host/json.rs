//! JSON-backed host collaborators.
//!
//! A reflection dump looks like:
//!
//! ```json
//! {
//!   "classes": [
//!     {
//!       "name": "Node",
//!       "parent": "Object",
//!       "api_type": "core",
//!       "instantiable": true,
//!       "properties": [
//!         { "name": "name", "type": "string_name", "usage": "STORAGE | EDITOR",
//!           "getter": "get_name", "setter": "set_name" }
//!       ],
//!       "methods": [
//!         { "name": "get_child_count", "flags": "NORMAL | CONST",
//!           "return": { "type": "int" }, "return_meta": "int32",
//!           "arguments": [ { "name": "include_internal", "type": "bool" } ],
//!           "default_arguments": [ { "type": "bool", "value": false } ] }
//!       ],
//!       "constants": [ { "name": "NOTIFICATION_READY", "value": 13 } ],
//!       "enums": [ { "name": "ProcessMode", "constants": ["PROCESS_MODE_INHERIT"] } ]
//!     }
//!   ],
//!   "global_constants": [ { "name": "SIDE_LEFT", "value": 0, "enum": "Side" } ]
//! }
//! ```
//!
//! Host values use `{ "type": <kind>, "value": <payload> }`. Kinds the
//! generator has no literal form for load as [`HostValue::Unsupported`].

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use julia_bindgen_core::{ApiType, HostValue, MethodFlags};

use super::{
    ClassDb, ClassDoc, DocDatabase, EnumInfo, GlobalConstantInfo, MethodBindInfo, MethodInfo,
    PropertyInfo,
};
use crate::error::{GenerateError, GenerateResult};

// ============================================================================
// Host values
// ============================================================================

/// A tagged host value as written in a dump.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonValue {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl JsonValue {
    /// Convert to a host value. Malformed payloads are unsupported values.
    pub fn to_host_value(&self) -> HostValue {
        self.convert().unwrap_or_else(|| HostValue::Unsupported {
            kind: self.kind.clone(),
        })
    }

    fn convert(&self) -> Option<HostValue> {
        let value = &self.value;
        let converted = match self.kind.as_str() {
            "Nil" | "nil" => HostValue::Nil,
            "bool" => HostValue::Bool(value.as_bool()?),
            "int" => HostValue::Int(value.as_i64()?),
            "float" => HostValue::Float(float(value)?),
            "String" => HostValue::String(value.as_str()?.to_string()),
            "StringName" => HostValue::StringName(value.as_str()?.to_string()),
            "Vector2" => HostValue::Vector2(floats(value)?),
            "Vector3" => HostValue::Vector3(floats(value)?),
            "Vector4" => HostValue::Vector4(floats(value)?),
            "Vector2i" => HostValue::Vector2i(ints(value)?),
            "Vector3i" => HostValue::Vector3i(ints(value)?),
            "Vector4i" => HostValue::Vector4i(ints(value)?),
            _ => return None,
        };
        Some(converted)
    }
}

/// Numbers, or `"inf"`, `"-inf"` and `"nan"` which JSON cannot spell.
fn float(value: &serde_json::Value) -> Option<f64> {
    match value.as_str() {
        Some("inf") => Some(f64::INFINITY),
        Some("-inf") => Some(f64::NEG_INFINITY),
        Some("nan") => Some(f64::NAN),
        Some(_) => None,
        None => value.as_f64(),
    }
}

fn floats<const N: usize>(value: &serde_json::Value) -> Option<[f64; N]> {
    let items = value.as_array()?;
    if items.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = float(item)?;
    }
    Some(out)
}

fn ints<const N: usize>(value: &serde_json::Value) -> Option<[i32; N]> {
    let items = value.as_array()?;
    if items.len() != N {
        return None;
    }
    let mut out = [0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = i32::try_from(item.as_i64()?).ok()?;
    }
    Some(out)
}

// ============================================================================
// Class database
// ============================================================================

fn yes() -> bool {
    true
}

fn no_index() -> i32 {
    -1
}

#[derive(Debug, Clone, Deserialize)]
struct JsonProperty {
    #[serde(flatten)]
    info: PropertyInfo,
    #[serde(default)]
    getter: Option<String>,
    #[serde(default)]
    setter: Option<String>,
    #[serde(default = "no_index")]
    index: i32,
    /// The host fails the index lookup for this property.
    #[serde(default)]
    invalid: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonMethod {
    #[serde(flatten)]
    info: MethodInfo,
    #[serde(default)]
    default_arguments: Vec<JsonValue>,
}

impl JsonMethod {
    fn bind(&self) -> Option<MethodBindInfo> {
        let flags = self.info.flags;
        if flags.contains(MethodFlags::VIRTUAL) {
            return None;
        }
        Some(MethodBindInfo {
            is_static: flags.contains(MethodFlags::STATIC),
            is_vararg: flags.contains(MethodFlags::VARARG),
            argument_count: self.info.arguments.len(),
            return_meta: self.info.return_meta,
            argument_meta: self.info.argument_meta.clone(),
            default_arguments: self
                .default_arguments
                .iter()
                .map(JsonValue::to_host_value)
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct JsonConstant {
    name: String,
    value: i64,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonClass {
    name: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    api_type: ApiType,
    #[serde(default = "yes")]
    exposed: bool,
    #[serde(default = "yes")]
    enabled: bool,
    #[serde(default)]
    singleton: bool,
    #[serde(default)]
    instantiable: bool,
    #[serde(default)]
    properties: Vec<JsonProperty>,
    #[serde(default)]
    methods: Vec<JsonMethod>,
    #[serde(default)]
    constants: Vec<JsonConstant>,
    #[serde(default)]
    enums: Vec<EnumInfo>,
}

impl JsonClass {
    fn property(&self, name: &str) -> Option<&JsonProperty> {
        self.properties.iter().find(|p| p.info.name == name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct JsonApi {
    #[serde(default)]
    classes: Vec<JsonClass>,
    #[serde(default)]
    global_constants: Vec<GlobalConstantInfo>,
}

/// Class database loaded from a JSON reflection dump.
#[derive(Debug, Clone, Default)]
pub struct JsonClassDb {
    classes: Vec<JsonClass>,
    by_name: FxHashMap<String, usize>,
    /// Direct inheriters in declaration order.
    inheriters: FxHashMap<String, Vec<String>>,
    global_constants: Vec<GlobalConstantInfo>,
}

impl JsonClassDb {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<JsonApi>(text).map(Self::build)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value::<JsonApi>(value).map(Self::build)
    }

    pub fn from_path(path: impl AsRef<Path>) -> GenerateResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GenerateError::ReadHost {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| GenerateError::LoadHost {
            path: path.to_path_buf(),
            source,
        })
    }

    fn build(api: JsonApi) -> Self {
        let mut by_name = FxHashMap::default();
        let mut inheriters: FxHashMap<String, Vec<String>> = FxHashMap::default();

        for (i, class) in api.classes.iter().enumerate() {
            by_name.insert(class.name.clone(), i);
            if let Some(parent) = &class.parent {
                inheriters
                    .entry(parent.clone())
                    .or_default()
                    .push(class.name.clone());
            }
        }

        Self {
            classes: api.classes,
            by_name,
            inheriters,
            global_constants: api.global_constants,
        }
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    fn class(&self, name: &str) -> Option<&JsonClass> {
        self.by_name.get(name).map(|&i| &self.classes[i])
    }
}

impl ClassDb for JsonClassDb {
    fn direct_inheriters(&self, class: &str) -> Vec<String> {
        self.inheriters.get(class).cloned().unwrap_or_default()
    }

    fn api_type(&self, class: &str) -> ApiType {
        self.class(class).map_or(ApiType::None, |c| c.api_type)
    }

    fn is_class_exposed(&self, class: &str) -> bool {
        self.class(class).is_some_and(|c| c.exposed)
    }

    fn is_class_enabled(&self, class: &str) -> bool {
        self.class(class).is_some_and(|c| c.enabled)
    }

    fn parent_class(&self, class: &str) -> Option<String> {
        self.class(class).and_then(|c| c.parent.clone())
    }

    fn is_singleton(&self, class: &str) -> bool {
        self.class(class).is_some_and(|c| c.singleton)
    }

    fn can_instantiate(&self, class: &str) -> bool {
        self.class(class).is_some_and(|c| c.instantiable)
    }

    fn is_parent_class(&self, class: &str, ancestor: &str) -> bool {
        std::iter::successors(self.class(class), |c| {
            c.parent.as_deref().and_then(|p| self.class(p))
        })
        .take(self.classes.len())
        .any(|c| c.name == ancestor)
    }

    fn property_list(&self, class: &str) -> Vec<PropertyInfo> {
        self.class(class)
            .map(|c| c.properties.iter().map(|p| p.info.clone()).collect())
            .unwrap_or_default()
    }

    fn property_setter(&self, class: &str, property: &str) -> Option<String> {
        self.class(class)?.property(property)?.setter.clone()
    }

    fn property_getter(&self, class: &str, property: &str) -> Option<String> {
        self.class(class)?.property(property)?.getter.clone()
    }

    fn property_index(&self, class: &str, property: &str) -> Option<i32> {
        let property = self.class(class)?.property(property)?;
        (!property.invalid).then_some(property.index)
    }

    fn method_list(&self, class: &str) -> Vec<MethodInfo> {
        self.class(class)
            .map(|c| c.methods.iter().map(|m| m.info.clone()).collect())
            .unwrap_or_default()
    }

    fn method_bind(&self, class: &str, method: &str) -> Option<MethodBindInfo> {
        self.class(class)?
            .methods
            .iter()
            .find(|m| m.info.name == method)?
            .bind()
    }

    fn integer_constant_list(&self, class: &str) -> Vec<String> {
        self.class(class)
            .map(|c| c.constants.iter().map(|k| k.name.clone()).collect())
            .unwrap_or_default()
    }

    fn integer_constant(&self, class: &str, name: &str) -> Option<i64> {
        self.class(class)?
            .constants
            .iter()
            .find(|k| k.name == name)
            .map(|k| k.value)
    }

    fn enum_list(&self, class: &str) -> Vec<EnumInfo> {
        self.class(class)
            .map(|c| c.enums.clone())
            .unwrap_or_default()
    }

    fn global_constants(&self) -> Vec<GlobalConstantInfo> {
        self.global_constants.clone()
    }
}

// ============================================================================
// Documentation
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
struct JsonDocs {
    #[serde(default)]
    classes: Vec<ClassDoc>,
}

/// Documentation database loaded from JSON (`{ "classes": [ ... ] }`).
#[derive(Debug, Clone, Default)]
pub struct JsonDocDatabase {
    classes: FxHashMap<String, ClassDoc>,
}

impl JsonDocDatabase {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<JsonDocs>(text).map(Self::build)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value::<JsonDocs>(value).map(Self::build)
    }

    pub fn from_path(path: impl AsRef<Path>) -> GenerateResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GenerateError::ReadHost {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| GenerateError::LoadHost {
            path: path.to_path_buf(),
            source,
        })
    }

    fn build(docs: JsonDocs) -> Self {
        Self {
            classes: docs
                .classes
                .into_iter()
                .map(|doc| (doc.name.clone(), doc))
                .collect(),
        }
    }
}

impl DocDatabase for JsonDocDatabase {
    fn class_doc(&self, name: &str) -> Option<&ClassDoc> {
        self.classes.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use julia_bindgen_core::{PropertyUsage, TypeMeta, VariantType};
    use serde_json::json;

    fn db() -> JsonClassDb {
        JsonClassDb::from_value(json!({
            "classes": [
                { "name": "Object", "instantiable": true },
                { "name": "Node", "parent": "Object",
                  "properties": [
                      { "name": "name", "type": "string_name", "usage": "STORAGE | EDITOR",
                        "getter": "get_name", "setter": "set_name" },
                      { "name": "broken", "type": "int", "invalid": true }
                  ],
                  "methods": [
                      { "name": "get_child", "flags": "NORMAL | CONST",
                        "return": { "type": "object", "class_name": "Node" },
                        "arguments": [
                            { "name": "idx", "type": "int" },
                            { "name": "include_internal", "type": "bool" }
                        ],
                        "argument_meta": ["int32"],
                        "default_arguments": [ { "type": "bool", "value": false } ] },
                      { "name": "_ready", "flags": "VIRTUAL" }
                  ],
                  "constants": [ { "name": "NOTIFICATION_READY", "value": 13 } ] },
                { "name": "EditorPlugin", "parent": "Node", "api_type": "editor" },
                { "name": "Hidden", "parent": "Object", "exposed": false }
            ],
            "global_constants": [
                { "name": "SIDE_LEFT", "value": 0, "enum": "Side" },
                { "name": "MAX_THINGS", "value": 64 }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn classes_and_inheritance() {
        let db = db();
        assert_eq!(db.class_count(), 4);
        assert_eq!(db.direct_inheriters("Object"), ["Node", "Hidden"]);
        assert_eq!(db.parent_class("Node").as_deref(), Some("Object"));
        assert!(db.is_parent_class("EditorPlugin", "Object"));
        assert!(!db.is_parent_class("Object", "Node"));
        assert_eq!(db.api_type("EditorPlugin"), ApiType::Editor);
        assert_eq!(db.api_type("Missing"), ApiType::None);
        assert!(!db.is_class_exposed("Hidden"));
        assert!(db.is_class_enabled("Node"));
    }

    #[test]
    fn properties() {
        let db = db();
        let props = db.property_list("Node");
        assert_eq!(props[0].variant_type, VariantType::StringName);
        assert_eq!(props[0].usage, PropertyUsage::STORAGE | PropertyUsage::EDITOR);
        assert_eq!(db.property_getter("Node", "name").as_deref(), Some("get_name"));
        assert_eq!(db.property_index("Node", "name"), Some(-1));
        assert_eq!(db.property_index("Node", "broken"), None);
    }

    #[test]
    fn methods_and_binds() {
        let db = db();
        let methods = db.method_list("Node");
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].return_value.class_name, "Node");

        let bind = db.method_bind("Node", "get_child").unwrap();
        assert_eq!(bind.argument_meta(0), TypeMeta::Int32);
        assert!(bind.has_default_argument(1));
        assert_eq!(bind.default_argument(1), Some(&HostValue::Bool(false)));

        assert!(db.method_bind("Node", "_ready").is_none());
    }

    #[test]
    fn constants() {
        let db = db();
        assert_eq!(db.integer_constant_list("Node"), ["NOTIFICATION_READY"]);
        assert_eq!(db.integer_constant("Node", "NOTIFICATION_READY"), Some(13));
        let globals = db.global_constants();
        assert_eq!(globals[0].enum_name.as_deref(), Some("Side"));
        assert_eq!(globals[1].enum_name, None);
    }

    #[test]
    fn host_values() {
        let v = |value: serde_json::Value| {
            serde_json::from_value::<JsonValue>(value)
                .unwrap()
                .to_host_value()
        };
        assert_eq!(v(json!({ "type": "Nil" })), HostValue::Nil);
        assert_eq!(v(json!({ "type": "int", "value": -3 })), HostValue::Int(-3));
        assert_eq!(
            v(json!({ "type": "Vector2i", "value": [1, 2] })),
            HostValue::Vector2i([1, 2])
        );
        assert_eq!(
            v(json!({ "type": "float", "value": "-inf" })),
            HostValue::Float(f64::NEG_INFINITY)
        );
        assert_eq!(
            v(json!({ "type": "Color", "value": [1, 0, 0, 1] })),
            HostValue::Unsupported {
                kind: "Color".into()
            }
        );
        assert_eq!(
            v(json!({ "type": "Vector3", "value": [1, 2] })),
            HostValue::Unsupported {
                kind: "Vector3".into()
            }
        );
    }

    #[test]
    fn docs() {
        let docs = JsonDocDatabase::from_value(json!({
            "classes": [
                { "name": "Node", "brief_description": "Base of the tree.",
                  "methods": [ { "name": "get_child", "description": "Returns a child." } ] },
                { "name": "@GlobalScope",
                  "constants": [ { "name": "SIDE_LEFT", "description": "Left side." } ] }
            ]
        }))
        .unwrap();
        let node = docs.doc_for_class("Node").unwrap();
        assert_eq!(node.method("get_child").unwrap().description, "Returns a child.");
        assert!(node.property("name").is_none());
        assert!(docs.global_scope().unwrap().constant("SIDE_LEFT").is_some());
    }
}
