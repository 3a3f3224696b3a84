//! Reflection vocabulary reported by the host class database.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// API partition a class belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiType {
    /// Not part of any recognized partition. Such classes are never admitted.
    None,
    #[default]
    Core,
    Editor,
    Extension,
    EditorExtension,
}

impl ApiType {
    /// Whether the class belongs to a recognized partition.
    pub fn is_recognized(self) -> bool {
        self != ApiType::None
    }

    /// Whether the class is only available inside the editor.
    pub fn is_editor(self) -> bool {
        matches!(self, ApiType::Editor | ApiType::EditorExtension)
    }
}

/// Dynamic kind of a host value or declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantType {
    #[default]
    Nil,
    Bool,
    Int,
    Float,
    String,
    Vector2,
    Vector2i,
    Rect2,
    Rect2i,
    Vector3,
    Vector3i,
    Transform2d,
    Vector4,
    Vector4i,
    Plane,
    Quaternion,
    Aabb,
    Basis,
    Transform3d,
    Projection,
    Color,
    StringName,
    NodePath,
    Rid,
    Object,
    Callable,
    Signal,
    Dictionary,
    Array,
    PackedByteArray,
    PackedInt32Array,
    PackedInt64Array,
    PackedFloat32Array,
    PackedFloat64Array,
    PackedStringArray,
    PackedVector2Array,
    PackedVector3Array,
    PackedColorArray,
    PackedVector4Array,
}

impl VariantType {
    /// Host name of the type.
    pub const fn name(self) -> &'static str {
        match self {
            VariantType::Nil => "Nil",
            VariantType::Bool => "bool",
            VariantType::Int => "int",
            VariantType::Float => "float",
            VariantType::String => "String",
            VariantType::Vector2 => "Vector2",
            VariantType::Vector2i => "Vector2i",
            VariantType::Rect2 => "Rect2",
            VariantType::Rect2i => "Rect2i",
            VariantType::Vector3 => "Vector3",
            VariantType::Vector3i => "Vector3i",
            VariantType::Transform2d => "Transform2D",
            VariantType::Vector4 => "Vector4",
            VariantType::Vector4i => "Vector4i",
            VariantType::Plane => "Plane",
            VariantType::Quaternion => "Quaternion",
            VariantType::Aabb => "AABB",
            VariantType::Basis => "Basis",
            VariantType::Transform3d => "Transform3D",
            VariantType::Projection => "Projection",
            VariantType::Color => "Color",
            VariantType::StringName => "StringName",
            VariantType::NodePath => "NodePath",
            VariantType::Rid => "RID",
            VariantType::Object => "Object",
            VariantType::Callable => "Callable",
            VariantType::Signal => "Signal",
            VariantType::Dictionary => "Dictionary",
            VariantType::Array => "Array",
            VariantType::PackedByteArray => "PackedByteArray",
            VariantType::PackedInt32Array => "PackedInt32Array",
            VariantType::PackedInt64Array => "PackedInt64Array",
            VariantType::PackedFloat32Array => "PackedFloat32Array",
            VariantType::PackedFloat64Array => "PackedFloat64Array",
            VariantType::PackedStringArray => "PackedStringArray",
            VariantType::PackedVector2Array => "PackedVector2Array",
            VariantType::PackedVector3Array => "PackedVector3Array",
            VariantType::PackedColorArray => "PackedColorArray",
            VariantType::PackedVector4Array => "PackedVector4Array",
        }
    }

    /// Whether arguments and return values of this type can be bound.
    pub const fn is_supported_in_signature(self) -> bool {
        matches!(
            self,
            VariantType::Nil
                | VariantType::Bool
                | VariantType::Int
                | VariantType::Float
                | VariantType::String
                | VariantType::StringName
                | VariantType::Vector2
                | VariantType::Vector2i
                | VariantType::Vector3
                | VariantType::Vector3i
                | VariantType::Vector4
                | VariantType::Vector4i
                | VariantType::Object
        )
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Low-level numeric representation of an argument or return value.
///
/// The nominal type only says "int" or "float"; the real width travels
/// separately as metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeMeta {
    #[default]
    None,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    RealIsFloat,
    RealIsDouble,
}

bitflags! {
    /// Usage flags attached to a property or to an argument/return slot.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct PropertyUsage: u32 {
        const STORAGE = 1 << 1;
        const EDITOR = 1 << 2;
        const GROUP = 1 << 6;
        const CATEGORY = 1 << 7;
        const SUBGROUP = 1 << 8;
        const CLASS_IS_BITFIELD = 1 << 9;
        const CLASS_IS_ENUM = 1 << 16;
        const NIL_IS_VARIANT = 1 << 17;
        const ARRAY = 1 << 18;
    }
}

impl PropertyUsage {
    /// Whether the entry is an editor grouping marker rather than a property.
    pub fn is_grouping(self) -> bool {
        self.intersects(PropertyUsage::GROUP | PropertyUsage::SUBGROUP | PropertyUsage::CATEGORY)
    }

    /// Whether an integer slot carries an enum or bit-field type.
    pub fn is_enum_like(self) -> bool {
        self.intersects(PropertyUsage::CLASS_IS_ENUM | PropertyUsage::CLASS_IS_BITFIELD)
    }
}

bitflags! {
    /// Flags describing a method as reported by the class database.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MethodFlags: u32 {
        const NORMAL = 1;
        const EDITOR = 1 << 1;
        const CONST = 1 << 2;
        const VIRTUAL = 1 << 3;
        const VARARG = 1 << 4;
        const STATIC = 1 << 5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_partitions() {
        assert!(!ApiType::None.is_recognized());
        assert!(ApiType::Core.is_recognized());
        assert!(ApiType::EditorExtension.is_editor());
        assert!(!ApiType::Extension.is_editor());
    }

    #[test]
    fn signature_allow_list() {
        assert!(VariantType::Int.is_supported_in_signature());
        assert!(VariantType::Vector3i.is_supported_in_signature());
        assert!(VariantType::Object.is_supported_in_signature());
        assert!(!VariantType::Color.is_supported_in_signature());
        assert!(!VariantType::PackedByteArray.is_supported_in_signature());
    }

    #[test]
    fn usage_groups() {
        assert!(PropertyUsage::SUBGROUP.is_grouping());
        assert!(!(PropertyUsage::STORAGE | PropertyUsage::EDITOR).is_grouping());
        assert!(PropertyUsage::CLASS_IS_BITFIELD.is_enum_like());
    }
}
