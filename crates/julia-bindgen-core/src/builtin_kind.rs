//! Builtin type kinds: the fixed allow-list of scalar and small value types.

use std::fmt;

use crate::TypeMeta;

/// Builtin type kinds.
///
/// Host names follow the width-explicit naming used by the host's own binding
/// generators (`sbyte`, `ushort`, `long`, ...); target names are Julia types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Void,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float,
    Double,
    Variant,
    String,
    StringName,
    Vector2,
    Vector2i,
    Vector3,
    Vector3i,
    Vector4,
    Vector4i,
}

impl BuiltinKind {
    pub const ALL: [BuiltinKind; 21] = [
        BuiltinKind::Void,
        BuiltinKind::Bool,
        BuiltinKind::Int8,
        BuiltinKind::Int16,
        BuiltinKind::Int32,
        BuiltinKind::Int64,
        BuiltinKind::Uint8,
        BuiltinKind::Uint16,
        BuiltinKind::Uint32,
        BuiltinKind::Uint64,
        BuiltinKind::Float,
        BuiltinKind::Double,
        BuiltinKind::Variant,
        BuiltinKind::String,
        BuiltinKind::StringName,
        BuiltinKind::Vector2,
        BuiltinKind::Vector2i,
        BuiltinKind::Vector3,
        BuiltinKind::Vector3i,
        BuiltinKind::Vector4,
        BuiltinKind::Vector4i,
    ];

    /// Host name used as registry key.
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinKind::Void => "void",
            BuiltinKind::Bool => "bool",
            BuiltinKind::Int8 => "sbyte",
            BuiltinKind::Int16 => "short",
            BuiltinKind::Int32 => "int",
            BuiltinKind::Int64 => "long",
            BuiltinKind::Uint8 => "byte",
            BuiltinKind::Uint16 => "ushort",
            BuiltinKind::Uint32 => "uint",
            BuiltinKind::Uint64 => "ulong",
            BuiltinKind::Float => "float",
            BuiltinKind::Double => "double",
            BuiltinKind::Variant => "Variant",
            BuiltinKind::String => "String",
            BuiltinKind::StringName => "StringName",
            BuiltinKind::Vector2 => "Vector2",
            BuiltinKind::Vector2i => "Vector2i",
            BuiltinKind::Vector3 => "Vector3",
            BuiltinKind::Vector3i => "Vector3i",
            BuiltinKind::Vector4 => "Vector4",
            BuiltinKind::Vector4i => "Vector4i",
        }
    }

    /// Julia type name.
    pub const fn target_name(self) -> &'static str {
        match self {
            BuiltinKind::Void => "Cvoid",
            BuiltinKind::Bool => "Bool",
            BuiltinKind::Int8 => "Int8",
            BuiltinKind::Int16 => "Int16",
            BuiltinKind::Int32 => "Int32",
            BuiltinKind::Int64 => "Int64",
            BuiltinKind::Uint8 => "UInt8",
            BuiltinKind::Uint16 => "UInt16",
            BuiltinKind::Uint32 => "UInt32",
            BuiltinKind::Uint64 => "UInt64",
            BuiltinKind::Float => "Float32",
            BuiltinKind::Double => "Float64",
            BuiltinKind::Variant => "Variant",
            BuiltinKind::String => "String",
            BuiltinKind::StringName => "StringName",
            BuiltinKind::Vector2 => "Vector2",
            BuiltinKind::Vector2i => "Vector2i",
            BuiltinKind::Vector3 => "Vector3",
            BuiltinKind::Vector3i => "Vector3i",
            BuiltinKind::Vector4 => "Vector4",
            BuiltinKind::Vector4i => "Vector4i",
        }
    }

    /// Look up a kind by its host name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Integer kind for an integer slot, given its metadata.
    ///
    /// Slots without width metadata are 64-bit.
    pub const fn from_int_meta(meta: TypeMeta) -> Self {
        match meta {
            TypeMeta::Int8 => BuiltinKind::Int8,
            TypeMeta::Int16 => BuiltinKind::Int16,
            TypeMeta::Int32 => BuiltinKind::Int32,
            TypeMeta::Uint8 => BuiltinKind::Uint8,
            TypeMeta::Uint16 => BuiltinKind::Uint16,
            TypeMeta::Uint32 => BuiltinKind::Uint32,
            TypeMeta::Uint64 => BuiltinKind::Uint64,
            _ => BuiltinKind::Int64,
        }
    }

    /// Float kind for a float slot, given its metadata.
    ///
    /// Slots without width metadata are double precision.
    pub const fn from_float_meta(meta: TypeMeta) -> Self {
        match meta {
            TypeMeta::RealIsFloat => BuiltinKind::Float,
            _ => BuiltinKind::Double,
        }
    }

    pub const fn is_void(self) -> bool {
        matches!(self, BuiltinKind::Void)
    }

    pub const fn is_integer(self) -> bool {
        self.integer_range().is_some()
    }

    pub const fn is_float(self) -> bool {
        matches!(self, BuiltinKind::Float | BuiltinKind::Double)
    }

    /// Inclusive value range of an integer kind.
    pub const fn integer_range(self) -> Option<(i128, i128)> {
        match self {
            BuiltinKind::Int8 => Some((i8::MIN as i128, i8::MAX as i128)),
            BuiltinKind::Int16 => Some((i16::MIN as i128, i16::MAX as i128)),
            BuiltinKind::Int32 => Some((i32::MIN as i128, i32::MAX as i128)),
            BuiltinKind::Int64 => Some((i64::MIN as i128, i64::MAX as i128)),
            BuiltinKind::Uint8 => Some((0, u8::MAX as i128)),
            BuiltinKind::Uint16 => Some((0, u16::MAX as i128)),
            BuiltinKind::Uint32 => Some((0, u32::MAX as i128)),
            BuiltinKind::Uint64 => Some((0, u64::MAX as i128)),
            _ => None,
        }
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in BuiltinKind::ALL {
            assert_eq!(BuiltinKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(BuiltinKind::from_name("Color"), None);
    }

    #[test]
    fn meta_tables() {
        assert_eq!(BuiltinKind::from_int_meta(TypeMeta::Uint16), BuiltinKind::Uint16);
        assert_eq!(BuiltinKind::from_int_meta(TypeMeta::None), BuiltinKind::Int64);
        assert_eq!(BuiltinKind::from_int_meta(TypeMeta::RealIsFloat), BuiltinKind::Int64);
        assert_eq!(BuiltinKind::from_float_meta(TypeMeta::RealIsFloat), BuiltinKind::Float);
        assert_eq!(BuiltinKind::from_float_meta(TypeMeta::None), BuiltinKind::Double);
    }

    #[test]
    fn integer_ranges() {
        assert_eq!(BuiltinKind::Uint8.integer_range(), Some((0, 255)));
        assert!(BuiltinKind::Int32.is_integer());
        assert!(!BuiltinKind::Float.is_integer());
        assert!(BuiltinKind::Float.is_float());
        assert_eq!(BuiltinKind::Int32.target_name(), "Int32");
    }
}
