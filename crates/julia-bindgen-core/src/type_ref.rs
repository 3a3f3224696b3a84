use std::fmt;

/// Reference to a type by host name.
///
/// References are resolved against the type registry at emission time rather
/// than holding a pointer, because the registry maps are filled in phases.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: String,
    /// The reference names an enum or bit-field (`Class.Enum` or a global enum).
    pub is_enum: bool,
}

impl TypeRef {
    /// Reference to a builtin or object type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_enum: false,
        }
    }

    /// Reference to an enum type.
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_enum: true,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_enum {
            write!(f, "enum::{}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}
