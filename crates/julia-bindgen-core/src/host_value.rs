//! Host dynamic values.

use std::fmt;

/// A value as stored by the host, restricted to the kinds the generator
/// knows how to turn into source literals.
///
/// Everything else is carried as [`HostValue::Unsupported`] so callers can
/// reject it explicitly instead of guessing a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    StringName(String),
    Vector2([f64; 2]),
    Vector2i([i32; 2]),
    Vector3([f64; 3]),
    Vector3i([i32; 3]),
    Vector4([f64; 4]),
    Vector4i([i32; 4]),
    /// Any other host kind (colors, arrays, objects, ...).
    Unsupported { kind: String },
}

impl HostValue {
    /// Host name of the value's kind.
    pub fn kind(&self) -> &str {
        match self {
            HostValue::Nil => "Nil",
            HostValue::Bool(_) => "bool",
            HostValue::Int(_) => "int",
            HostValue::Float(_) => "float",
            HostValue::String(_) => "String",
            HostValue::StringName(_) => "StringName",
            HostValue::Vector2(_) => "Vector2",
            HostValue::Vector2i(_) => "Vector2i",
            HostValue::Vector3(_) => "Vector3",
            HostValue::Vector3i(_) => "Vector3i",
            HostValue::Vector4(_) => "Vector4",
            HostValue::Vector4i(_) => "Vector4i",
            HostValue::Unsupported { kind } => kind,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, HostValue::Nil)
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Nil => f.write_str("null"),
            HostValue::Bool(v) => write!(f, "{v}"),
            HostValue::Int(v) => write!(f, "{v}"),
            HostValue::Float(v) => write!(f, "{v}"),
            HostValue::String(v) => write!(f, "{v:?}"),
            HostValue::StringName(v) => write!(f, "&{v:?}"),
            HostValue::Vector2(c) => write!(f, "({}, {})", c[0], c[1]),
            HostValue::Vector2i(c) => write!(f, "({}, {})", c[0], c[1]),
            HostValue::Vector3(c) => write!(f, "({}, {}, {})", c[0], c[1], c[2]),
            HostValue::Vector3i(c) => write!(f, "({}, {}, {})", c[0], c[1], c[2]),
            HostValue::Vector4(c) => write!(f, "({}, {}, {}, {})", c[0], c[1], c[2], c[3]),
            HostValue::Vector4i(c) => write!(f, "({}, {}, {}, {})", c[0], c[1], c[2], c[3]),
            HostValue::Unsupported { kind } => write!(f, "<{kind}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(HostValue::Int(3).kind(), "int");
        assert_eq!(HostValue::Vector3i([1, 2, 3]).kind(), "Vector3i");
        assert_eq!(
            HostValue::Unsupported {
                kind: "Color".into()
            }
            .kind(),
            "Color"
        );
        assert!(HostValue::Nil.is_nil());
    }

    #[test]
    fn display() {
        assert_eq!(HostValue::StringName("ui".into()).to_string(), "&\"ui\"");
        assert_eq!(HostValue::Vector2([1.5, 2.0]).to_string(), "(1.5, 2)");
    }
}
