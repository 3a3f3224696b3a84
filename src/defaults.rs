//! Default-value synthesis.
//!
//! Turns a host default argument into a Julia source literal for the
//! parameter's destination type. Every supported pair of value kind and
//! destination has an explicit arm; anything else yields `None`, and the
//! caller drops the method rather than guess.

use julia_bindgen_core::{BuiltinKind, HostValue};

/// Type of the parameter a default is spliced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination<'a> {
    Builtin(BuiltinKind),
    Enum { qualified: &'a str, is_flags: bool },
    /// Object parameter; carries the concrete Julia struct name.
    Object(&'a str),
}

/// Synthesize the literal for `value` in a parameter of type `destination`.
pub fn synthesize(
    value: &HostValue,
    destination: Destination<'_>,
    real_is_double: bool,
) -> Option<String> {
    use Destination as D;
    use HostValue as V;

    match (value, destination) {
        (_, D::Builtin(BuiltinKind::Variant)) => variant_literal(value, real_is_double),
        (V::Nil, D::Object(target)) => Some(format!("{target}(C_NULL)")),
        (V::Bool(b), D::Builtin(BuiltinKind::Bool)) => Some(b.to_string()),
        (V::Int(v), D::Builtin(kind)) if kind.is_integer() => int_literal(*v, kind),
        (V::Int(v), D::Builtin(kind)) if kind.is_float() => float_literal(*v as f64, kind),
        (V::Float(v), D::Builtin(kind)) if kind.is_float() => float_literal(*v, kind),
        (V::Int(v), D::Enum { qualified, is_flags }) => {
            // Enums cross the boundary as 32-bit integers.
            i32::try_from(*v).ok()?;
            if is_flags {
                Some(v.to_string())
            } else {
                Some(format!("{qualified}({v})"))
            }
        }
        (V::String(s) | V::StringName(s), D::Builtin(BuiltinKind::String)) => {
            Some(format!("String({})", quoted(s)))
        }
        (V::String(s) | V::StringName(s), D::Builtin(BuiltinKind::StringName)) => {
            Some(format!("StringName(String({}))", quoted(s)))
        }
        (V::Vector2(_), D::Builtin(BuiltinKind::Vector2))
        | (V::Vector3(_), D::Builtin(BuiltinKind::Vector3))
        | (V::Vector4(_), D::Builtin(BuiltinKind::Vector4))
        | (V::Vector2i(_), D::Builtin(BuiltinKind::Vector2i))
        | (V::Vector3i(_), D::Builtin(BuiltinKind::Vector3i))
        | (V::Vector4i(_), D::Builtin(BuiltinKind::Vector4i)) => {
            vector_literal(value, real_is_double)
        }
        _ => None,
    }
}

/// Literal for a `Variant` parameter: the value's natural literal, boxed.
fn variant_literal(value: &HostValue, real_is_double: bool) -> Option<String> {
    let inner = match value {
        HostValue::Nil => return Some("Variant()".to_string()),
        HostValue::Bool(b) => b.to_string(),
        HostValue::Int(v) => v.to_string(),
        HostValue::Float(v) => float_literal(*v, BuiltinKind::Double)?,
        HostValue::String(s) => format!("String({})", quoted(s)),
        HostValue::StringName(s) => format!("StringName(String({}))", quoted(s)),
        HostValue::Vector2(_)
        | HostValue::Vector2i(_)
        | HostValue::Vector3(_)
        | HostValue::Vector3i(_)
        | HostValue::Vector4(_)
        | HostValue::Vector4i(_) => vector_literal(value, real_is_double)?,
        HostValue::Unsupported { .. } => return None,
    };
    Some(format!("Variant({inner})"))
}

/// Plain literal for `Int64`, a narrowing constructor call otherwise.
fn int_literal(value: i64, kind: BuiltinKind) -> Option<String> {
    let (min, max) = kind.integer_range()?;
    if !(min..=max).contains(&(value as i128)) {
        return None;
    }
    if kind == BuiltinKind::Int64 {
        Some(value.to_string())
    } else {
        Some(format!("{}({value})", kind.target_name()))
    }
}

fn float_literal(value: f64, kind: BuiltinKind) -> Option<String> {
    match kind {
        BuiltinKind::Double => Some(double_literal(value)),
        BuiltinKind::Float => single_literal(value),
        _ => None,
    }
}

fn double_literal(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{value:?}")
    }
}

/// `Float32` literal (`1.5f0`, `1f-7`). Finite values that overflow fail.
fn single_literal(value: f64) -> Option<String> {
    let single = value as f32;
    if value.is_nan() {
        return Some("NaN32".to_string());
    }
    if single.is_infinite() {
        if value.is_finite() {
            return None;
        }
        return Some(if single > 0.0 { "Inf32" } else { "-Inf32" }.to_string());
    }

    let text = format!("{single:?}");
    Some(if text.contains('e') {
        text.replace('e', "f")
    } else {
        format!("{text}f0")
    })
}

fn real_literal(value: f64, real_is_double: bool) -> Option<String> {
    if real_is_double {
        Some(double_literal(value))
    } else {
        single_literal(value)
    }
}

fn vector_literal(value: &HostValue, real_is_double: bool) -> Option<String> {
    let (name, components): (&str, Vec<String>) = match value {
        HostValue::Vector2(c) => ("Vector2", reals(c, real_is_double)?),
        HostValue::Vector3(c) => ("Vector3", reals(c, real_is_double)?),
        HostValue::Vector4(c) => ("Vector4", reals(c, real_is_double)?),
        HostValue::Vector2i(c) => ("Vector2i", c.iter().map(i32::to_string).collect()),
        HostValue::Vector3i(c) => ("Vector3i", c.iter().map(i32::to_string).collect()),
        HostValue::Vector4i(c) => ("Vector4i", c.iter().map(i32::to_string).collect()),
        _ => return None,
    };
    Some(format!("{name}({})", components.join(", ")))
}

fn reals(components: &[f64], real_is_double: bool) -> Option<Vec<String>> {
    components
        .iter()
        .map(|&c| real_literal(c, real_is_double))
        .collect()
}

/// Julia double-quoted string literal.
fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
