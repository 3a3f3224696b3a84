//! Static marshaling table for builtin types.
//!
//! The pointer-call convention passes every integer as `int64_t` and every
//! float as `double`, so narrower Julia types are widened on the way in and
//! narrowed on the way out.

use julia_bindgen_core::{BuiltinEntry, BuiltinKind, Marshaling, Template};

/// Marshaling entry for one builtin kind.
pub fn builtin_entry(kind: BuiltinKind) -> BuiltinEntry {
    let marshaling = match kind {
        BuiltinKind::Void => Marshaling::void(),
        BuiltinKind::Bool => Marshaling::boxed("Cint", "0", Template::wrap("Bool(", "[])")),
        BuiltinKind::Int64 => Marshaling::boxed("Int64", "0", Template::wrap("", "[]")),
        BuiltinKind::Uint64 => Marshaling::new(
            "Ref{Int64}",
            "Ref{Int64}(0)",
            Template::wrap("Ref{Int64}(reinterpret(Int64, ", "))"),
            Template::wrap("reinterpret(UInt64, ", "[])"),
        ),
        BuiltinKind::Int8
        | BuiltinKind::Int16
        | BuiltinKind::Int32
        | BuiltinKind::Uint8
        | BuiltinKind::Uint16
        | BuiltinKind::Uint32 => Marshaling::boxed(
            "Int64",
            "0",
            Template::wrap(format!("{}(", kind.target_name()), "[])"),
        ),
        BuiltinKind::Float => Marshaling::boxed("Float64", "0.0", Template::wrap("Float32(", "[])")),
        BuiltinKind::Double => Marshaling::boxed("Float64", "0.0", Template::wrap("", "[]")),
        BuiltinKind::Variant => Marshaling::new(
            "Ref{Variant}",
            "Variant()",
            Template::wrap("Ref{Variant}(", ")"),
            Template::identity(),
        ),
        BuiltinKind::String => Marshaling::new(
            "Ref{GodotString}",
            "Ref{GodotString}(GodotString())",
            Template::wrap("Ref{GodotString}(GodotString(", "))"),
            Template::wrap("String(", "[])"),
        ),
        BuiltinKind::StringName
        | BuiltinKind::Vector2
        | BuiltinKind::Vector2i
        | BuiltinKind::Vector3
        | BuiltinKind::Vector3i
        | BuiltinKind::Vector4
        | BuiltinKind::Vector4i => {
            let name = kind.target_name();
            Marshaling::boxed(name, &format!("{name}()"), Template::wrap("", "[]"))
        }
    };

    BuiltinEntry::new(kind, marshaling)
}

/// Entries for every builtin kind.
pub fn builtin_entries() -> impl Iterator<Item = BuiltinEntry> {
    BuiltinKind::ALL.into_iter().map(builtin_entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_cross_as_int64() {
        for kind in BuiltinKind::ALL.into_iter().filter(|k| k.is_integer()) {
            let entry = builtin_entry(kind);
            assert_eq!(entry.marshaling.call_repr, "Ref{Int64}", "{kind}");
        }

        let int = builtin_entry(BuiltinKind::Int32);
        assert_eq!(int.marshaling.output.render("ret"), "Int32(ret[])");
        assert_eq!(int.marshaling.input.render("x"), "Ref{Int64}(x)");

        let long = builtin_entry(BuiltinKind::Int64);
        assert_eq!(long.marshaling.output.render("ret"), "ret[]");
    }

    #[test]
    fn unsigned_64_is_reinterpreted() {
        let m = builtin_entry(BuiltinKind::Uint64).marshaling;
        assert_eq!(m.input.render("x"), "Ref{Int64}(reinterpret(Int64, x))");
        assert_eq!(m.output.render("ret"), "reinterpret(UInt64, ret[])");
    }

    #[test]
    fn floats_cross_as_double() {
        let m = builtin_entry(BuiltinKind::Float).marshaling;
        assert_eq!(m.call_repr, "Ref{Float64}");
        assert_eq!(m.initial_value, "Ref{Float64}(0.0)");
        assert_eq!(m.output.render("ret"), "Float32(ret[])");
    }

    #[test]
    fn value_types() {
        let m = builtin_entry(BuiltinKind::Bool).marshaling;
        assert_eq!(m.call_repr, "Ref{Cint}");
        assert_eq!(m.output.render("ret"), "Bool(ret[])");

        let m = builtin_entry(BuiltinKind::Variant).marshaling;
        assert_eq!(m.initial_value, "Variant()");
        assert!(m.output.is_identity());

        let m = builtin_entry(BuiltinKind::Vector3i).marshaling;
        assert_eq!(m.initial_value, "Ref{Vector3i}(Vector3i())");

        let m = builtin_entry(BuiltinKind::String).marshaling;
        assert_eq!(m.input.render("s"), "Ref{GodotString}(GodotString(s))");
        assert_eq!(m.output.render("ret"), "String(ret[])");
    }

    #[test]
    fn table_is_complete() {
        assert_eq!(builtin_entries().count(), BuiltinKind::ALL.len());
        assert!(builtin_entry(BuiltinKind::Void).marshaling.input.is_identity());
    }
}
