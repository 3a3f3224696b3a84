//! Call-boundary marshaling descriptors.
//!
//! Every type that can cross a pointer call carries a [`Marshaling`] record:
//! the declared representation at the boundary, an expression producing a
//! zero-valued return holder, and two single-hole templates converting values
//! in and out. The templates are plain data so they can be tested on their
//! own and swapped per type without touching the emitter.

use std::fmt;

/// A source template with exactly one hole.
///
/// Rendering substitutes an expression for the hole:
///
/// ```
/// use julia_bindgen_core::Template;
///
/// let t = Template::wrap("Ref{Int64}(", ")");
/// assert_eq!(t.render("x"), "Ref{Int64}(x)");
/// assert_eq!(t.to_string(), "Ref{Int64}(%s)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template {
    prefix: String,
    suffix: String,
}

impl Template {
    /// Template that surrounds the hole with `prefix` and `suffix`.
    pub fn wrap(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Template that returns the expression unchanged.
    pub fn identity() -> Self {
        Self::wrap("", "")
    }

    /// Substitute `expr` into the hole.
    pub fn render(&self, expr: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + expr.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(expr);
        out.push_str(&self.suffix);
        out
    }

    pub fn is_identity(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%s{}", self.prefix, self.suffix)
    }
}

/// How a type crosses the pointer-call boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marshaling {
    /// Declared type of the value at the call boundary (e.g. `Ref{Int64}`).
    pub call_repr: String,
    /// Expression producing a zero-valued holder for a return value.
    pub initial_value: String,
    /// Converts a target-language expression into a call-boundary argument.
    pub input: Template,
    /// Converts the call-boundary holder into a target-language value.
    pub output: Template,
}

impl Marshaling {
    pub fn new(
        call_repr: impl Into<String>,
        initial_value: impl Into<String>,
        input: Template,
        output: Template,
    ) -> Self {
        Self {
            call_repr: call_repr.into(),
            initial_value: initial_value.into(),
            input,
            output,
        }
    }

    /// Marshaling for a value held in a `Ref{T}` box.
    ///
    /// `output` receives the holder itself, so scalar outputs usually
    /// dereference it with `[]`.
    pub fn boxed(ref_type: &str, zero: &str, output: Template) -> Self {
        Self::new(
            format!("Ref{{{ref_type}}}"),
            format!("Ref{{{ref_type}}}({zero})"),
            Template::wrap(format!("Ref{{{ref_type}}}("), ")"),
            output,
        )
    }

    /// Marshaling for the no-value return slot.
    pub fn void() -> Self {
        Self::new("Ptr{Nothing}", "C_NULL", Template::identity(), Template::identity())
    }

    /// Marshaling for an enum crossing the boundary as a 32-bit integer.
    ///
    /// `output` converts the raw integer back into the language-level type.
    pub fn enum_value(output: Template) -> Self {
        Self::new(
            "Ref{Cint}",
            "Ref{Cint}(0)",
            Template::wrap("Ref{Cint}(Cint(", "))"),
            output,
        )
    }

    /// Marshaling for an object crossing the boundary as an opaque handle.
    pub fn object_handle(target_name: &str) -> Self {
        Self::new(
            "Ref{Ptr{Nothing}}",
            "Ref{Ptr{Nothing}}(C_NULL)",
            Template::wrap("Ref{Ptr{Nothing}}(getfield(", ", :native_ptr))"),
            Template::wrap(format!("{target_name}("), "[])"),
        )
    }
}
