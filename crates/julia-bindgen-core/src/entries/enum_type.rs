//! Enum type entry.
//!
//! Every populated enum also gets a companion type entry so that argument
//! and return slots tagged with the enum resolve like any other type.

use super::EnumEntry;
use crate::{Marshaling, Template};

/// Registry entry for an enum or bit-field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTypeEntry {
    /// Registry key: `Class.Enum` for class enums, the bare name for globals.
    pub name: String,
    /// Julia annotation used for parameters of this type.
    pub target_name: String,
    /// Fully qualified Julia enum name.
    pub qualified_target_name: String,
    /// Declaring class; `None` for global enums.
    pub owner: Option<String>,
    pub is_flags: bool,
    pub marshaling: Marshaling,
}

impl EnumTypeEntry {
    /// Build the companion type for `entry`.
    ///
    /// Plain enums convert the raw integer back to the enum on return.
    /// Bit-fields accept any integer or enum value and return the raw integer,
    /// since combined flags are not members of the enum.
    pub fn new(key: impl Into<String>, owner: Option<String>, entry: &EnumEntry) -> Self {
        let qualified = entry.qualified_target_name.clone();
        let (target_name, output) = if entry.is_flags {
            (
                format!("Union{{Integer, {qualified}}}"),
                Template::wrap("", "[]"),
            )
        } else {
            (qualified.clone(), Template::wrap(format!("{qualified}("), "[])"))
        };

        Self {
            name: key.into(),
            target_name,
            qualified_target_name: qualified,
            owner,
            is_flags: entry.is_flags,
            marshaling: Marshaling::enum_value(output),
        }
    }

    pub fn is_global(&self) -> bool {
        self.owner.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_enum() {
        let e = EnumEntry::new("ProcessMode", "ProcessMode", "NodeInfo.ProcessMode");
        let t = EnumTypeEntry::new("Node.ProcessMode", Some("Node".into()), &e);
        assert_eq!(t.target_name, "NodeInfo.ProcessMode");
        assert_eq!(t.marshaling.output.render("ret"), "NodeInfo.ProcessMode(ret[])");
        assert_eq!(t.marshaling.call_repr, "Ref{Cint}");
        assert!(!t.is_global());
    }

    #[test]
    fn flags_return_raw_integer() {
        let e = EnumEntry::new("KeyModifierMask", "KeyModifierMask", "KeyModifierMask")
            .with_flags(true);
        let t = EnumTypeEntry::new("KeyModifierMask", None, &e);
        assert_eq!(t.target_name, "Union{Integer, KeyModifierMask}");
        assert_eq!(t.marshaling.output.render("ret"), "ret[]");
        assert_eq!(t.marshaling.input.render("m"), "Ref{Cint}(Cint(m))");
        assert!(t.is_global());
    }
}
