//! Enum and constant blocks.

use std::fmt;

use julia_bindgen_core::{ConstantEntry, EnumEntry};

/// An `@enum` declaration with its aliases and member docs.
///
/// Canonical members are declared in the enum; members sharing a value with
/// an earlier one become plain bindings to the canonical name.
#[derive(Debug, Clone, Copy)]
pub struct EnumBlock<'a>(pub &'a EnumEntry);

impl fmt::Display for EnumBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.0;
        let partition = entry.partition();

        if entry.fits_i32() {
            writeln!(f, "@enum {} begin", entry.target_name)?;
        } else {
            writeln!(f, "@enum {}::Int64 begin", entry.target_name)?;
        }
        for constant in &partition.canonical {
            writeln!(f, "{} = {}", constant.name, constant.value)?;
        }
        writeln!(f, "end")?;

        for (alias, canonical) in &partition.aliases {
            writeln!(f, "{} = {}", alias.name, canonical.name)?;
        }

        for constant in &entry.constants {
            if let Some(doc) = &constant.doc {
                writeln!(f, "@doc raw\"\"\"{doc}\"\"\"")?;
                writeln!(f, "{}", constant.name)?;
            }
        }
        writeln!(f)
    }
}

/// A plain integer constant.
#[derive(Debug, Clone, Copy)]
pub struct ConstantBlock<'a> {
    pub constant: &'a ConstantEntry,
    /// Declare with `const` (module top level).
    pub is_const: bool,
}

impl fmt::Display for ConstantBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constant = self.constant;
        if let Some(doc) = &constant.doc {
            writeln!(f, "@doc raw\"\"\"{doc}\"\"\"")?;
        }
        if self.is_const {
            write!(f, "const ")?;
        }
        writeln!(f, "{} = {}", constant.name, constant.value)?;
        writeln!(f)
    }
}
