//! Enum entry.
//!
//! This module provides `EnumEntry` for enumerations declared by a class or
//! by the global scope.

use rustc_hash::FxHashMap;

use super::ConstantEntry;

/// An enumeration and its member constants, in declaration order.
///
/// Two entries are equal when their host names are equal; global constants
/// are merged into enums by that identity.
#[derive(Debug, Clone)]
pub struct EnumEntry {
    /// Host name (e.g. `ProcessMode` or `Variant.Type`).
    pub name: String,
    /// Julia name inside its declaring module.
    pub target_name: String,
    /// Julia name used from method signatures (e.g. `NodeInfo.ProcessMode`).
    pub qualified_target_name: String,
    /// Bit-field enum; values may be combined.
    pub is_flags: bool,
    pub constants: Vec<ConstantEntry>,
}

/// Constants of one enum split by value.
///
/// The first constant seen for a value is canonical; later constants with the
/// same value are aliases of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumPartition<'a> {
    pub canonical: Vec<&'a ConstantEntry>,
    /// `(alias, canonical)` pairs in declaration order.
    pub aliases: Vec<(&'a ConstantEntry, &'a ConstantEntry)>,
}

impl PartialEq for EnumEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EnumEntry {}

impl EnumEntry {
    pub fn new(
        name: impl Into<String>,
        target_name: impl Into<String>,
        qualified_target_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target_name: target_name.into(),
            qualified_target_name: qualified_target_name.into(),
            is_flags: false,
            constants: Vec::new(),
        }
    }

    pub fn with_flags(mut self, is_flags: bool) -> Self {
        self.is_flags = is_flags;
        self
    }

    /// Add a constant to the enum.
    pub fn with_constant(mut self, constant: ConstantEntry) -> Self {
        self.constants.push(constant);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    /// Look up a value by name.
    pub fn get_value(&self, name: &str) -> Option<i64> {
        self.constants.iter().find(|c| c.name == name).map(|c| c.value)
    }

    /// Look up the canonical name for a value.
    pub fn get_name(&self, value: i64) -> Option<&str> {
        self.constants
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.name.as_str())
    }

    /// Split the constants into canonical entries and aliases.
    pub fn partition(&self) -> EnumPartition<'_> {
        let mut by_value: FxHashMap<i64, &ConstantEntry> = FxHashMap::default();
        let mut canonical = Vec::new();
        let mut aliases = Vec::new();

        for constant in &self.constants {
            match by_value.get(&constant.value) {
                Some(first) => aliases.push((constant, *first)),
                None => {
                    by_value.insert(constant.value, constant);
                    canonical.push(constant);
                }
            }
        }

        EnumPartition { canonical, aliases }
    }

    /// Whether every value fits the default 32-bit enum base type.
    pub fn fits_i32(&self) -> bool {
        self.constants
            .iter()
            .all(|c| i32::try_from(c.value).is_ok())
    }
}
