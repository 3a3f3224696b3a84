//! Registry entry types.
//!
//! This module provides the entry types used in the type registry:
//!
//! - [`TypeEntry`] - Unified enum wrapping all type entries
//! - [`BuiltinEntry`] - Builtin scalar and value types
//! - [`EnumTypeEntry`] - Companion type for an enum, used to resolve signatures
//! - [`ClassEntry`] - Object (class) types with all their members
//!
//! Member types:
//! - [`EnumEntry`], [`ConstantEntry`] - Enums and integer constants
//! - [`MethodEntry`], [`ArgumentEntry`], [`DefaultValue`] - Bound methods
//! - [`PropertyEntry`] - Properties backed by accessor methods

mod builtin;
mod class;
mod common;
mod enum_entry;
mod enum_type;
mod method;
mod type_entry;

pub use builtin::BuiltinEntry;
pub use class::{ClassDocumentation, ClassEntry};
pub use common::{ConstantEntry, PropertyEntry};
pub use enum_entry::{EnumEntry, EnumPartition};
pub use enum_type::EnumTypeEntry;
pub use method::{ArgumentEntry, DefaultValue, MethodEntry};
pub use type_entry::{TypeEntry, TypeKind};
