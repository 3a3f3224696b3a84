//! Core data model for the Julia bindings generator.
//!
//! This crate holds everything the other generator crates share:
//!
//! - [`entries`] - Registry entries describing builtin, enum and object types
//!   and their members (methods, arguments, properties, enums, constants)
//! - [`TypeRef`] - Lazily resolved reference to a type by name
//! - [`HostValue`] - Tagged host value used for default arguments
//! - [`Marshaling`] / [`Template`] - Table-driven call-boundary conversions
//! - [`BuiltinKind`] - The fixed allow-list of builtin scalar/vector types
//! - Host reflection vocabulary ([`ApiType`], [`VariantType`], [`TypeMeta`],
//!   [`PropertyUsage`], [`MethodFlags`])
//! - Error types for the population and emission phases
//!
//! Entries follow a build-then-freeze lifecycle: they are constructed once while
//! walking the host class database and are only read afterwards.

mod builtin_kind;
pub mod entries;
mod error;
mod host_types;
mod host_value;
mod marshal;
pub mod naming;
mod type_ref;

pub use builtin_kind::BuiltinKind;
pub use entries::{
    ArgumentEntry, BuiltinEntry, ClassDocumentation, ClassEntry, ConstantEntry, DefaultValue,
    EnumEntry, EnumPartition, EnumTypeEntry, MethodEntry, PropertyEntry, TypeEntry, TypeKind,
};
pub use error::{EmitError, PopulateError, RegistrationError};
pub use host_types::{ApiType, MethodFlags, PropertyUsage, TypeMeta, VariantType};
pub use host_value::HostValue;
pub use marshal::{Marshaling, Template};
pub use type_ref::TypeRef;
