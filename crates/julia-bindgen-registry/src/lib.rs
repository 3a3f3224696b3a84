//! Type registry and dependency ordering for the Julia bindings generator.
//!
//! - [`TypeRegistry`] - Three disjoint maps (builtins, enums, classes) and
//!   reference resolution
//! - [`builtin_entry`] - Static marshaling table for the builtin allow-list
//! - [`DependencyAnalyzer`] - Emission order in which every type follows the
//!   types it depends on

mod builtins;
mod ordering;
mod registry;

pub use builtins::{builtin_entries, builtin_entry};
pub use ordering::{DependencyAnalyzer, DependencyCycle};
pub use registry::TypeRegistry;
