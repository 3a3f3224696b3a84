//! Julia bindings generator for Godot-style engines.
//!
//! Reads a host class database, builds a type registry of the bindable API
//! and writes a set of Julia sources that call into the host through
//! pointer calls:
//!
//! - [`host`] - Read-only host collaborators ([`ClassDb`], [`DocDatabase`])
//!   and a JSON-backed implementation
//! - [`populate`] - Walks the host and fills the [`TypeRegistry`]
//! - [`defaults`] - Default argument values as Julia literals
//! - [`emit`] - Renders class files, global constants, interned names and
//!   the include manifest
//! - [`BindingsGenerator`] - One generation run, start to finish
//!
//! # Example
//!
//! ```no_run
//! use julia_bindgen::{BindingsGenerator, GeneratorConfig, JsonClassDb, NoDocs};
//!
//! let db = JsonClassDb::from_path("api.json")?;
//! let mut generator = BindingsGenerator::new(GeneratorConfig::default());
//! generator.initialize(&db, &NoDocs);
//! let summary = generator.generate_sources("Godot.jl/src/generated")?;
//! println!("{} classes", summary.types_emitted);
//! # Ok::<(), julia_bindgen::GenerateError>(())
//! ```

mod config;
pub mod defaults;
pub mod emit;
mod error;
mod generator;
pub mod host;
pub mod populate;

pub use config::GeneratorConfig;
pub use error::{GenerateError, GenerateResult};
pub use generator::{
    BindingsGenerator, CONSTANTS_FILE, CORE_CONSTANTS_FILE, GeneratedFile, GenerationSummary,
    MANIFEST_FILE, STRING_NAMES_FILE,
};
pub use host::{ClassDb, DocDatabase, JsonClassDb, JsonDocDatabase, NoDocs};
pub use populate::{MetadataPopulator, PopulatedApi};

pub use julia_bindgen_registry::{DependencyAnalyzer, TypeRegistry};
