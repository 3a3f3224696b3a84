//! Error types for the bindings generator.
//!
//! The generator distinguishes recoverable errors, which are reported and
//! then contained at the smallest enclosing unit (argument, method, property
//! or class), from fatal errors that abort a run.
//!
//! ## Error Hierarchy
//!
//! ```text
//! RegistrationError - Type registry insertion errors
//! PopulateError     - Per-member failures while reading the host class database
//! EmitError         - Per-member failures while rendering source text
//! ```
//!
//! Fatal I/O errors live next to the orchestration code in the root crate.

use thiserror::Error;

use crate::{HostValue, VariantType};

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised by the type registry while entries are being inserted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A type with this name already exists in the target map.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// A class was registered before its parent.
    #[error("class '{class}' registered before its parent '{parent}'")]
    UnknownParent {
        /// The class being registered.
        class: String,
        /// The parent that is not yet known.
        parent: String,
    },
}

// ============================================================================
// Population Errors
// ============================================================================

/// Failures while populating entries from the host class database.
///
/// Each variant names the unit that gets dropped: a whole method, a single
/// property or a single constant. None of them abort population.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PopulateError {
    /// An argument or return type is outside the supported allow-list.
    #[error("method '{class}.{method}' uses unsupported type '{variant_type}'")]
    UnsupportedType {
        class: String,
        method: String,
        variant_type: VariantType,
    },

    /// The host reported a method without a name.
    #[error("class '{class}' reports a method with an empty name")]
    EmptyMethodName { class: String },

    /// Static methods are not bound.
    #[error("method '{class}.{method}' is static")]
    StaticMethod { class: String, method: String },

    /// Virtual methods are not bound.
    #[error("method '{class}.{method}' is virtual")]
    VirtualMethod { class: String, method: String },

    /// Vararg methods are not bound.
    #[error("method '{class}.{method}' is vararg")]
    VarargMethod { class: String, method: String },

    /// A default argument value could not be turned into a source literal.
    #[error(
        "cannot determine default value for argument '{argument}' of method '{class}.{method}': {value:?}"
    )]
    UnsupportedDefault {
        class: String,
        method: String,
        argument: String,
        value: HostValue,
    },

    /// The host reported an invalid property index.
    #[error("invalid property: '{class}.{property}'")]
    InvalidPropertyIndex { class: String, property: String },

    /// An enum listed a constant that has no value.
    #[error("failed to find value of constant {class}::{constant}")]
    MissingConstantValue { class: String, constant: String },

    /// No admitted ancestor was found for a non-root class.
    #[error("class '{class}' has no admitted ancestor (parent '{parent}')")]
    UnknownParent { class: String, parent: String },
}

impl PopulateError {
    /// Whether this is a support-policy rejection rather than a failure.
    ///
    /// Policy rejections are expected for every host and are logged quietly.
    pub fn is_policy(&self) -> bool {
        matches!(
            self,
            PopulateError::EmptyMethodName { .. }
                | PopulateError::StaticMethod { .. }
                | PopulateError::VirtualMethod { .. }
                | PopulateError::VarargMethod { .. }
                | PopulateError::UnsupportedType { .. }
        )
    }
}

// ============================================================================
// Emission Errors
// ============================================================================

/// Failures while rendering a single member of a generated file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// A type reference did not resolve against the registry.
    #[error("{owner}.{member}: type not found: {type_name}")]
    UnresolvedType {
        owner: String,
        member: String,
        type_name: String,
    },

    /// A class names a parent that is not in the registry.
    #[error("class '{class}' has unknown parent '{parent}'")]
    MissingParent { class: String, parent: String },
}
