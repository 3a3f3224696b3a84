//! Fatal errors of a generation run.
//!
//! Per-member problems are [`PopulateError`](julia_bindgen_core::PopulateError)
//! and [`EmitError`](julia_bindgen_core::EmitError); they are logged and
//! counted, never returned. Everything here stops the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for generator operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// Sources were requested before the generator was initialized.
    #[error("bindings generator is not initialized")]
    Unconfigured,

    #[error("cannot create directory '{path}'")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write file '{path}'")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A host dump could not be read.
    #[error("cannot read '{path}'")]
    ReadHost {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A host dump is not valid.
    #[error("cannot load '{path}'")]
    LoadHost {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl GenerateError {
    /// Whether the error happened while writing output.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            GenerateError::CreateDir { .. } | GenerateError::WriteFile { .. }
        )
    }
}
