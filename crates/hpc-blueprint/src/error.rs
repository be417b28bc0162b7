//! Error types for the configuration store and blueprint output
//!
//! None of these are fatal: a missing instance is a benign no-op for
//! callers, and export failures only affect the file being written.

use hpc_catalog::CatalogError;
use std::path::PathBuf;

/// Top-level blueprint error
#[derive(Debug, thiserror::Error)]
pub enum BlueprintError {
    /// Catalog lookup failed
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Store mutation failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Export failed
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Session file could not be parsed
    #[error("invalid session file: {0}")]
    InvalidSession(#[from] serde_yaml::Error),
}

/// Configuration store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The instance was removed or never existed
    #[error("instance not found: {0}")]
    InstanceNotFound(String),

    /// The option is not declared by the instance's definition
    #[error("component '{component}' has no option '{option}'")]
    UnknownOption {
        /// Definition id of the instance
        component: String,
        /// Requested option id
        option: String,
    },
}

impl StoreError {
    /// Whether callers may ignore this error
    #[inline]
    #[must_use]
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::InstanceNotFound(_))
    }
}

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The store is empty; there is no document to export
    #[error("nothing configured yet")]
    NothingConfigured,

    /// Writing the file failed
    #[error("failed to write {path}: {source}")]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
