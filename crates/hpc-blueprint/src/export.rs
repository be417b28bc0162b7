//! Document export

use crate::error::ExportError;
use crate::serializer::is_placeholder;
use std::path::{Path, PathBuf};

/// File name used when the user does not pick one
pub const DEFAULT_EXPORT_FILE: &str = "hpc-config.yaml";

/// Content type of exported documents
pub const EXPORT_MIME_TYPE: &str = "application/x-yaml;charset=utf-8";

/// Write a rendered document to `path`
///
/// # Errors
/// - `ExportError::NothingConfigured` if `document` is the placeholder
/// - `ExportError::Io` if the file cannot be written
pub fn write_document(path: impl AsRef<Path>, document: &str) -> Result<PathBuf, ExportError> {
    if is_placeholder(document) {
        return Err(ExportError::NothingConfigured);
    }

    let path = path.as_ref().to_path_buf();
    std::fs::write(&path, document).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = document.len(), "exported blueprint");
    Ok(path)
}
