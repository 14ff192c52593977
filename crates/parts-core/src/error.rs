//! Error taxonomy for the viewers.
//!
//! None of these are fatal to a viewer as a whole: callers log them and keep
//! rendering whatever loaded successfully.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    /// A named asset failed to load; that part is skipped.
    #[error("failed to load {name}: {reason}")]
    LoadFailure { name: String, reason: String },

    /// Stored JSON under `key` could not be parsed; treated as absent.
    #[error("persisted data under {key} is corrupt: {source}")]
    PersistedDataCorrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// An optional asset (e.g. the second connector half) is absent.
    #[error("optional asset {0} is missing")]
    MissingOptionalAsset(String),

    /// The key-value backend rejected a write.
    #[error("storage unavailable for {key}: {reason}")]
    StorageUnavailable { key: String, reason: String },
}

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("OBJ parse error: {0}")]
    Parse(#[from] tobj::LoadError),

    #[error("mesh file contains no triangles")]
    Empty,
}

impl ViewerError {
    pub fn load_failure(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::LoadFailure {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}
