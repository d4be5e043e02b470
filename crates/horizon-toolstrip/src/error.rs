//! Error types for the toolbar engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by toolbar item operations.
///
/// None of these are fatal: the reconciler logs and skips a failed move, and
/// public mutation methods hand the error back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolbarError {
    /// An item with the same name already exists somewhere in the toolbar.
    #[error("toolbar item '{0}' already exists")]
    DuplicateItem(String),

    /// No item with the given name is owned by the collection.
    #[error("toolbar item '{0}' not found")]
    NotFound(String),

    /// The name belongs to the system-owned overflow trigger.
    #[error("toolbar item name '{0}' is reserved")]
    ReservedItem(String),

    /// An item descriptor could not be turned into an item.
    #[error("invalid item descriptor: {0}")]
    InvalidDescriptor(String),

    /// The toolbar has been torn down.
    #[error("toolbar has been destroyed")]
    Destroyed,
}

/// Result type for toolbar operations.
pub type ToolbarResult<T> = Result<T, ToolbarError>;

/// Errors that can occur while loading a [`ToolbarConfig`](crate::ToolbarConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read toolbar config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML deserialization error.
    #[error("invalid TOML toolbar config: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize toolbar config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error.
    #[error("invalid JSON toolbar config: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither `.toml` nor `.json`.
    #[error("unsupported toolbar config format: '{0}'")]
    UnsupportedFormat(PathBuf),
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
