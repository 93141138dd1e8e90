//! Error types for pmtrie

use thiserror::Error;

/// Result type alias for pmtrie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pmtrie operations
///
/// The structural variants (`SlotOutOfRange`, `MissingBranch`, `ReservedPath`,
/// `CursorExhausted`) mean the tree or its configuration violates an invariant.
/// They abort the insertion; Store writes already made during that call are
/// not rolled back.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot file: {0}")]
    InvalidFile(String),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Key byte {byte} has no slot in a branch of {slots} slots")]
    SlotOutOfRange { byte: u8, slots: usize },

    #[error("No branch stored at path [{0}]")]
    MissingBranch(String),

    #[error("Path [{0}] is reserved for the root branch")]
    ReservedPath(String),

    #[error("Key exhausted where a branching byte was expected")]
    CursorExhausted,
}

/// Render a path key for error messages and logs
pub(crate) fn display_path(path: &[u8]) -> String {
    path.escape_ascii().to_string()
}
