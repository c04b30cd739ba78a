//! Error types for stack construction and synthesis

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stack operations
pub type Result<T> = std::result::Result<T, StackError>;

/// Errors that can occur while building or synthesizing a stack
#[derive(Debug, Error)]
pub enum StackError {
    /// An id does not satisfy the naming rules of its scope
    #[error("Invalid {kind} id '{id}': {reason}")]
    InvalidId {
        /// What the id names ("stack" or "logical")
        kind: &'static str,
        id: String,
        reason: String,
    },

    /// An id is already taken within its scope
    #[error("Duplicate id '{id}' in scope '{scope}'")]
    DuplicateId { scope: String, id: String },

    /// A reference points to a logical id the stack does not contain
    #[error("Resource '{from}' references '{target}', which does not exist in stack '{stack}'")]
    DanglingReference {
        stack: String,
        from: String,
        target: String,
    },

    /// A reference points to a resource of the wrong type
    #[error("Resource '{from}' expects '{target}' to be {expected}, found {found}")]
    KindMismatch {
        from: String,
        target: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A reference was created by a different stack
    #[error("Resource '{from}' in stack '{stack}' references '{target}' owned by stack '{owner}'")]
    CrossStackReference {
        stack: String,
        from: String,
        target: String,
        owner: String,
    },

    /// Failed to render a template or manifest
    #[error("Failed to serialize: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to write the cloud assembly
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StackError {
    /// Create an I/O error tagged with the path being accessed
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if this error comes from reference validation
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            Self::DanglingReference { .. }
                | Self::KindMismatch { .. }
                | Self::CrossStackReference { .. }
        )
    }
}
