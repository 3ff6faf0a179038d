use thiserror::Error;

/// Unified error type for spec-sync operations
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Hosting API error: {0}")]
    Api(String),

    #[error("Spec file error: {0}")]
    Spec(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Bump tool error: {0}")]
    Bump(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in spec-sync
pub type Result<T> = std::result::Result<T, SyncError>;

impl SyncError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SyncError::Config(msg.into())
    }

    /// Create a hosting API error with context
    pub fn api(msg: impl Into<String>) -> Self {
        SyncError::Api(msg.into())
    }

    /// Create a spec file error with context
    pub fn spec(msg: impl Into<String>) -> Self {
        SyncError::Spec(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        SyncError::Branch(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        SyncError::Remote(msg.into())
    }

    /// Create a bump tool error with context
    pub fn bump(msg: impl Into<String>) -> Self {
        SyncError::Bump(msg.into())
    }
}
