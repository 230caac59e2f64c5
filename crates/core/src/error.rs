use serde::Serialize;

/// Coarse classification of a [`CoreError`], stable across transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    InvalidBatchSize,
    StorageFailure,
    CleanupFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid batch size {batch_size}: {reason}")]
    InvalidBatchSize { batch_size: u64, reason: String },

    /// The asset store rejected or failed the request. `message` is the
    /// store's own diagnostic, unmodified. `cleanup` records a secondary
    /// failure to remove the staged file.
    #[error("Storage failure: {message}")]
    Storage {
        message: String,
        cleanup: Option<String>,
    },

    #[error("Failed to stage asset: {0}")]
    Staging(String),

    /// The staged file could not be removed. When the store call had already
    /// succeeded, `locator` carries its result so the stored asset is not lost.
    #[error("Failed to remove staged asset {path}: {message}")]
    Cleanup {
        path: String,
        message: String,
        locator: Option<String>,
    },
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Validation(_) => ErrorKind::InvalidInput,
            CoreError::InvalidBatchSize { .. } => ErrorKind::InvalidBatchSize,
            CoreError::Storage { .. } | CoreError::Staging(_) => ErrorKind::StorageFailure,
            CoreError::Cleanup { .. } => ErrorKind::CleanupFailure,
        }
    }

    /// The diagnostic message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            CoreError::Validation(msg) | CoreError::Staging(msg) => msg.clone(),
            CoreError::Storage { message, .. } => message.clone(),
            CoreError::InvalidBatchSize { batch_size, reason } => {
                format!("batch size {batch_size}: {reason}")
            }
            CoreError::Cleanup { path, message, .. } => format!("{path}: {message}"),
        }
    }
}
