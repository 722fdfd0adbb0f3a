use thiserror::Error;

/// Top-level error type for lull.
#[derive(Debug, Error)]
pub enum LullError {
    /// Error from the completion capability.
    #[error("completion error: {0}")]
    Completion(String),

    /// Error from the send capability.
    #[error("send error: {0}")]
    Send(String),

    /// Error from the aggregation store or its backing cache.
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
