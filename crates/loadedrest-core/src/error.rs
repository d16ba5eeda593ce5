//! Error types for the LoadedRest core.

/// Core error type for LoadedRest infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum LoadedRestError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for LoadedRest operations.
pub type LoadedRestResult<T> = Result<T, LoadedRestError>;
