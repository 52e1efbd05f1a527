use thiserror::Error;

/// Errors produced by client registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A required field is missing or a supplied value is invalid.
    #[error("{0}")]
    Validation(String),

    /// No client matches the given id.
    #[error("Client not found")]
    NotFound,

    /// Failure from the underlying record store.
    #[error("store error: {0}")]
    Store(#[from] carelink_store::StoreError),
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
