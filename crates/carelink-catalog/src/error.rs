use thiserror::Error;

/// Errors produced by program catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field is missing, or the program name is already taken.
    #[error("{0}")]
    Validation(String),

    /// No program matches the given id.
    #[error("Program not found")]
    NotFound,

    /// Failure from the underlying record store.
    #[error("store error: {0}")]
    Store(#[from] carelink_store::StoreError),
}

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
