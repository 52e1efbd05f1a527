use thiserror::Error;

/// Errors produced by enrollment ledger operations.
///
/// The referenced-record variants are distinct because `enroll` reports
/// them in a fixed order: a missing client wins over a missing program,
/// and both win over the duplicate check.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The referenced client does not exist.
    #[error("Client not found")]
    ClientNotFound,

    /// The referenced program does not exist.
    #[error("Program not found")]
    ProgramNotFound,

    /// No enrollment matches the given id.
    #[error("Enrollment not found")]
    NotFound,

    /// The (client, program) pair already has an enrollment.
    #[error("Client is already enrolled in this program")]
    AlreadyEnrolled,

    /// A supplied field value is invalid.
    #[error("{0}")]
    Validation(String),

    /// Failure from the underlying record store.
    #[error("store error: {0}")]
    Store(#[from] carelink_store::StoreError),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
