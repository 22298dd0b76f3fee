//! Subsystem error types.

mod retrieval_error;
mod session_error;

pub use retrieval_error::RetrievalError;
pub use session_error::SessionError;

/// Unified error type for the sift workspace.
#[derive(Debug, thiserror::Error)]
pub enum SiftError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type SiftResult<T> = Result<T, SiftError>;
