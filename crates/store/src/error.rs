//! Storage error model.

use thiserror::Error;

use campusconnect_core::DomainError;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The persistence layer is unreachable. This is the only error class
    /// that triggers degraded-mode fallbacks; it must never absorb
    /// validation or authorization failures.
    #[error("persistence unavailable: {0}")]
    Unavailable(String),

    /// The document id did not resolve.
    #[error("document not found")]
    NotFound,

    /// A domain rule rejected the mutation; the document was left unchanged.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Backend failure that is neither connectivity nor a domain rule.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
