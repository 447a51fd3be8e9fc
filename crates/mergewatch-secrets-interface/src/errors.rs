//! Secrets errors.

use thiserror::Error;

/// Secrets error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum SecretsError {
    /// Unknown secret identifier.
    #[error("Secret '{}' was not found in the store", id)]
    MissingSecret { id: String },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Result alias for `SecretsError`.
pub type Result<T, E = SecretsError> = core::result::Result<T, E>;
