//! Environment driver for the secrets store.
//!
//! Resolves secret identifiers as environment variables. Meant for local
//! development and tests, not production deployments.

#![warn(missing_docs)]
#![warn(clippy::all)]

use async_trait::async_trait;
use mergewatch_secrets_interface::{Result, SecretsError, SecretsService};

/// Environment-backed secrets service.
#[derive(Clone, Default)]
pub struct EnvSecretsService {
    _private: (),
}

impl EnvSecretsService {
    /// Build an environment-backed secrets service.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl SecretsService for EnvSecretsService {
    #[tracing::instrument(skip(self))]
    async fn secret_get(&self, id: &str) -> Result<String> {
        std::env::var(id).map_err(|_| SecretsError::MissingSecret { id: id.into() })
    }
}
