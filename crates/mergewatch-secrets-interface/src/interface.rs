use async_trait::async_trait;

use crate::Result;

/// Secrets store adapter interface
#[mockall::automock]
#[async_trait]
pub trait SecretsService: Send + Sync {
    /// Resolve a secret value from its identifier.
    async fn secret_get(&self, id: &str) -> Result<String>;
}
