//! Secrets store wrappers.

use async_trait::async_trait;
use mergewatch_secrets_interface::{Result, SecretsService};

use crate::metrics::SECRETS_STORE_CALLS;

/// Secrets service with metrics.
pub struct MetricsSecretsService {
    inner: Box<dyn SecretsService>,
}

impl MetricsSecretsService {
    /// Creates a new service.
    pub fn new(inner: Box<dyn SecretsService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl SecretsService for MetricsSecretsService {
    async fn secret_get(&self, id: &str) -> Result<String> {
        SECRETS_STORE_CALLS.inc();
        self.inner.secret_get(id).await
    }
}
