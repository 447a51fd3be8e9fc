//! GitHub Api wrappers.

use async_trait::async_trait;
use mergewatch_ghapi_interface::{
    types::{GhChangedFile, GhPullRequest},
    ApiService, Result,
};

use crate::metrics::GITHUB_API_CALLS;

/// GitHub Api Service with metrics.
pub struct MetricsApiService {
    inner: Box<dyn ApiService>,
}

impl MetricsApiService {
    /// Creates a new service.
    pub fn new(inner: Box<dyn ApiService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ApiService for MetricsApiService {
    async fn pulls_get(&self, owner: &str, name: &str, number: u64) -> Result<GhPullRequest> {
        GITHUB_API_CALLS.inc();
        self.inner.pulls_get(owner, name, number).await
    }

    async fn pulls_files_list(
        &self,
        owner: &str,
        name: &str,
        number: u64,
    ) -> Result<Vec<GhChangedFile>> {
        GITHUB_API_CALLS.inc();
        self.inner.pulls_files_list(owner, name, number).await
    }
}
