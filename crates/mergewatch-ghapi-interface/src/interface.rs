use async_trait::async_trait;

use crate::{
    types::{GhChangedFile, GhPullRequest},
    Result,
};

/// GitHub API Adapter interface
#[mockall::automock]
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Get a pull request from its number.
    async fn pulls_get(&self, owner: &str, name: &str, number: u64) -> Result<GhPullRequest>;
    /// List the files changed by a pull request.
    async fn pulls_files_list(
        &self,
        owner: &str,
        name: &str,
        number: u64,
    ) -> Result<Vec<GhChangedFile>>;
}
