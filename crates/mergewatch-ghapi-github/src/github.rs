//! GitHub adapter

use std::sync::Arc;

use async_trait::async_trait;
use mergewatch_config::Config;
use mergewatch_ghapi_interface::{
    types::{GhChangedFile, GhPullRequest},
    ApiService, Result,
};
use mergewatch_secrets_interface::SecretsService;
use reqwest::{Client, StatusCode};

use crate::{
    auth::{build_github_url, get_authenticated_client_builder},
    errors::GitHubError,
};

const FILES_PER_PAGE: u32 = 100;

/// GitHub API adapter implementation.
#[derive(Clone)]
pub struct GithubApiService {
    config: Config,
    secrets_service: Arc<dyn SecretsService>,
}

impl GithubApiService {
    /// Creates new GitHub API adapter.
    pub fn new(config: Config, secrets_service: Arc<dyn SecretsService>) -> Self {
        Self {
            config,
            secrets_service,
        }
    }

    async fn get_client(&self) -> Result<Client> {
        get_authenticated_client_builder(&self.config, self.secrets_service.as_ref())
            .await
            .map_err(GitHubError::into_api_error)?
            .build()
            .map_err(|e| GitHubError::from(e).into_api_error())
    }

    fn build_url(&self, path: String) -> String {
        build_github_url(&self.config, path)
    }
}

#[async_trait]
impl ApiService for GithubApiService {
    #[tracing::instrument(skip(self), ret)]
    async fn pulls_get(&self, owner: &str, name: &str, number: u64) -> Result<GhPullRequest> {
        let response = self
            .get_client()
            .await?
            .get(self.build_url(format!("/repos/{owner}/{name}/pulls/{number}")))
            .send()
            .await
            .map_err(|e| GitHubError::from(e).into_api_error())?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GitHubError::PullRequestNotFound {
                pr_number: number,
                repository_path: format!("{owner}/{name}"),
            }
            .into());
        }

        response
            .error_for_status()
            .map_err(|e| GitHubError::from(e).into_api_error())?
            .json::<GhPullRequest>()
            .await
            .map_err(|e| GitHubError::from(e).into_api_error())
    }

    #[tracing::instrument(skip(self))]
    async fn pulls_files_list(
        &self,
        owner: &str,
        name: &str,
        number: u64,
    ) -> Result<Vec<GhChangedFile>> {
        let client = self.get_client().await?;
        let mut files = Vec::new();
        let mut page = 1_u32;

        loop {
            let chunk: Vec<GhChangedFile> = client
                .get(self.build_url(format!("/repos/{owner}/{name}/pulls/{number}/files")))
                .query(&[("per_page", FILES_PER_PAGE), ("page", page)])
                .send()
                .await
                .map_err(|e| GitHubError::from(e).into_api_error())?
                .error_for_status()
                .map_err(|e| GitHubError::from(e).into_api_error())?
                .json()
                .await
                .map_err(|e| GitHubError::from(e).into_api_error())?;

            let complete = (chunk.len() as u32) < FILES_PER_PAGE;
            files.extend(chunk);

            if complete {
                break;
            }

            page += 1;
        }

        Ok(files)
    }
}
