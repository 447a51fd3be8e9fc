use mergewatch_ghapi_interface::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error(transparent)]
    HttpError { source: reqwest::Error },

    #[error(
        "Could not fetch pull request #{} on repository {}",
        pr_number,
        repository_path
    )]
    PullRequestNotFound {
        pr_number: u64,
        repository_path: String,
    },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl GitHubError {
    pub(crate) fn into_api_error(self) -> ApiError {
        self.into()
    }
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        GitHubError::HttpError { source: e }
    }
}

impl From<GitHubError> for ApiError {
    fn from(e: GitHubError) -> Self {
        match e {
            GitHubError::PullRequestNotFound {
                pr_number,
                repository_path,
            } => ApiError::PullRequestNotFound {
                pr_number,
                repository_path,
            },
            e => ApiError::ImplementationError { source: e.into() },
        }
    }
}
