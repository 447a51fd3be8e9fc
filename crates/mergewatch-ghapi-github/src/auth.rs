//! Auth.

use std::time::Duration;

use mergewatch_config::Config;
use mergewatch_secrets_interface::SecretsService;
use reqwest::{header, ClientBuilder};

use crate::errors::GitHubError;

/// Get an authenticated GitHub client builder.
///
/// The API token is resolved through the secrets store on every call; nothing
/// is cached between invocations.
pub(crate) async fn get_authenticated_client_builder(
    config: &Config,
    secrets_service: &dyn SecretsService,
) -> Result<ClientBuilder, GitHubError> {
    let builder = get_anonymous_client_builder(config);
    let token = get_authentication_credentials(config, secrets_service).await?;

    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| GitHubError::ImplementationError { source: e.into() })?,
    );

    Ok(builder.default_headers(headers))
}

/// Get anonymous GitHub client builder.
pub(crate) fn get_anonymous_client_builder(config: &Config) -> ClientBuilder {
    const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/vnd.github+json"),
    );

    ClientBuilder::new()
        .connect_timeout(Duration::from_millis(config.api.github.connect_timeout))
        .user_agent(format!("mergewatch/{APP_VERSION}"))
        .default_headers(headers)
}

/// Build a GitHub URL.
pub(crate) fn build_github_url<T: Into<String>>(config: &Config, path: T) -> String {
    format!("{}{}", config.api.github.root_url, path.into())
}

async fn get_authentication_credentials(
    config: &Config,
    secrets_service: &dyn SecretsService,
) -> Result<String, GitHubError> {
    secrets_service
        .secret_get(&config.secrets.github_token_secret_id)
        .await
        .map_err(|e| GitHubError::ImplementationError { source: e.into() })
}
