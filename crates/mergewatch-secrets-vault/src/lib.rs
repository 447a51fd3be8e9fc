//! Vault secrets adapter.
//!
//! Reads secret values from a Vault KV v2 mount.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use mergewatch_config::Config;
use mergewatch_secrets_interface::{Result, SecretsError, SecretsService};
use reqwest::{header, Client, ClientBuilder};
use serde::Deserialize;

const VAULT_TOKEN_HEADER: &str = "X-Vault-Token";
const SECRET_VALUE_KEY: &str = "value";

/// Vault KV v2 secrets adapter implementation.
#[derive(Clone)]
pub struct VaultSecretsService {
    config: Config,
}

impl VaultSecretsService {
    /// Creates new Vault secrets adapter.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn get_client(&self) -> Result<Client> {
        const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

        let mut headers = header::HeaderMap::new();
        headers.insert(
            VAULT_TOKEN_HEADER,
            header::HeaderValue::from_str(&self.config.secrets.vault.token).map_err(|e| {
                SecretsError::ImplementationError { source: e.into() }
            })?,
        );

        ClientBuilder::new()
            .connect_timeout(Duration::from_millis(
                self.config.secrets.vault.connect_timeout,
            ))
            .user_agent(format!("mergewatch/{APP_VERSION}"))
            .default_headers(headers)
            .build()
            .map_err(|e| SecretsError::ImplementationError { source: e.into() })
    }

    fn build_url(&self, id: &str) -> String {
        format!(
            "{}/v1/{}/data/{}",
            self.config.secrets.vault.root_url, self.config.secrets.vault.mount, id
        )
    }
}

#[async_trait]
impl SecretsService for VaultSecretsService {
    #[tracing::instrument(skip(self))]
    async fn secret_get(&self, id: &str) -> Result<String> {
        #[derive(Deserialize)]
        struct Response {
            data: DataEnvelope,
        }

        #[derive(Deserialize)]
        struct DataEnvelope {
            data: HashMap<String, String>,
        }

        let response = self
            .get_client()?
            .get(self.build_url(id))
            .send()
            .await
            .map_err(|e| SecretsError::ImplementationError { source: e.into() })?
            .error_for_status()
            .map_err(|e| SecretsError::ImplementationError { source: e.into() })?
            .json::<Response>()
            .await
            .map_err(|e| SecretsError::ImplementationError { source: e.into() })?;

        response
            .data
            .data
            .get(SECRET_VALUE_KEY)
            .cloned()
            .ok_or_else(|| SecretsError::MissingSecret { id: id.into() })
    }
}

#[cfg(test)]
mod tests {
    use mergewatch_config::Config;

    use super::VaultSecretsService;

    #[test]
    fn test_build_url() {
        let mut config = Config::from_env_no_version();
        config.secrets.vault.root_url = "https://vault.example.com".into();
        config.secrets.vault.mount = "secret".into();

        let service = VaultSecretsService::new(config);
        assert_eq!(
            service.build_url("github-webhook-secret"),
            "https://vault.example.com/v1/secret/data/github-webhook-secret"
        );
    }
}
