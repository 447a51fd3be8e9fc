//! Validation utilities.

use std::fmt::Write;

use mergewatch_config::{ApiDriver, Config, SecretsDriver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push('\n');
        write!(error, "  - Missing env. var.: {}", name).unwrap();
    }

    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "MERGEWATCH_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "MERGEWATCH_SERVER_BIND_PORT");
    }

    // Both secret identifiers are required at startup
    if config.secrets.webhook_secret_id.is_empty() {
        _missing(&mut error, "MERGEWATCH_WEBHOOK_SECRET_ID");
    }
    if config.secrets.github_token_secret_id.is_empty() {
        _missing(&mut error, "MERGEWATCH_GITHUB_TOKEN_SECRET_ID");
    }

    // Check Vault configuration
    if config.secrets.driver == SecretsDriver::Vault {
        if config.secrets.vault.root_url.is_empty() {
            _missing(&mut error, "MERGEWATCH_SECRETS_VAULT_ROOT_URL");
        }
        if config.secrets.vault.token.is_empty() {
            _missing(&mut error, "MERGEWATCH_SECRETS_VAULT_TOKEN");
        }
    }

    // Check GitHub API configuration
    if config.api.driver == ApiDriver::GitHub && config.api.github.root_url.is_empty() {
        _missing(&mut error, "MERGEWATCH_API_GITHUB_ROOT_URL");
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}
