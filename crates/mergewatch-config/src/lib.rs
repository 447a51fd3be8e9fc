//! Config module.

mod drivers;

use std::{env, str::FromStr};

pub use drivers::{ApiDriver, DriverError, SecretsDriver};

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API driver.
    pub driver: ApiDriver,
    /// GitHub options.
    pub github: ApiGitHubConfig,
}

#[derive(Debug, Clone)]
pub struct ApiGitHubConfig {
    /// GitHub API connect timeout (in milliseconds).
    pub connect_timeout: u64,
    /// GitHub API root URL.
    pub root_url: String,
}

#[derive(Debug, Clone)]
pub struct SecretsConfig {
    /// Secrets driver.
    pub driver: SecretsDriver,
    /// Identifier of the webhook signing secret in the store.
    pub webhook_secret_id: String,
    /// Identifier of the GitHub API token in the store.
    pub github_token_secret_id: String,
    /// Vault options.
    pub vault: SecretsVaultConfig,
}

#[derive(Debug, Clone)]
pub struct SecretsVaultConfig {
    /// Vault root URL.
    pub root_url: String,
    /// Vault access token.
    pub token: String,
    /// Vault KV mount point.
    pub mount: String,
    /// Vault connect timeout (in milliseconds).
    pub connect_timeout: u64,
}

#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry URL.
    pub url: String,
    /// Traces sample rate (between 0 and 1) for Sentry
    pub traces_sample_rate: f32,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind IP.
    pub bind_ip: String,
    /// Server bind port.
    pub bind_port: u16,
    /// Server workers count.
    pub workers_count: Option<u16>,
    /// Disable webhook signature verification.
    pub disable_webhook_signature: bool,
}

/// Webhook receiver configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API options.
    pub api: ApiConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Secrets options.
    pub secrets: SecretsConfig,
    /// Sentry options.
    pub sentry: SentryConfig,
    /// Server options.
    pub server: ServerConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Config {
        Config {
            api: ApiConfig {
                driver: ApiDriver::from_str(&env_to_str("MERGEWATCH_API_DRIVER", "github"))
                    .unwrap(),
                github: ApiGitHubConfig {
                    connect_timeout: env_to_u64("MERGEWATCH_API_GITHUB_CONNECT_TIMEOUT", 5000),
                    root_url: env_to_str(
                        "MERGEWATCH_API_GITHUB_ROOT_URL",
                        "https://api.github.com",
                    ),
                },
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("MERGEWATCH_LOGGING_USE_BUNYAN", false),
            },
            secrets: SecretsConfig {
                driver: SecretsDriver::from_str(&env_to_str("MERGEWATCH_SECRETS_DRIVER", "vault"))
                    .unwrap(),
                webhook_secret_id: env_to_str("MERGEWATCH_WEBHOOK_SECRET_ID", ""),
                github_token_secret_id: env_to_str("MERGEWATCH_GITHUB_TOKEN_SECRET_ID", ""),
                vault: SecretsVaultConfig {
                    root_url: env_to_str("MERGEWATCH_SECRETS_VAULT_ROOT_URL", ""),
                    token: env_to_str("MERGEWATCH_SECRETS_VAULT_TOKEN", ""),
                    mount: env_to_str("MERGEWATCH_SECRETS_VAULT_MOUNT", "secret"),
                    connect_timeout: env_to_u64("MERGEWATCH_SECRETS_VAULT_CONNECT_TIMEOUT", 5000),
                },
            },
            sentry: SentryConfig {
                url: env_to_str("MERGEWATCH_SENTRY_URL", ""),
                traces_sample_rate: env_to_f32("MERGEWATCH_SENTRY_TRACES_SAMPLE_RATE", 0.0),
            },
            server: ServerConfig {
                bind_ip: env_to_str("MERGEWATCH_SERVER_BIND_IP", "127.0.0.1"),
                bind_port: env_to_u16("MERGEWATCH_SERVER_BIND_PORT", 8008),
                workers_count: env_to_optional_u16("MERGEWATCH_SERVER_WORKERS_COUNT", None),
                disable_webhook_signature: env_to_bool(
                    "MERGEWATCH_SERVER_DISABLE_WEBHOOK_SIGNATURE",
                    false,
                ),
            },
            version,
        }
    }

    pub fn from_env_no_version() -> Self {
        Self::from_env("0.0.0".into())
    }
}

fn env_to_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_e| default.to_string())
        .replace("\\n", "\n")
}
