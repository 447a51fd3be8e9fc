use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Invalid driver kind: {kind}")]
    InvalidDriverKind { kind: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiDriver {
    Null,
    GitHub,
}

impl FromStr for ApiDriver {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "null" => Ok(Self::Null),
            "github" => Ok(Self::GitHub),
            _ => Err(DriverError::InvalidDriverKind { kind: s.into() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretsDriver {
    Env,
    Vault,
}

impl FromStr for SecretsDriver {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "env" => Ok(Self::Env),
            "vault" => Ok(Self::Vault),
            _ => Err(DriverError::InvalidDriverKind { kind: s.into() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{ApiDriver, SecretsDriver};

    #[test]
    fn test_api_driver_from_str() {
        assert_eq!(ApiDriver::from_str("github").unwrap(), ApiDriver::GitHub);
        assert_eq!(ApiDriver::from_str("Null").unwrap(), ApiDriver::Null);
        assert!(ApiDriver::from_str("nope").is_err());
    }

    #[test]
    fn test_secrets_driver_from_str() {
        assert_eq!(SecretsDriver::from_str("vault").unwrap(), SecretsDriver::Vault);
        assert_eq!(SecretsDriver::from_str("ENV").unwrap(), SecretsDriver::Env);
        assert!(SecretsDriver::from_str("aws").is_err());
    }
}
