use std::str::FromStr;

use thiserror::Error;

/// Type error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum RepositoryPathError {
    /// Invalid repository path.
    #[error("Invalid repository path: {}", path)]
    InvalidRepositoryPath { path: String },
}

/// Repository path, in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPath {
    owner: String,
    name: String,
}

impl RepositoryPath {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepositoryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.owner, self.name))
    }
}

impl From<(&str, &str)> for RepositoryPath {
    fn from((owner, name): (&str, &str)) -> Self {
        Self::new(owner, name)
    }
}

impl FromStr for RepositoryPath {
    type Err = RepositoryPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.try_into()
    }
}

impl TryFrom<&str> for RepositoryPath {
    type Error = RepositoryPathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self::new(owner, name))
            }
            _ => Err(RepositoryPathError::InvalidRepositoryPath {
                path: value.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RepositoryPath;

    #[test]
    fn test_try_from_valid() {
        let path = RepositoryPath::try_from("Example/test-repo").unwrap();
        assert_eq!(path.owner(), "Example");
        assert_eq!(path.name(), "test-repo");
        assert_eq!(path.full_name(), "Example/test-repo");
    }

    #[test]
    fn test_try_from_invalid() {
        assert!(RepositoryPath::try_from("noslash").is_err());
        assert!(RepositoryPath::try_from("owner/").is_err());
        assert!(RepositoryPath::try_from("/name").is_err());
        assert!(RepositoryPath::try_from("a/b/c").is_err());
    }
}
