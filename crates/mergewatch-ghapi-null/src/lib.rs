//! Null driver for GH API.

#![warn(missing_docs)]
#![warn(clippy::all)]

use async_trait::async_trait;
use mergewatch_ghapi_interface::{
    types::{GhChangedFile, GhPullRequest, GhUser},
    ApiService, Result,
};

/// Null API service.
#[derive(Clone, Default)]
pub struct NullApiService {
    _private: (),
}

impl NullApiService {
    /// Build a null API service.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl ApiService for NullApiService {
    #[tracing::instrument(skip(self))]
    async fn pulls_get(&self, owner: &str, name: &str, number: u64) -> Result<GhPullRequest> {
        Ok(GhPullRequest {
            number,
            user: GhUser {
                login: owner.into(),
            },
            ..Default::default()
        })
    }

    #[tracing::instrument(skip(self))]
    async fn pulls_files_list(
        &self,
        owner: &str,
        name: &str,
        _number: u64,
    ) -> Result<Vec<GhChangedFile>> {
        Ok(vec![])
    }
}
