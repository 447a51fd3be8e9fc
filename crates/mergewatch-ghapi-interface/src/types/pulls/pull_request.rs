use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::GhPullRequestState;
use crate::types::common::{GhBranch, GhUser};

/// GitHub Pull request.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPullRequest {
    /// Number.
    pub number: u64,
    /// State.
    pub state: GhPullRequestState,
    /// Title.
    pub title: String,
    /// User.
    pub user: GhUser,
    /// Body.
    pub body: Option<String>,
    /// Merged at.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub merged_at: Option<OffsetDateTime>,
    /// Draft.
    #[serde(default)]
    pub draft: bool,
    /// Head branch.
    pub head: GhBranch,
    /// Base branch.
    pub base: GhBranch,
    /// Merged?
    pub merged: Option<bool>,
}
