use serde::{Deserialize, Serialize};

use super::{GhPullRequest, GhPullRequestAction};
use crate::types::common::{GhRepository, GhUser};

/// GitHub Pull request event.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct GhPullRequestEvent {
    /// Action.
    pub action: GhPullRequestAction,
    /// Number.
    pub number: u64,
    /// Pull request.
    pub pull_request: GhPullRequest,
    /// Repository.
    pub repository: GhRepository,
    /// Sender.
    pub sender: GhUser,
}
