use serde::{Deserialize, Serialize};

/// GitHub Pull request state.
#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GhPullRequestState {
    /// Open.
    #[default]
    Open,
    /// Closed.
    Closed,
}
