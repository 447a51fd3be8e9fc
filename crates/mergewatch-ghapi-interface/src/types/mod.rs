//! GitHub wire types.

mod common;
mod ping;
mod pulls;

pub use common::{GhBranch, GhRepository, GhUser};
pub use ping::GhPingEvent;
pub use pulls::{
    GhChangedFile, GhChangedFileStatus, GhPullRequest, GhPullRequestAction, GhPullRequestEvent,
    GhPullRequestState,
};
