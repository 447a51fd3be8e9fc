use serde::{Deserialize, Serialize};

/// GitHub Pull request action.
///
/// Actions GitHub may add in the future deserialize into [`Self::Other`], so
/// that an unrecognized action classifies as a non-merge event instead of a
/// parse failure.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GhPullRequestAction {
    /// Assigned.
    #[default]
    Assigned,
    /// Closed.
    Closed,
    /// Converted to draft.
    ConvertedToDraft,
    /// Edited.
    Edited,
    /// Labeled.
    Labeled,
    /// Locked.
    Locked,
    /// Opened.
    Opened,
    /// Reopened.
    Reopened,
    /// Ready for review.
    ReadyForReview,
    /// Review requested.
    ReviewRequested,
    /// Review request removed.
    ReviewRequestRemoved,
    /// Synchronize.
    Synchronize,
    /// Unassigned.
    Unassigned,
    /// Unlabeled.
    Unlabeled,
    /// Unlocked.
    Unlocked,
    /// Any other action.
    #[serde(other)]
    Other,
}
