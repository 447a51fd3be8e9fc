use serde::{Deserialize, Serialize};

/// Change status of a file in a pull request.
#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GhChangedFileStatus {
    /// Added.
    Added,
    /// Removed.
    Removed,
    /// Modified.
    #[default]
    Modified,
    /// Renamed.
    Renamed,
    /// Copied.
    Copied,
    /// Changed.
    Changed,
    /// Unchanged.
    Unchanged,
}

/// File changed by a pull request.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct GhChangedFile {
    /// Blob SHA.
    pub sha: String,
    /// File name, relative to the repository root.
    pub filename: String,
    /// Change status.
    pub status: GhChangedFileStatus,
    /// Added lines.
    pub additions: u64,
    /// Removed lines.
    pub deletions: u64,
    /// Total changed lines.
    pub changes: u64,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{GhChangedFile, GhChangedFileStatus};

    #[test]
    fn test_changed_file_parsing() {
        let payload = r#"{
            "sha": "bbcd538c8e72b8c175046e27cc8f907076331401",
            "filename": "file1.txt",
            "status": "added",
            "additions": 103,
            "deletions": 21,
            "changes": 124,
            "blob_url": "https://github.com/octocat/Hello-World/blob/6dcb09b/file1.txt"
        }"#;

        assert_eq!(
            serde_json::from_str::<GhChangedFile>(payload).unwrap(),
            GhChangedFile {
                sha: "bbcd538c8e72b8c175046e27cc8f907076331401".into(),
                filename: "file1.txt".into(),
                status: GhChangedFileStatus::Added,
                additions: 103,
                deletions: 21,
                changes: 124,
            }
        );
    }
}
