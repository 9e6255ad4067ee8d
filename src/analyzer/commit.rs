use regex::Regex;
use std::sync::LazyLock;

/// Trailer GitLab appends to merge commit messages.
static MERGE_REQUEST_TRAILER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n\nSee merge request .+!(\d+)$").unwrap()
});

/// Extracts the merge request iid from a GitLab merge commit message.
///
/// Returns `None` for commits that were not created by merging a merge
/// request.
pub fn merge_request_iid(message: &str) -> Option<u64> {
    MERGE_REQUEST_TRAILER_REGEX
        .captures(message.trim_end())
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
