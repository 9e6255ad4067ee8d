use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Merge request information returned when creating or accepting one.
pub struct PullRequest {
    pub number: u64,
    pub sha: String,
    pub web_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to create a new merge request.
pub struct CreatePrRequest {
    pub head_branch: String,
    pub base_branch: String,
    pub title: String,
    pub body: String,
    /// Delete the source branch once the merge request is merged.
    pub remove_source_branch: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to list the commits reachable from a ref.
pub struct ListCommitsRequest {
    pub ref_name: String,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to read a repository file.
pub struct GetFileContentRequest {
    pub path: String,
    /// Branch, tag or commit to read from.
    pub ref_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to commit new content of a repository file.
pub struct UpdateFileRequest {
    pub path: String,
    pub branch: String,
    pub message: String,
    pub content: String,
    /// The file does not exist on the branch yet and has to be created.
    pub create: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to create a branch.
pub struct CreateBranchRequest {
    pub branch: String,
    /// Branch, tag or commit the branch starts from.
    pub ref_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to create a tag, optionally with a release attached.
pub struct CreateTagRequest {
    pub tag_name: String,
    /// Branch, tag or commit to tag.
    pub ref_name: String,
    /// Annotation message; a lightweight tag is created without one.
    pub message: Option<String>,
    pub release_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Represents a commit returned from the forge
pub struct ForgeCommit {
    pub id: String,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub link: String,
}
