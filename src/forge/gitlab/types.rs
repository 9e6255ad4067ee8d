use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProjectInfo {
    pub default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FileInfo {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UserInfo {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct MergeRequestInfo {
    pub iid: u64,
    pub title: String,
    pub description: Option<String>,
    pub author: UserInfo,
    pub web_url: String,
    pub target_branch: String,
    pub sha: Option<String>,
    pub merged_at: Option<String>,
    pub merge_commit_sha: Option<String>,
    pub squash_commit_sha: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Information about a commit associated with a tag or listed on a ref.
#[derive(Debug, Deserialize)]
pub struct GitlabCommit {
    pub id: String,
    pub title: String,
    pub message: String,
    pub created_at: String,
    pub web_url: String,
}

/// Represents a Gitlab release
#[derive(Debug, Deserialize)]
pub struct GitlabRelease {
    pub description: Option<String>,
}

/// Represents a Gitlab project Tag
#[derive(Debug, Deserialize)]
pub struct GitlabTag {
    pub name: String,
    pub commit: GitlabCommit,
    pub release: Option<GitlabRelease>,
}
