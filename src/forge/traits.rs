//! Traits related to the remote forge
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    analyzer::release::{ChangeEntry, Tag},
    forge::{
        config::RemoteConfig,
        request::{
            CreateBranchRequest, CreatePrRequest, CreateTagRequest,
            ForgeCommit, GetFileContentRequest, ListCommitsRequest,
            PullRequest, UpdateFileRequest,
        },
    },
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;
    fn default_branch(&self) -> String;
    /// All tags of the project, newest first.
    async fn list_tags(&self) -> Result<Vec<Tag>>;
    async fn get_tag(&self, name: &str) -> Result<Option<Tag>>;
    /// Merged merge requests updated after the given time. Entries merged
    /// before that time are left out.
    async fn list_merge_requests(
        &self,
        updated_after: DateTime<Utc>,
    ) -> Result<Vec<ChangeEntry>>;
    async fn get_merge_request(&self, iid: u64) -> Result<ChangeEntry>;
    /// Commits reachable from a ref, newest first.
    async fn list_commits(
        &self,
        req: ListCommitsRequest,
    ) -> Result<Vec<ForgeCommit>>;
    /// Content of a file, or `None` when it does not exist at that ref.
    async fn get_file_content(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Option<String>>;
    /// Commits new file content, creating the file when `req.create` is set.
    async fn update_file(&self, req: UpdateFileRequest) -> Result<()>;
    /// Creates a branch. A branch that already exists is not an error.
    async fn create_branch(&self, req: CreateBranchRequest) -> Result<()>;
    async fn create_tag(&self, req: CreateTagRequest) -> Result<()>;
    /// Creates the release of an existing tag, or replaces the description
    /// of the release already published for it.
    async fn upsert_release(&self, tag: &str, description: &str) -> Result<()>;
    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest>;
    async fn accept_pr(&self, number: u64) -> Result<PullRequest>;
}
