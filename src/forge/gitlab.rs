//! Implements the Forge trait for Gitlab
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use gitlab::{
    AsyncGitlab, GitlabBuilder, RestError,
    api::{
        ApiError, AsyncQuery, Pagination, ignore,
        merge_requests::MergeRequestState,
        paged,
        projects::{
            Project,
            merge_requests::{
                CreateMergeRequest, MergeMergeRequest, MergeRequest,
                MergeRequests,
            },
            releases::CreateRelease,
            repository::{
                branches::CreateBranch,
                files::{CreateFile, Encoding, File},
                tags::{CreateTag, Tags, TagsOrderBy},
            },
        },
    },
};
use log::*;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use std::{future::Future, time::Duration};

use crate::{
    Result,
    analyzer::release::{ChangeEntry, Tag},
    error::WalleError,
    forge::{
        config::{
            INITIAL_RETRY_DELAY_SECS, MAX_RETRY_ATTEMPTS, MAX_RETRY_DELAY_SECS,
            RemoteConfig,
        },
        request::{
            CreateBranchRequest, CreatePrRequest, CreateTagRequest,
            ForgeCommit, GetFileContentRequest, ListCommitsRequest,
            PullRequest, UpdateFileRequest,
        },
        traits::Forge,
    },
};

pub mod endpoints;
mod types;

use endpoints::{
    ProjectTag, RepositoryCommits, UpdateRelease, UpdateRepositoryFile,
};
use types::{
    FileInfo, GitlabCommit, GitlabTag, MergeRequestInfo, ProjectInfo,
};

type ApiResult<T> = std::result::Result<T, ApiError<RestError>>;

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

/// Whether a failed request is worth sending again: server side failures
/// and connection problems are, anything the server rejected is not.
fn is_transient(err: &ApiError<RestError>) -> bool {
    match err {
        ApiError::GitlabWithStatus { status, .. } => status.is_server_error(),
        ApiError::Client { .. } => true,
        _ => false,
    }
}

fn is_not_found(err: &ApiError<RestError>) -> bool {
    matches!(
        err,
        ApiError::GitlabWithStatus { status, .. } if *status == StatusCode::NOT_FOUND
    )
}

fn to_change_entry(mr: MergeRequestInfo) -> Result<ChangeEntry> {
    let merged_at = match mr.merged_at.as_deref() {
        Some(value) => Some(parse_timestamp(value)?),
        None => None,
    };

    Ok(ChangeEntry {
        title: mr.title,
        author: mr.author.username,
        reference: mr.iid,
        url: mr.web_url,
        target_branch: mr.target_branch,
        merged_at,
        // fast-forward merges with squashing leave no merge commit behind
        merge_commit_sha: mr.merge_commit_sha.or(mr.squash_commit_sha),
        labels: mr.labels,
        description: mr.description.unwrap_or_default(),
    })
}

fn to_tag(tag: GitlabTag) -> Result<Tag> {
    Ok(Tag {
        created_at: parse_timestamp(&tag.commit.created_at)?,
        name: tag.name,
        sha: tag.commit.id,
        release_notes: tag.release.and_then(|r| r.description),
    })
}

fn to_forge_commit(commit: GitlabCommit) -> Result<ForgeCommit> {
    Ok(ForgeCommit {
        created_at: parse_timestamp(&commit.created_at)?,
        id: commit.id,
        title: commit.title,
        message: commit.message,
        link: commit.web_url,
    })
}

fn to_pull_request(mr: MergeRequestInfo) -> PullRequest {
    PullRequest {
        number: mr.iid,
        sha: mr.sha.unwrap_or_default(),
        web_url: mr.web_url,
    }
}

pub struct Gitlab {
    config: RemoteConfig,
    gl: AsyncGitlab,
    project_id: String,
    default_branch: String,
}

impl Gitlab {
    pub async fn new(config: RemoteConfig) -> Result<Self> {
        let project_id = config.project.clone();

        let token = config.token.expose_secret();

        let mut builder = GitlabBuilder::new(config.authority(), token);

        if config.scheme == "http" {
            builder.insecure();
        }

        let gl = builder.build_async().await?;

        let endpoint = Project::builder().project(&project_id).build()?;
        let project: ProjectInfo = endpoint.query_async(&gl).await?;

        let default_branch = project.default_branch.ok_or_else(|| {
            WalleError::forge(format!("project {project_id} has no default branch"))
        })?;

        debug!("connected to {}", config.project_url());

        Ok(Self {
            config,
            gl,
            project_id,
            default_branch,
        })
    }

    /// Runs a request, sending it again with exponential backoff while it
    /// fails transiently.
    async fn with_retry<T, F, Fut>(&self, op: F) -> ApiResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let max_delay = Duration::from_secs(MAX_RETRY_DELAY_SECS);
        let mut delay = Duration::from_secs(INITIAL_RETRY_DELAY_SECS);
        let mut attempt = 1;

        loop {
            match op().await {
                Err(err) if attempt < MAX_RETRY_ATTEMPTS && is_transient(&err) => {
                    warn!(
                        "request failed on attempt {attempt}/{MAX_RETRY_ATTEMPTS}, retrying in {}s: {err}",
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(max_delay);
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

#[async_trait]
impl Forge for Gitlab {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    fn default_branch(&self) -> String {
        self.default_branch.clone()
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        let endpoint = Tags::builder()
            .project(&self.project_id)
            .order_by(TagsOrderBy::Updated)
            .build()?;
        let endpoint = paged(endpoint, Pagination::All);

        let tags: Vec<GitlabTag> =
            self.with_retry(|| endpoint.query_async(&self.gl)).await?;

        debug!("found {} tags", tags.len());

        tags.into_iter().map(to_tag).collect()
    }

    async fn get_tag(&self, name: &str) -> Result<Option<Tag>> {
        let endpoint = ProjectTag::builder()
            .project(self.project_id.as_str())
            .tag_name(name)
            .build()?;

        let result: ApiResult<GitlabTag> =
            self.with_retry(|| endpoint.query_async(&self.gl)).await;

        match result {
            Ok(tag) => Ok(Some(to_tag(tag)?)),
            Err(err) if is_not_found(&err) => {
                debug!("tag {name} does not exist");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn list_merge_requests(
        &self,
        updated_after: DateTime<Utc>,
    ) -> Result<Vec<ChangeEntry>> {
        let endpoint = MergeRequests::builder()
            .project(&self.project_id)
            .state(MergeRequestState::Merged)
            .updated_after(updated_after)
            .build()?;
        let endpoint = paged(endpoint, Pagination::All);

        let merge_requests: Vec<MergeRequestInfo> =
            self.with_retry(|| endpoint.query_async(&self.gl)).await?;

        let total = merge_requests.len();
        let mut entries = vec![];

        for mr in merge_requests {
            let entry = to_change_entry(mr)?;
            // updated_after also matches merge requests touched after
            // being merged earlier
            if entry.merged_at.is_some_and(|m| m < updated_after) {
                continue;
            }
            entries.push(entry);
        }

        debug!(
            "{} of {total} merge requests merged after {updated_after}",
            entries.len()
        );

        Ok(entries)
    }

    async fn get_merge_request(&self, iid: u64) -> Result<ChangeEntry> {
        let endpoint = MergeRequest::builder()
            .project(&self.project_id)
            .merge_request(iid)
            .build()?;

        let mr: MergeRequestInfo =
            self.with_retry(|| endpoint.query_async(&self.gl)).await?;

        to_change_entry(mr)
    }

    async fn list_commits(
        &self,
        req: ListCommitsRequest,
    ) -> Result<Vec<ForgeCommit>> {
        let endpoint = RepositoryCommits::builder()
            .project(self.project_id.as_str())
            .ref_name(req.ref_name.as_str())
            .since(req.since.map(|t| t.to_rfc3339()))
            .until(req.until.map(|t| t.to_rfc3339()))
            .build()?;
        let endpoint = paged(endpoint, Pagination::All);

        let commits: Vec<GitlabCommit> =
            self.with_retry(|| endpoint.query_async(&self.gl)).await?;

        debug!("found {} commits on {}", commits.len(), req.ref_name);

        commits.into_iter().map(to_forge_commit).collect()
    }

    async fn get_file_content(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Option<String>> {
        let endpoint = File::builder()
            .project(&self.project_id)
            .file_path(&req.path)
            .ref_(&req.ref_name)
            .build()?;

        let result: ApiResult<FileInfo> =
            self.with_retry(|| endpoint.query_async(&self.gl)).await;

        match result {
            Ok(file) => {
                let decoded = STANDARD.decode(file.content.replace('\n', ""))?;
                Ok(Some(String::from_utf8(decoded)?))
            }
            Err(err) if is_not_found(&err) => {
                debug!("{} not found at {}", req.path, req.ref_name);
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update_file(&self, req: UpdateFileRequest) -> Result<()> {
        if req.create {
            let endpoint = CreateFile::builder()
                .project(&self.project_id)
                .file_path(&req.path)
                .branch(&req.branch)
                .content(req.content.as_bytes())
                .commit_message(&req.message)
                .encoding(Encoding::Text)
                .build()?;
            let endpoint = ignore(endpoint);

            self.with_retry(|| endpoint.query_async(&self.gl)).await?;

            info!("created {} on {}", req.path, req.branch);

            return Ok(());
        }

        let endpoint = UpdateRepositoryFile::builder()
            .project(self.project_id.as_str())
            .file_path(req.path.as_str())
            .branch(req.branch.as_str())
            .content(req.content.as_str())
            .commit_message(req.message.as_str())
            .build()?;
        let endpoint = ignore(endpoint);

        self.with_retry(|| endpoint.query_async(&self.gl)).await?;

        info!("updated {} on {}", req.path, req.branch);

        Ok(())
    }

    async fn create_branch(&self, req: CreateBranchRequest) -> Result<()> {
        let endpoint = CreateBranch::builder()
            .project(&self.project_id)
            .branch(&req.branch)
            .ref_(&req.ref_name)
            .build()?;
        let endpoint = ignore(endpoint);

        match self.with_retry(|| endpoint.query_async(&self.gl)).await {
            Ok(()) => {
                info!("created branch {} from {}", req.branch, req.ref_name);
                Ok(())
            }
            Err(ApiError::GitlabWithStatus { msg, .. })
                if msg.contains("already exists") =>
            {
                warn!("branch {} already exists", req.branch);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn create_tag(&self, req: CreateTagRequest) -> Result<()> {
        let mut builder = CreateTag::builder();

        builder
            .project(&self.project_id)
            .tag_name(&req.tag_name)
            .ref_(&req.ref_name);

        if let Some(message) = &req.message {
            builder.message(message);
        }

        let endpoint = ignore(builder.build()?);

        self.with_retry(|| endpoint.query_async(&self.gl)).await?;

        info!("created tag {} at {}", req.tag_name, req.ref_name);

        if let Some(description) = &req.release_description {
            let endpoint = CreateRelease::builder()
                .project(&self.project_id)
                .tag_name(&req.tag_name)
                .name(&req.tag_name)
                .description(description)
                .build()?;
            let endpoint = ignore(endpoint);

            self.with_retry(|| endpoint.query_async(&self.gl)).await?;

            info!("published release for {}", req.tag_name);
        }

        Ok(())
    }

    async fn upsert_release(&self, tag: &str, description: &str) -> Result<()> {
        let endpoint = ProjectTag::builder()
            .project(self.project_id.as_str())
            .tag_name(tag)
            .build()?;

        let existing: GitlabTag =
            self.with_retry(|| endpoint.query_async(&self.gl)).await?;

        if existing.release.is_some() {
            let endpoint = UpdateRelease::builder()
                .project(self.project_id.as_str())
                .tag_name(tag)
                .description(description)
                .build()?;
            let endpoint = ignore(endpoint);

            self.with_retry(|| endpoint.query_async(&self.gl)).await?;

            info!("updated release for {tag}");
        } else {
            let endpoint = CreateRelease::builder()
                .project(&self.project_id)
                .tag_name(tag)
                .name(tag)
                .description(description)
                .build()?;
            let endpoint = ignore(endpoint);

            self.with_retry(|| endpoint.query_async(&self.gl)).await?;

            info!("published release for {tag}");
        }

        Ok(())
    }

    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        let endpoint = CreateMergeRequest::builder()
            .project(&self.project_id)
            .source_branch(&req.head_branch)
            .target_branch(&req.base_branch)
            .title(&req.title)
            .description(&req.body)
            .remove_source_branch(req.remove_source_branch)
            .build()?;

        let merge_request: MergeRequestInfo =
            self.with_retry(|| endpoint.query_async(&self.gl)).await?;

        info!("opened merge request {}", merge_request.web_url);

        Ok(to_pull_request(merge_request))
    }

    async fn accept_pr(&self, number: u64) -> Result<PullRequest> {
        let endpoint = MergeMergeRequest::builder()
            .project(&self.project_id)
            .merge_request(number)
            .build()?;

        let merge_request: MergeRequestInfo =
            self.with_retry(|| endpoint.query_async(&self.gl)).await?;

        info!("merged merge request !{number}");

        Ok(to_pull_request(merge_request))
    }
}
