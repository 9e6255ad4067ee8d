//! Manager that wraps the forge implementation
use chrono::{DateTime, Utc};
use log::*;

use crate::{
    Result,
    analyzer::release::{ChangeEntry, Tag},
    config::{CONFIG_FILE, Config},
    forge::{
        config::RemoteConfig,
        request::{
            CreateBranchRequest, CreatePrRequest, CreateTagRequest,
            ForgeCommit, GetFileContentRequest, ListCommitsRequest,
            PullRequest, UpdateFileRequest,
        },
        traits::Forge,
    },
};

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    remote_config: RemoteConfig,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>) -> Self {
        let remote_config = forge.remote_config();
        Self {
            forge,
            remote_config,
        }
    }

    pub fn default_branch(&self) -> String {
        self.forge.default_branch()
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.forge.list_tags().await
    }

    pub async fn get_tag(&self, name: &str) -> Result<Option<Tag>> {
        self.forge.get_tag(name).await
    }

    pub async fn list_merge_requests(
        &self,
        updated_after: DateTime<Utc>,
    ) -> Result<Vec<ChangeEntry>> {
        debug!("listing merge requests merged after {updated_after}");
        self.forge.list_merge_requests(updated_after).await
    }

    pub async fn get_merge_request(&self, iid: u64) -> Result<ChangeEntry> {
        self.forge.get_merge_request(iid).await
    }

    pub async fn list_commits(
        &self,
        req: ListCommitsRequest,
    ) -> Result<Vec<ForgeCommit>> {
        debug!(
            "listing commits on {} since {:?} until {:?}",
            req.ref_name, req.since, req.until
        );
        self.forge.list_commits(req).await
    }

    pub async fn get_file_content(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Option<String>> {
        self.forge.get_file_content(req).await
    }

    /// Loads the optional configuration file stored in the repository at
    /// `ref_name`, falling back to defaults when there is none.
    pub async fn load_config(&self, ref_name: &str) -> Result<Config> {
        let content = self
            .get_file_content(GetFileContentRequest {
                path: CONFIG_FILE.into(),
                ref_name: ref_name.into(),
            })
            .await?;

        match content {
            Some(content) => {
                info!("using {CONFIG_FILE} found at {ref_name}");
                Config::parse(&content)
            }
            None => {
                debug!("no {CONFIG_FILE} found at {ref_name}: using defaults");
                Ok(Config::default())
            }
        }
    }

    pub async fn update_file(&self, req: UpdateFileRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would update file: req: {:#?}", req);
            return Ok(());
        }
        self.forge.update_file(req).await
    }

    pub async fn create_branch(&self, req: CreateBranchRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create branch: req: {:#?}", req);
            return Ok(());
        }
        self.forge.create_branch(req).await
    }

    pub async fn create_tag(&self, req: CreateTagRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create tag: req: {:#?}", req);
            return Ok(());
        }
        self.forge.create_tag(req).await
    }

    pub async fn upsert_release(
        &self,
        tag: &str,
        description: &str,
    ) -> Result<()> {
        if self.remote_config.dry_run {
            warn!(
                "dry_run: would publish release: tag: {tag}, notes: {description}"
            );
            return Ok(());
        }
        self.forge.upsert_release(tag, description).await
    }

    pub async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create merge request: req: {:#?}", req);
            return Ok(PullRequest {
                number: 0,
                sha: "fff".into(),
                web_url: "".into(),
            });
        }
        self.forge.create_pr(req).await
    }

    pub async fn accept_pr(&self, number: u64) -> Result<PullRequest> {
        if self.remote_config.dry_run {
            warn!("dry_run: would merge merge request: !{number}");
            return Ok(PullRequest {
                number,
                sha: "fff".into(),
                web_url: "".into(),
            });
        }
        self.forge.accept_pr(number).await
    }
}
