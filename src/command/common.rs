//! Common functionality shared between the release and changelog commands
use chrono::NaiveDate;
use log::*;

use crate::{
    Result,
    analyzer::{
        Analyzer, commit::merge_request_iid, range::ResolvedRange,
        release::ChangeEntry,
    },
    changelog,
    cli::NoteSource,
    config::Config,
    forge::{
        config::CHANGELOG_BRANCH_PREFIX,
        manager::ForgeManager,
        request::{
            CreateBranchRequest, CreatePrRequest, GetFileContentRequest,
            ListCommitsRequest, PullRequest, UpdateFileRequest,
        },
    },
};

/// Branch allowlist from the command line, or from the configuration file
/// when none was given.
pub fn resolve_branches(cli_branches: &[String], config: &Config) -> Vec<String> {
    if cli_branches.is_empty() {
        config.branches.clone()
    } else {
        cli_branches.to_vec()
    }
}

/// Merge requests merged since the lower bound of the range.
async fn entries_from_merge_requests(
    manager: &ForgeManager,
    range: &ResolvedRange,
) -> Result<Vec<ChangeEntry>> {
    manager.list_merge_requests(range.bounds.since).await
}

/// Merge requests referenced by the merge commits on `ref_name` within the
/// range. Merge requests that cannot be fetched are skipped.
async fn entries_from_commits(
    manager: &ForgeManager,
    ref_name: &str,
    range: &ResolvedRange,
) -> Result<Vec<ChangeEntry>> {
    let commits = manager
        .list_commits(ListCommitsRequest {
            ref_name: ref_name.into(),
            since: range.bounds.lower_bound(),
            until: range.bounds.until,
        })
        .await?;

    let mut entries = vec![];

    for commit in commits.iter() {
        // since is inclusive: the previous tag's commit is part of the list
        if range.bounds.since_sha.as_deref() == Some(commit.id.as_str()) {
            debug!("skipping {}: belongs to the previous release", commit.id);
            continue;
        }

        let Some(iid) = merge_request_iid(&commit.message) else {
            debug!("skipping {}: not a merge commit", commit.id);
            continue;
        };

        match manager.get_merge_request(iid).await {
            Ok(entry) => entries.push(entry),
            Err(err) => warn!("failed to get merge request !{iid}: {err}"),
        }
    }

    Ok(entries)
}

/// Collects the entries of a release from the chosen source and renders its
/// notes.
pub async fn build_notes(
    manager: &ForgeManager,
    source: NoteSource,
    ref_name: &str,
    range: &ResolvedRange,
    branches: Vec<String>,
) -> Result<String> {
    let analyzer = Analyzer::new(branches);

    let notes = match source {
        NoteSource::MergeRequests => {
            let entries = entries_from_merge_requests(manager, range).await?;
            analyzer
                .with_bounds(range.bounds.clone())
                .build_release_notes(&entries)
        }
        // the commit listing already bounds the range
        NoteSource::Commits => {
            let entries = entries_from_commits(manager, ref_name, range).await?;
            analyzer.build_release_notes(&entries)
        }
    };

    Ok(notes)
}

/// Everything needed to propose a changelog update through a merge request.
#[derive(Debug, Clone)]
pub struct ChangelogUpdate {
    pub tag: String,
    pub notes: String,
    /// Date used in the heading of a newly added section.
    pub date: NaiveDate,
    /// Ref the changelog is read from and the update branch starts at.
    pub ref_name: String,
    pub target_branch: String,
    pub file: String,
    /// Merge the merge request right after opening it.
    pub merge: bool,
}

/// Adds the notes to the changelog file on a new branch and opens a merge
/// request for it. Returns `None` when the changelog is already up to date.
pub async fn propose_changelog_update(
    manager: &ForgeManager,
    update: &ChangelogUpdate,
) -> Result<Option<PullRequest>> {
    let existing = manager
        .get_file_content(GetFileContentRequest {
            path: update.file.clone(),
            ref_name: update.ref_name.clone(),
        })
        .await?;

    let create = existing.is_none();

    if create {
        info!(
            "{} does not exist on {}: creating it",
            update.file, update.ref_name
        );
    }

    let current = existing.unwrap_or_default();

    let content = changelog::insert_release(
        &current,
        &update.tag,
        &update.notes,
        update.date,
    );

    if content == current {
        info!("{} is already up to date for {}", update.file, update.tag);
        return Ok(None);
    }

    let message = format!("docs(changelog): update changelog of {}", update.tag);
    let branch = format!("{CHANGELOG_BRANCH_PREFIX}{}", update.tag);

    manager
        .create_branch(CreateBranchRequest {
            branch: branch.clone(),
            ref_name: update.ref_name.clone(),
        })
        .await?;

    manager
        .update_file(UpdateFileRequest {
            path: update.file.clone(),
            branch: branch.clone(),
            message: message.clone(),
            content,
            create,
        })
        .await?;

    let pr = manager
        .create_pr(CreatePrRequest {
            head_branch: branch,
            base_branch: update.target_branch.clone(),
            title: message.clone(),
            body: message,
            remove_source_branch: true,
        })
        .await?;

    if update.merge {
        info!("merging changelog merge request !{}", pr.number);
        return Ok(Some(manager.accept_pr(pr.number).await?));
    }

    Ok(Some(pr))
}
