//! Tag creation and release publication command implementation.
use chrono::Utc;
use log::*;

use crate::{
    Result,
    analyzer::range,
    cli::ReleaseArgs,
    command::common::{self, ChangelogUpdate},
    forge::{manager::ForgeManager, request::CreateTagRequest},
};

/// Execute the release command: tag `args.ref_name` as `args.tag` with
/// release notes covering everything merged since the previous tag.
/// An existing tag only gets its release notes refreshed.
///
/// Returns the release notes.
pub async fn execute(manager: &ForgeManager, args: &ReleaseArgs) -> Result<String> {
    let config = manager.load_config(&args.ref_name).await?;
    let tags = manager.list_tags().await?;
    let range = range::resolve(&tags, &args.tag);
    let branches = common::resolve_branches(&args.branches, &config);

    let notes = common::build_notes(
        manager,
        args.source,
        &args.ref_name,
        &range,
        branches,
    )
    .await?;

    if notes.is_empty() {
        warn!("no changes found for {}", args.tag);
    }

    if range.exists {
        info!("tag {} already exists: refreshing its release notes", args.tag);
        if !notes.is_empty() {
            manager.upsert_release(&args.tag, &notes).await?;
        }
    } else {
        manager
            .create_tag(CreateTagRequest {
                tag_name: args.tag.clone(),
                ref_name: args.ref_name.clone(),
                message: args.message.clone(),
                release_description: (!notes.is_empty()).then(|| notes.clone()),
            })
            .await?;
    }

    if args.changelog && notes.is_empty() {
        info!("no release notes for {}: skipping changelog update", args.tag);
    } else if args.changelog {
        let target_branch = args
            .changelog_branch
            .clone()
            .or(config.changelog.target_branch.clone())
            .unwrap_or_else(|| manager.default_branch());

        let date = tags
            .iter()
            .find(|t| t.name == args.tag)
            .map(|t| t.created_at.date_naive())
            .unwrap_or_else(|| Utc::now().date_naive());

        let update = ChangelogUpdate {
            tag: args.tag.clone(),
            notes: notes.clone(),
            date,
            ref_name: target_branch.clone(),
            target_branch,
            file: args.file.clone().unwrap_or(config.changelog.file),
            merge: args.merge,
        };

        if let Some(pr) = common::propose_changelog_update(manager, &update).await? {
            info!("changelog merge request: {}", pr.web_url);
        }
    }

    info!("released {}", args.tag);

    Ok(notes)
}
