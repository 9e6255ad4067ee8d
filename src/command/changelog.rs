//! Changelog rendering and update command implementation.
use chrono::Utc;
use log::*;

use crate::{
    Result,
    analyzer::range,
    cli::ChangelogArgs,
    command::common::{self, ChangelogUpdate},
    error::WalleError,
    forge::manager::ForgeManager,
};

/// Execute the changelog command.
///
/// Renders the notes of `args.tag`, or of the changes since the newest tag
/// when no tag is given. Published release notes of an existing tag are
/// reused as they are. With `args.update` the notes are proposed as a
/// changelog update.
///
/// Returns the notes.
pub async fn execute(
    manager: &ForgeManager,
    args: &ChangelogArgs,
) -> Result<String> {
    if args.update && args.tag.is_none() {
        return Err(WalleError::invalid_args(
            "--update requires a tag to write the changelog section of",
        ));
    }

    let ref_name = args
        .ref_name
        .clone()
        .unwrap_or_else(|| manager.default_branch());

    let config = manager.load_config(&ref_name).await?;

    // tag names are never empty: without a tag the range is left open
    let target = args.tag.as_deref().unwrap_or_default();

    let existing = match &args.tag {
        Some(tag) => manager.get_tag(tag).await?,
        None => None,
    };

    let published = existing
        .as_ref()
        .and_then(|t| t.release_notes.clone())
        .filter(|n| !n.trim().is_empty());

    let notes = match published {
        Some(notes) => {
            info!("using published release notes of {target}");
            notes
        }
        None => {
            let tags = manager.list_tags().await?;
            let range = range::resolve(&tags, target);
            let branches = common::resolve_branches(&args.branches, &config);
            common::build_notes(manager, args.source, &ref_name, &range, branches)
                .await?
        }
    };

    if notes.is_empty() {
        warn!("no changes found");
    }

    if let Some(tag) = &args.tag
        && args.update
    {
        let target_branch = args
            .target_branch
            .clone()
            .or(config.changelog.target_branch.clone())
            .unwrap_or_else(|| manager.default_branch());

        let date = existing
            .as_ref()
            .map(|t| t.created_at.date_naive())
            .unwrap_or_else(|| Utc::now().date_naive());

        let update = ChangelogUpdate {
            tag: tag.clone(),
            notes: notes.clone(),
            date,
            ref_name,
            target_branch,
            file: args.file.clone().unwrap_or(config.changelog.file),
            merge: args.merge,
        };

        match common::propose_changelog_update(manager, &update).await? {
            Some(pr) => info!("changelog merge request: {}", pr.web_url),
            None => info!("nothing has changed"),
        }
    }

    Ok(notes)
}
