//! Tests for entry collection and the changelog merge request workflow.
use chrono::NaiveDate;
use mockall::predicate::eq;

use crate::{
    analyzer::range::resolve,
    cli::NoteSource,
    command::common::{
        ChangelogUpdate, build_notes, propose_changelog_update,
        resolve_branches,
    },
    config::Config,
    error::WalleError,
    forge::request::{
        CreateBranchRequest, ForgeCommit, ListCommitsRequest, PullRequest,
    },
    test_helpers::*,
};

fn merge_commit(id: &str, iid: u64) -> ForgeCommit {
    ForgeCommit {
        id: id.into(),
        message: format!(
            "Merge branch 'topic' into 'main'\n\nchange\n\nSee merge request {TEST_PROJECT}!{iid}"
        ),
        ..ForgeCommit::default()
    }
}

fn update(merge: bool) -> ChangelogUpdate {
    ChangelogUpdate {
        tag: "v1.1.0".into(),
        notes: "Other:\n- new\n".into(),
        date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        ref_name: "main".into(),
        target_branch: "main".into(),
        file: "CHANGELOG.md".into(),
        merge,
    }
}

fn pull_request(number: u64) -> PullRequest {
    PullRequest {
        number,
        sha: "head".into(),
        web_url: format!(
            "https://gitlab.com/{TEST_PROJECT}/-/merge_requests/{number}"
        ),
    }
}

#[test]
fn cli_branches_take_precedence_over_config() {
    let config = Config {
        branches: vec!["main".into()],
        ..Config::default()
    };

    assert_eq!(resolve_branches(&[], &config), vec!["main"]);
    assert_eq!(
        resolve_branches(&["release".to_string()], &config),
        vec!["release"]
    );
}

#[tokio::test]
async fn merge_request_notes_apply_every_filter() {
    let tags = vec![tag("v1.1.0", "sha1", 2000), tag("v1.0.0", "sha0", 1000)];
    let range = resolve(&tags, "v1.2.0");

    let mut mock_forge = create_mock_forge(false);
    mock_forge
        .expect_list_merge_requests()
        .with(eq(at(2000)))
        .times(1)
        .returning(|_| {
            let mut boundary = change_entry(2, "feat: released", "main", 2000);
            boundary.merge_commit_sha = Some("sha1".into());
            Ok(vec![
                change_entry(3, "feat: c", "main", 2500),
                boundary,
                change_entry(4, "fix: d", "dev", 2600),
            ])
        });

    let manager = create_test_manager(mock_forge);
    let notes = build_notes(
        &manager,
        NoteSource::MergeRequests,
        "main",
        &range,
        vec!["main".into()],
    )
    .await
    .unwrap();

    assert_eq!(
        notes,
        "_New Features:_\n- c ([!3](https://gitlab.com/group/project/-/merge_requests/3)) @dev\n"
    );
}

#[tokio::test]
async fn commit_notes_follow_merge_commits() {
    let tags = vec![tag("v1.1.0", "sha1", 2000), tag("v1.0.0", "sha0", 1000)];
    let range = resolve(&tags, "v1.1.0");

    let mut mock_forge = create_mock_forge(false);
    mock_forge
        .expect_list_commits()
        .with(eq(ListCommitsRequest {
            ref_name: "main".into(),
            since: Some(at(1000)),
            until: Some(at(2000)),
        }))
        .times(1)
        .returning(|_| {
            Ok(vec![
                merge_commit("sha1", 2),
                ForgeCommit {
                    id: "c2".into(),
                    message: "chore: no merge request".into(),
                    ..ForgeCommit::default()
                },
                merge_commit("c3", 5),
                merge_commit("sha0", 1),
            ])
        });
    mock_forge
        .expect_get_merge_request()
        .with(eq(2))
        .times(1)
        .returning(|_| Ok(change_entry(2, "fix: b", "main", 1900)));
    mock_forge
        .expect_get_merge_request()
        .with(eq(5))
        .times(1)
        .returning(|_| Err(WalleError::forge("404 Not Found")));

    let manager = create_test_manager(mock_forge);
    let notes =
        build_notes(&manager, NoteSource::Commits, "main", &range, vec![])
            .await
            .unwrap();

    assert_eq!(
        notes,
        "**Bug Fix:**\n- b ([!2](https://gitlab.com/group/project/-/merge_requests/2)) @dev\n"
    );
}

#[tokio::test]
async fn proposes_changelog_update_and_merges() {
    let mut mock_forge = create_mock_forge(false);
    mock_forge
        .expect_get_file_content()
        .withf(|req| req.path == "CHANGELOG.md" && req.ref_name == "main")
        .returning(|_| Ok(Some("# v1.0.0 (2020-01-01)\nOther:\n- old".into())));
    mock_forge
        .expect_create_branch()
        .with(eq(CreateBranchRequest {
            branch: "changelog-v1.1.0".into(),
            ref_name: "main".into(),
        }))
        .times(1)
        .returning(|_| Ok(()));
    mock_forge
        .expect_update_file()
        .withf(|req| {
            req.branch == "changelog-v1.1.0"
                && req.path == "CHANGELOG.md"
                && !req.create
                && req.message == "docs(changelog): update changelog of v1.1.0"
                && req.content
                    == "# v1.1.0 (2024-05-17)\nOther:\n- new\n\n# v1.0.0 (2020-01-01)\nOther:\n- old"
        })
        .times(1)
        .returning(|_| Ok(()));
    mock_forge
        .expect_create_pr()
        .withf(|req| {
            req.head_branch == "changelog-v1.1.0"
                && req.base_branch == "main"
                && req.title == "docs(changelog): update changelog of v1.1.0"
                && req.remove_source_branch
        })
        .times(1)
        .returning(|_| Ok(pull_request(9)));
    mock_forge
        .expect_accept_pr()
        .with(eq(9))
        .times(1)
        .returning(|n| Ok(pull_request(n)));

    let manager = create_test_manager(mock_forge);
    let pr = propose_changelog_update(&manager, &update(true))
        .await
        .unwrap();

    assert_eq!(pr.map(|p| p.number), Some(9));
}

#[tokio::test]
async fn missing_changelog_is_created() {
    let mut mock_forge = create_mock_forge(false);
    mock_forge
        .expect_get_file_content()
        .times(1)
        .returning(|_| Ok(None));
    mock_forge.expect_create_branch().times(1).returning(|_| Ok(()));
    mock_forge
        .expect_update_file()
        .withf(|req| {
            req.create
                && req.branch == "changelog-v1.1.0"
                && req.content == "# v1.1.0 (2024-05-17)\nOther:\n- new\n"
        })
        .times(1)
        .returning(|_| Ok(()));
    mock_forge
        .expect_create_pr()
        .times(1)
        .returning(|_| Ok(pull_request(10)));
    mock_forge.expect_accept_pr().never();

    let manager = create_test_manager(mock_forge);
    let pr = propose_changelog_update(&manager, &update(false))
        .await
        .unwrap();

    assert_eq!(pr.map(|p| p.number), Some(10));
}

#[tokio::test]
async fn unchanged_changelog_is_left_alone() {
    let mut mock_forge = create_mock_forge(false);
    mock_forge.expect_get_file_content().returning(|_| {
        Ok(Some("# v1.1.0 (2024-05-17)\nOther:\n- new\n".into()))
    });
    mock_forge.expect_create_branch().never();
    mock_forge.expect_update_file().never();
    mock_forge.expect_create_pr().never();

    let manager = create_test_manager(mock_forge);
    let pr = propose_changelog_update(&manager, &update(false))
        .await
        .unwrap();

    assert!(pr.is_none());
}

#[tokio::test]
async fn dry_run_only_reads_changelog() {
    let mut mock_forge = create_mock_forge(true);
    mock_forge
        .expect_get_file_content()
        .times(1)
        .returning(|_| Ok(None));
    mock_forge.expect_create_branch().never();
    mock_forge.expect_update_file().never();
    mock_forge.expect_create_pr().never();
    mock_forge.expect_accept_pr().never();

    let manager = create_test_manager(mock_forge);
    let pr = propose_changelog_update(&manager, &update(true))
        .await
        .unwrap();

    assert_eq!(pr.map(|p| p.number), Some(0));
}
