//! REST endpoints missing from the gitlab crate, or whose builtin version
//! does not expose the parameters needed here.
use std::borrow::Cow;

use derive_builder::Builder;
use gitlab::api::{
    BodyError, Endpoint, FormParams, Pageable, QueryParams, common::NameOrId,
};
use reqwest::Method;
use url::form_urlencoded;

/// Escapes a value used as a single path segment, slashes included.
fn path_segment(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Gets a single repository tag.
#[derive(Debug, Builder)]
pub struct ProjectTag<'a> {
    #[builder(setter(into))]
    project: NameOrId<'a>,

    #[builder(setter(into))]
    tag_name: Cow<'a, str>,
}

impl<'a> ProjectTag<'a> {
    pub fn builder() -> ProjectTagBuilder<'a> {
        ProjectTagBuilder::default()
    }
}

impl Endpoint for ProjectTag<'_> {
    fn method(&self) -> Method {
        Method::GET
    }

    fn endpoint(&self) -> Cow<'static, str> {
        format!(
            "projects/{}/repository/tags/{}",
            self.project,
            path_segment(&self.tag_name)
        )
        .into()
    }
}

/// Lists the commits reachable from a ref within an optional time window.
#[derive(Debug, Builder)]
pub struct RepositoryCommits<'a> {
    #[builder(setter(into))]
    project: NameOrId<'a>,

    #[builder(setter(into))]
    ref_name: Cow<'a, str>,

    /// RFC 3339 lower bound.
    #[builder(default)]
    since: Option<String>,

    /// RFC 3339 upper bound.
    #[builder(default)]
    until: Option<String>,
}

impl<'a> RepositoryCommits<'a> {
    pub fn builder() -> RepositoryCommitsBuilder<'a> {
        RepositoryCommitsBuilder::default()
    }
}

impl Endpoint for RepositoryCommits<'_> {
    fn method(&self) -> Method {
        Method::GET
    }

    fn endpoint(&self) -> Cow<'static, str> {
        format!("projects/{}/repository/commits", self.project).into()
    }

    fn parameters(&self) -> QueryParams<'_> {
        let mut params = QueryParams::default();

        params
            .push("ref_name", self.ref_name.as_ref())
            .push_opt("since", self.since.as_deref())
            .push_opt("until", self.until.as_deref());

        params
    }
}

impl Pageable for RepositoryCommits<'_> {}

/// Replaces the description of the release published for a tag.
#[derive(Debug, Builder)]
pub struct UpdateRelease<'a> {
    #[builder(setter(into))]
    project: NameOrId<'a>,

    #[builder(setter(into))]
    tag_name: Cow<'a, str>,

    #[builder(setter(into))]
    description: Cow<'a, str>,
}

impl<'a> UpdateRelease<'a> {
    pub fn builder() -> UpdateReleaseBuilder<'a> {
        UpdateReleaseBuilder::default()
    }
}

impl Endpoint for UpdateRelease<'_> {
    fn method(&self) -> Method {
        Method::PUT
    }

    fn endpoint(&self) -> Cow<'static, str> {
        format!(
            "projects/{}/releases/{}",
            self.project,
            path_segment(&self.tag_name)
        )
        .into()
    }

    fn body(&self) -> Result<Option<(&'static str, Vec<u8>)>, BodyError> {
        let mut params = FormParams::default();

        params.push("description", self.description.as_ref());

        params.into_body()
    }
}

/// Commits new content of an existing repository file.
#[derive(Debug, Builder)]
pub struct UpdateRepositoryFile<'a> {
    #[builder(setter(into))]
    project: NameOrId<'a>,

    #[builder(setter(into))]
    file_path: Cow<'a, str>,

    #[builder(setter(into))]
    branch: Cow<'a, str>,

    #[builder(setter(into))]
    content: Cow<'a, str>,

    #[builder(setter(into))]
    commit_message: Cow<'a, str>,
}

impl<'a> UpdateRepositoryFile<'a> {
    pub fn builder() -> UpdateRepositoryFileBuilder<'a> {
        UpdateRepositoryFileBuilder::default()
    }
}

impl Endpoint for UpdateRepositoryFile<'_> {
    fn method(&self) -> Method {
        Method::PUT
    }

    fn endpoint(&self) -> Cow<'static, str> {
        format!(
            "projects/{}/repository/files/{}",
            self.project,
            path_segment(&self.file_path)
        )
        .into()
    }

    fn body(&self) -> Result<Option<(&'static str, Vec<u8>)>, BodyError> {
        let mut params = FormParams::default();

        params
            .push("branch", self.branch.as_ref())
            .push("content", self.content.as_ref())
            .push("commit_message", self.commit_message.as_ref())
            .push("encoding", "text");

        params.into_body()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_nested_file_paths() {
        let endpoint = UpdateRepositoryFile::builder()
            .project("group/project")
            .file_path("docs/CHANGE LOG.md")
            .branch("changelog-v1.0.0")
            .content("# v1.0.0")
            .commit_message("docs(changelog): update changelog of v1.0.0")
            .build()
            .unwrap();

        assert_eq!(
            endpoint.endpoint(),
            "projects/group%2Fproject/repository/files/docs%2FCHANGE%20LOG.md"
        );
        assert_eq!(endpoint.method(), Method::PUT);
    }

    #[test]
    fn new_files_are_posted_to_the_same_path() {
        let update = UpdateRepositoryFile::builder()
            .project("group/project")
            .file_path("docs/CHANGELOG.md")
            .branch("changelog-v1.0.0")
            .content("# v1.0.0")
            .commit_message("docs(changelog): update changelog of v1.0.0")
            .build()
            .unwrap();
        let create =
            gitlab::api::projects::repository::files::CreateFile::builder()
                .project("group/project")
                .file_path("docs/CHANGELOG.md")
                .branch("changelog-v1.0.0")
                .content("# v1.0.0".as_bytes())
                .commit_message("docs(changelog): update changelog of v1.0.0")
                .build()
                .unwrap();

        assert_eq!(create.method(), Method::POST);
        assert_eq!(create.endpoint(), update.endpoint());
    }

    #[test]
    fn escapes_tag_names() {
        let endpoint = ProjectTag::builder()
            .project("group/project")
            .tag_name("release/v1.0.0")
            .build()
            .unwrap();

        assert_eq!(
            endpoint.endpoint(),
            "projects/group%2Fproject/repository/tags/release%2Fv1.0.0"
        );
    }

    #[test]
    fn update_release_sends_description() {
        let endpoint = UpdateRelease::builder()
            .project("group/project")
            .tag_name("v1.0.0")
            .description("notes")
            .build()
            .unwrap();

        let (content_type, body) = endpoint.body().unwrap().unwrap();

        assert_eq!(content_type, "application/x-www-form-urlencoded");
        assert_eq!(String::from_utf8(body).unwrap(), "description=notes");
        assert_eq!(endpoint.endpoint(), "projects/group%2Fproject/releases/v1.0.0");
    }

    #[test]
    fn commits_require_ref() {
        let result = RepositoryCommits::builder().project("group/project").build();

        assert!(result.is_err());
    }
}
