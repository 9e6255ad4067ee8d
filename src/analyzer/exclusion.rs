use regex::Regex;
use std::sync::LazyLock;

use crate::analyzer::release::ChangeEntry;

/// Label that opts a merge request out of the release notes.
pub const RELEASE_NOTE_NONE_LABEL: &str = "release-note-none";

/// `none`, `n/a` or `na` (case insensitive, optionally quoted) fenced in a
/// ```` ```release-note ```` or ```` ```release-notes ```` block.
static FENCED_NONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)```release-notes?\s*['"]?(?:none|n/a|na)['"]?\s*```"#)
        .unwrap()
});

/// Inline `/release-note-none` command.
static SLASH_NONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/release-note-none").unwrap());

/// Returns true when the text carries a release note opt-out marker.
pub fn matches_exclusion_marker(text: &str) -> bool {
    [&*FENCED_NONE_REGEX, &*SLASH_NONE_REGEX]
        .iter()
        .any(|re| re.is_match(text))
}

/// Returns true when the entry must be left out of the release notes, either
/// through its description or through the opt-out label.
pub fn is_excluded(entry: &ChangeEntry) -> bool {
    matches_exclusion_marker(&entry.description)
        || entry.labels.iter().any(|l| l == RELEASE_NOTE_NONE_LABEL)
}
