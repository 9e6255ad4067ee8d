use regex::Regex;
use std::sync::LazyLock;

use crate::analyzer::group::Category;

/// Matches a `type(scope)` prefix, capturing type and scope.
static SCOPED_KIND_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^( ]+)\(([^)]*)\)$").unwrap());

/// A single release note line after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub category: Category,
    pub summary: String,
}

impl Classified {
    pub fn new(category: Category, summary: impl Into<String>) -> Self {
        Self {
            category,
            summary: summary.into(),
        }
    }
}

/// Classifies one change line by its conventional commit prefix.
///
/// `type: summary` and `type(scope): summary` are recognized. A scope other
/// than `*` is kept in front of the summary. Unknown types land in
/// [`Category::Other`]; when the text before the colon contains whitespace it
/// was not a prefix at all and the line is kept untouched.
pub fn classify(line: &str) -> Classified {
    let (prefix, summary) = match line.split_once(':') {
        Some((prefix, summary)) => (prefix.trim(), summary.trim()),
        None => ("", line.trim()),
    };

    let mut kind = prefix;
    let mut summary = summary.to_string();

    if prefix.contains('(')
        && let Some(captures) = SCOPED_KIND_REGEX.captures(prefix)
    {
        kind = captures.get(1).map_or(prefix, |m| m.as_str());
        let scope = captures.get(2).map_or("", |m| m.as_str());
        if !scope.is_empty() && scope != "*" {
            summary = format!("{scope}: {summary}");
        }
    }

    match Category::from_kind(kind) {
        Some(category) => Classified::new(category, summary),
        None if kind.contains(char::is_whitespace) => {
            Classified::new(Category::Other, line)
        }
        None => Classified::new(Category::Other, summary),
    }
}
