//! Changelog document splicing.
//!
//! A changelog is a Markdown document made of sections headed by
//! `# <tag> (<YYYY-MM-DD>)`, newest first. Only lines starting with `# ` are
//! treated as section boundaries.
use chrono::NaiveDate;

const SECTION_PREFIX: &str = "# ";

/// Formats the heading line of a release section.
pub fn section_heading(tag: &str, date: NaiveDate) -> String {
    format!("{SECTION_PREFIX}{tag} ({})", date.format("%Y-%m-%d"))
}

/// Tag named by a section heading line, if the line is one.
fn section_tag(line: &str) -> Option<&str> {
    line.strip_prefix(SECTION_PREFIX)
        .map(|rest| rest.split(' ').next().unwrap_or_default())
}

/// Inserts the release notes of `tag` into a changelog document.
///
/// When a section for `tag` already exists its body is replaced with
/// `content` and its heading line is kept as is. Otherwise a new section
/// dated `date` is prepended. Everything else in the document is left
/// untouched.
pub fn insert_release(
    document: &str,
    tag: &str,
    content: &str,
    date: NaiveDate,
) -> String {
    let content_lines = content.split('\n').collect::<Vec<&str>>();
    let mut lines: Vec<&str> = vec![];
    let mut in_tag_section = false;
    let mut tag_found = false;

    for line in document.lines() {
        if let Some(section) = section_tag(line) {
            in_tag_section = section == tag;
            if in_tag_section {
                tag_found = true;
                lines.push(line);
                lines.extend(&content_lines);
                continue;
            }
        }

        if !in_tag_section {
            lines.push(line);
        }
    }

    if tag_found {
        return lines.join("\n");
    }

    let heading = section_heading(tag, date);
    let mut result = vec![heading.as_str()];
    result.extend(&content_lines);
    result.extend(lines);

    result.join("\n")
}
