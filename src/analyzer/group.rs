use std::{collections::HashMap, fmt::Display, sync::LazyLock};

/// Release note categories. Variant order is the rendering order, not the
/// order in which entries are discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    BugFix,
    NewFeature,
    Changes,
    Documentation,
    #[default]
    Other,
}

impl Category {
    /// Every category in rendering order.
    pub const ALL: [Category; 5] = [
        Category::BugFix,
        Category::NewFeature,
        Category::Changes,
        Category::Documentation,
        Category::Other,
    ];

    /// Markdown heading rendered above the category's items.
    pub fn heading(&self) -> &'static str {
        match self {
            Category::BugFix => "**Bug Fix:**",
            Category::NewFeature => "_New Features:_",
            Category::Changes => "_Changes:_",
            Category::Documentation => "Documentation:",
            Category::Other => "Other:",
        }
    }

    /// Looks up the category for a conventional commit type. Unknown types
    /// return `None`.
    pub fn from_kind(kind: &str) -> Option<Category> {
        KINDS.get(kind).copied()
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.heading())
    }
}

static KINDS: LazyLock<HashMap<&'static str, Category>> = LazyLock::new(|| {
    HashMap::from([
        ("feat", Category::NewFeature),
        ("fix", Category::BugFix),
        ("refactor", Category::Changes),
        ("docs", Category::Documentation),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_kinds() {
        assert_eq!(Category::from_kind("feat"), Some(Category::NewFeature));
        assert_eq!(Category::from_kind("fix"), Some(Category::BugFix));
        assert_eq!(Category::from_kind("refactor"), Some(Category::Changes));
        assert_eq!(Category::from_kind("docs"), Some(Category::Documentation));
    }

    #[test]
    fn unknown_kinds_have_no_category() {
        assert_eq!(Category::from_kind("chore"), None);
        assert_eq!(Category::from_kind("Feat"), None);
        assert_eq!(Category::from_kind(""), None);
    }

    #[test]
    fn all_is_sorted_in_rendering_order() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
        assert_eq!(Category::ALL.first(), Some(&Category::BugFix));
        assert_eq!(Category::ALL.last(), Some(&Category::Other));
    }

    #[test]
    fn displays_heading() {
        assert_eq!(Category::BugFix.to_string(), "**Bug Fix:**");
        assert_eq!(Category::Other.to_string(), "Other:");
    }
}
