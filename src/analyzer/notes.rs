use std::collections::BTreeMap;

use crate::analyzer::{classifier::Classified, group::Category};

/// Groups classified lines by category and renders them as Markdown.
///
/// Categories are rendered in [`Category`] order and items keep the order in
/// which they were given. Empty categories are left out entirely, so an empty
/// input renders as an empty string.
pub fn aggregate<I>(classified: I) -> String
where
    I: IntoIterator<Item = Classified>,
{
    let mut groups: BTreeMap<Category, Vec<String>> = BTreeMap::new();

    for item in classified {
        groups.entry(item.category).or_default().push(item.summary);
    }

    groups
        .iter()
        .map(|(category, items)| {
            format!("{}\n- {}\n", category.heading(), items.join("\n- "))
        })
        .collect::<Vec<String>>()
        .join("\n")
}
