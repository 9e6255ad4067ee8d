//! Release note synthesis.
//!
//! Selects the merged merge requests that belong to a release, drops the ones
//! opted out of the notes, classifies each title by its conventional commit
//! prefix and renders the grouped Markdown document.

use log::*;

use crate::analyzer::{
    classifier::classify,
    exclusion::is_excluded,
    range::RangeBounds,
    release::ChangeEntry,
};

pub mod classifier;
pub mod commit;
pub mod exclusion;
pub mod group;
pub mod notes;
pub mod range;
pub mod release;

/// Builds release notes from change entries.
///
/// Every entry has to pass the range membership check (when bounds are set),
/// the exclusion filter and the branch allowlist (when one is set).
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    bounds: Option<RangeBounds>,
    branches: Vec<String>,
}

impl Analyzer {
    /// Analyzer keeping entries merged into any of `branches`, or into any
    /// branch when the list is empty.
    pub fn new(branches: Vec<String>) -> Self {
        Self {
            bounds: None,
            branches,
        }
    }

    /// Restricts entries to the given release range.
    pub fn with_bounds(mut self, bounds: RangeBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    fn on_allowed_branch(&self, entry: &ChangeEntry) -> bool {
        self.branches.is_empty()
            || self.branches.iter().any(|b| *b == entry.target_branch)
    }

    /// Whether the entry makes it into the release notes.
    pub fn includes(&self, entry: &ChangeEntry) -> bool {
        if let Some(bounds) = &self.bounds
            && !bounds.contains(entry)
        {
            debug!("!{} is outside of the release range", entry.reference);
            return false;
        }

        if is_excluded(entry) {
            debug!("!{} opted out of release notes", entry.reference);
            return false;
        }

        if !self.on_allowed_branch(entry) {
            debug!(
                "!{} targets {} which is not an allowed branch",
                entry.reference, entry.target_branch
            );
            return false;
        }

        true
    }

    /// Renders the release notes for the entries, kept in the order given.
    pub fn build_release_notes(&self, entries: &[ChangeEntry]) -> String {
        let lines = entries
            .iter()
            .filter(|e| self.includes(e))
            .map(|e| e.note_line())
            .collect::<Vec<String>>();

        info!("{} of {} entries included in notes", lines.len(), entries.len());

        notes::aggregate(lines.iter().map(|l| classify(l)))
    }
}
