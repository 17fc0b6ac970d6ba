//! Pure projections over a list's entries: filtering, tag union and random
//! pick. Nothing here touches storage.
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

use crate::modules::entry::domain::Entry;
use crate::modules::list::domain::value_objects::EntryFilter;
use crate::shared::errors::{AppError, AppResult};

/// Completion filter first, then tag membership when a tag is given.
/// Input order is preserved.
pub fn filter_entries(entries: Vec<Entry>, filter: EntryFilter, tag: Option<&str>) -> Vec<Entry> {
    entries
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .filter(|entry| tag.map_or(true, |tag| entry.has_tag(tag)))
        .collect()
}

/// Uniform pick over the eligible subset.
pub fn pick_random<R: Rng + ?Sized>(
    entries: Vec<Entry>,
    only_incomplete: bool,
    rng: &mut R,
) -> AppResult<Entry> {
    if entries.is_empty() {
        return Err(AppError::NoEligibleEntries(
            "No entries found in list".to_string(),
        ));
    }

    let filter = if only_incomplete {
        EntryFilter::Incomplete
    } else {
        EntryFilter::All
    };
    let eligible = filter_entries(entries, filter, None);

    eligible.choose(rng).cloned().ok_or_else(|| {
        AppError::NoEligibleEntries("No incomplete entries found in list".to_string())
    })
}

/// Union of all entry tags, each once, sorted
pub fn collect_tags(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|entry| entry.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
