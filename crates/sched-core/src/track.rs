//! Track catalog for the filter control.

use std::collections::BTreeSet;

use crate::collate;

/// Excluded from the summit partition despite its name.
const NIGHT_SUMMIT: &str = "Night Summit";

/// Whether a track is one of the topical "summit" tracks listed first.
pub fn is_summit_track(name: &str) -> bool {
    name.contains("Summit") && name != NIGHT_SUMMIT
}

/// Deduplicates and orders track names: summit tracks alphabetically,
/// then every other track alphabetically.
pub fn build_catalog<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let unique: BTreeSet<String> = names
        .into_iter()
        .map(Into::into)
        .filter(|name| !name.is_empty())
        .collect();

    let (mut summits, mut others): (Vec<String>, Vec<String>) =
        unique.into_iter().partition(|name| is_summit_track(name));
    summits.sort_by(|a, b| collate::compare(a, b));
    others.sort_by(|a, b| collate::compare(a, b));

    summits.extend(others);
    summits
}
