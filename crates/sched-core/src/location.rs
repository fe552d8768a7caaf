//! Venue ordering.
//!
//! Location names are an open vocabulary, but the venue has a shape: the
//! main stage first, then numbered stages, masterclass rooms, meetup rooms,
//! and so on down to anything unrecognised. Each name gets a
//! [`LocationRank`] from the first tier in [`TIERS`] that matches it.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::collate;

static STAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Stage (\d+)$").unwrap());
static MASTERCLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Masterclass (\d+)$").unwrap());
static MEETUP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Meetup (\d+)$").unwrap());
static ROOM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"E(\d{3})").unwrap());

/// Major rank of names no tier recognises.
pub const FALLBACK_MAJOR: u8 = 11;

/// Sort key for a location name: tier first, then the number within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LocationRank {
    pub major: u8,
    pub minor: u64,
}

/// How a tier recognises a name.
#[derive(Debug)]
enum Matcher {
    Exact(&'static str),
    Contains(&'static str),
    /// The first capture group becomes the minor number.
    Numbered(&'static LazyLock<Regex>),
}

impl Matcher {
    fn minor(&self, name: &str) -> Option<u64> {
        match self {
            Self::Exact(expected) => (name == *expected).then_some(0),
            Self::Contains(needle) => name.contains(needle).then_some(0),
            Self::Numbered(re) => re
                .captures(name)
                .map(|caps| caps[1].parse().unwrap_or(u64::MAX)),
        }
    }
}

#[derive(Debug)]
struct Tier {
    major: u8,
    matcher: Matcher,
}

/// Tiers in priority order; the first match wins.
static TIERS: [Tier; 10] = [
    Tier { major: 1, matcher: Matcher::Exact("Centre Stage") },
    Tier { major: 2, matcher: Matcher::Numbered(&STAGE_RE) },
    Tier { major: 3, matcher: Matcher::Numbered(&MASTERCLASS_RE) },
    Tier { major: 4, matcher: Matcher::Numbered(&MEETUP_RE) },
    Tier { major: 5, matcher: Matcher::Contains("Meetup") },
    Tier { major: 6, matcher: Matcher::Exact("Community Space") },
    Tier { major: 7, matcher: Matcher::Contains("Networking") },
    Tier { major: 8, matcher: Matcher::Exact("Podcast Booth") },
    Tier { major: 9, matcher: Matcher::Contains("MEO Arena") },
    Tier { major: 10, matcher: Matcher::Numbered(&ROOM_RE) },
];

/// Ranks a location name.
pub fn rank(name: &str) -> LocationRank {
    TIERS
        .iter()
        .find_map(|tier| {
            tier.matcher
                .minor(name)
                .map(|minor| LocationRank { major: tier.major, minor })
        })
        .unwrap_or(LocationRank { major: FALLBACK_MAJOR, minor: 0 })
}

/// Canonical comparison of two location names.
pub fn compare(a: &str, b: &str) -> Ordering {
    rank(a).cmp(&rank(b)).then_with(|| collate::compare(a, b))
}

/// A rendering lane for one physical location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationGroup {
    pub name: String,
    pub rank: LocationRank,
}

impl LocationGroup {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let rank = rank(&name);
        Self { name, rank }
    }
}

/// Builds the canonical group order for a set of location names.
///
/// Duplicate names collapse into one group.
pub fn sort_locations<I, S>(names: I) -> Vec<LocationGroup>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut groups: Vec<LocationGroup> = names.into_iter().map(LocationGroup::new).collect();
    groups.sort_by(|a, b| compare(&a.name, &b.name));
    groups.dedup_by(|a, b| a.name == b.name);
    groups
}
