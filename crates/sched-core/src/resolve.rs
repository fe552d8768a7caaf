//! Turning free-text session dates into absolute instants.
//!
//! The feed splits a session's time across three strings plus a conference
//! slug: `"November 10"`, `"6.35PM"`, `"7.00PM"`, `"lis25"`. The resolver
//! joins them into `"November 10 2025 6.35PM"`, parses that as a wall-clock
//! time in the venue's zone, and corrects sessions that run past midnight.

use chrono::{DateTime, Days, LocalResult, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::RawEvent;

/// `chrono` format for `"November 10 2025 6.35PM"`.
///
/// Month and meridiem names are always English in `chrono`, whatever the
/// process locale.
pub const WALL_CLOCK_FORMAT: &str = "%B %d %Y %I.%M%p";

/// An absolute start/end pair for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ResolvedInterval {
    /// Whether `now` falls strictly inside the interval.
    ///
    /// Both ends are exclusive: a session is not in progress at the exact
    /// instant it starts or ends.
    pub fn is_in_progress(&self, now: DateTime<Utc>) -> bool {
        self.start < now && now < self.end
    }
}

/// A composite wall-clock string that could not be turned into an instant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot parse {input:?}: {reason}")]
pub struct WallClockError {
    /// The composite string, e.g. `"November 10 2025 6.35PM"`.
    pub input: String,
    pub reason: String,
}

/// Per-event resolution failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The event's date or time strings did not parse.
    #[error("invalid date for event {id} ({title}): {source}")]
    DateParse {
        id: String,
        title: String,
        #[source]
        source: WallClockError,
    },
}

/// Resolves feed date strings into [`ResolvedInterval`]s in a venue zone.
#[derive(Debug, Clone)]
pub struct DateTimeResolver<Tz: TimeZone> {
    tz: Tz,
    fallback_year: i32,
}

impl<Tz: TimeZone> DateTimeResolver<Tz> {
    /// Creates a resolver for wall-clock times in `tz`.
    ///
    /// `fallback_year` is used for conference slugs without digits; callers
    /// normally pass the current calendar year.
    pub const fn new(tz: Tz, fallback_year: i32) -> Self {
        Self { tz, fallback_year }
    }

    /// Resolves one session's strings into an interval.
    ///
    /// If the end parses earlier than the start the session is taken to
    /// cross midnight and the end moves forward one calendar day.
    pub fn resolve(
        &self,
        date: &str,
        starts_at: &str,
        ends_at: &str,
        conference_slug: Option<&str>,
    ) -> Result<ResolvedInterval, WallClockError> {
        let year = conference_year(conference_slug, self.fallback_year);
        let date = date.trim();

        let start_input = format!("{date} {year} {}", starts_at.trim());
        let end_input = format!("{date} {year} {}", ends_at.trim());
        let start_naive = parse_wall_clock(&start_input)?;
        let end_naive = parse_wall_clock(&end_input)?;

        let start = self.to_instant(start_naive, &start_input)?;
        let mut end = self.to_instant(end_naive, &end_input)?;

        if end < start {
            let rolled = end_naive
                .checked_add_days(Days::new(1))
                .ok_or_else(|| WallClockError {
                    input: end_input.clone(),
                    reason: "date out of range".to_string(),
                })?;
            end = self.to_instant(rolled, &end_input)?;
        }

        Ok(ResolvedInterval { start, end })
    }

    /// Resolves a feed record, attaching its id and title to any failure.
    pub fn resolve_event(&self, event: &RawEvent) -> Result<ResolvedInterval, ResolveError> {
        self.resolve(
            &event.date,
            &event.starts_at,
            &event.ends_at,
            event.conference_slug.as_deref(),
        )
        .map_err(|source| ResolveError::DateParse {
            id: event.id.to_string(),
            title: event.title.clone(),
            source,
        })
    }

    /// Converts a venue wall-clock time to UTC.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant.
    fn to_instant(
        &self,
        naive: NaiveDateTime,
        input: &str,
    ) -> Result<DateTime<Utc>, WallClockError> {
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
            LocalResult::None => Err(WallClockError {
                input: input.to_string(),
                reason: "time does not exist in the venue time zone".to_string(),
            }),
        }
    }
}

/// The four-digit year encoded in a conference slug.
///
/// `"lis25"` gives `"2025"`. A missing slug, or one without digits, falls
/// back to `fallback_year`.
pub fn conference_year(slug: Option<&str>, fallback_year: i32) -> String {
    let digits: String = slug
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        fallback_year.to_string()
    } else {
        format!("20{digits}")
    }
}

fn parse_wall_clock(input: &str) -> Result<NaiveDateTime, WallClockError> {
    NaiveDateTime::parse_from_str(input, WALL_CLOCK_FORMAT).map_err(|err| WallClockError {
        input: input.to_string(),
        reason: err.to_string(),
    })
}
