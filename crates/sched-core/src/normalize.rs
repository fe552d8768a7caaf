//! Feed normalization: raw records to groups, tracks and timeline items.
//!
//! Two passes over the feed. The first collects every location and track
//! name so the group order is fixed before any item refers to a group. The
//! second resolves each record's interval; a record that fails is logged
//! and left out, and the rest of the load carries on.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

use crate::event::RawEvent;
use crate::location::{LocationGroup, sort_locations};
use crate::resolve::{DateTimeResolver, ResolveError, ResolvedInterval};
use crate::track::build_catalog;
use crate::types::{DisplayClass, EventId};

/// Group name for records without a location.
pub const UNKNOWN_VENUE: &str = "Unknown Venue";

/// A session placed on the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub id: EventId,
    /// Name of the [`LocationGroup`] lane this item sits in.
    pub group: String,
    pub title: String,
    pub interval: ResolvedInterval,
    pub(crate) display_class: DisplayClass,
    /// The feed record, kept for the details view.
    pub raw: Arc<RawEvent>,
}

impl NormalizedEvent {
    pub const fn display_class(&self) -> DisplayClass {
        self.display_class
    }

    pub fn track(&self) -> Option<&str> {
        self.raw.track_name()
    }
}

/// Why a record was left out of the timeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error(transparent)]
    Date(#[from] ResolveError),

    /// A record reused an id already on the timeline.
    #[error("duplicate event id {id} ({title})")]
    DuplicateId { id: String, title: String },
}

/// Output of [`normalize`].
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Location lanes in canonical order.
    pub groups: Vec<LocationGroup>,
    /// Track catalog, summit tracks first.
    pub tracks: Vec<String>,
    /// Items in feed order, all starting as [`DisplayClass::Normal`].
    pub items: Vec<NormalizedEvent>,
    /// Earliest start across `items`.
    pub earliest: Option<DateTime<Utc>>,
    pub skipped: Vec<SkipReason>,
}

/// The group a record belongs to.
pub fn group_name(event: &RawEvent) -> &str {
    event.location_name().unwrap_or(UNKNOWN_VENUE)
}

/// Normalizes a feed.
pub fn normalize<Tz: TimeZone>(events: &[RawEvent], resolver: &DateTimeResolver<Tz>) -> Schedule {
    let mut locations = BTreeSet::new();
    let mut track_names = BTreeSet::new();
    for event in events {
        locations.insert(group_name(event));
        if let Some(track) = event.track_name() {
            track_names.insert(track);
        }
    }
    let groups = sort_locations(locations);
    let tracks = build_catalog(track_names);

    let mut items = Vec::with_capacity(events.len());
    let mut seen: HashSet<&EventId> = HashSet::with_capacity(events.len());
    let mut skipped = Vec::new();
    let mut earliest: Option<DateTime<Utc>> = None;

    for event in events {
        let interval = match resolver.resolve_event(event) {
            Ok(interval) => interval,
            Err(err) => {
                tracing::warn!(
                    event_id = %event.id,
                    title = %event.title,
                    error = %err,
                    "skipping event with unparseable date"
                );
                skipped.push(SkipReason::from(err));
                continue;
            }
        };

        if !seen.insert(&event.id) {
            tracing::warn!(event_id = %event.id, title = %event.title, "skipping duplicate event id");
            skipped.push(SkipReason::DuplicateId {
                id: event.id.to_string(),
                title: event.title.clone(),
            });
            continue;
        }

        earliest = Some(earliest.map_or(interval.start, |e| e.min(interval.start)));
        items.push(NormalizedEvent {
            id: event.id.clone(),
            group: group_name(event).to_string(),
            title: event.title.clone(),
            interval,
            display_class: DisplayClass::Normal,
            raw: Arc::new(event.clone()),
        });
    }

    tracing::debug!(
        groups = groups.len(),
        tracks = tracks.len(),
        items = items.len(),
        skipped = skipped.len(),
        "normalized schedule"
    );

    Schedule {
        groups,
        tracks,
        items,
        earliest,
        skipped,
    }
}
