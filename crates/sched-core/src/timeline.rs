//! The in-memory timeline model.
//!
//! Built once per feed load. After that the only thing that changes is each
//! item's [`DisplayClass`](crate::DisplayClass), and only through [`Timeline::refresh`] or
//! [`Timeline::apply`]. Every applied change bumps [`Timeline::version`].

use std::collections::HashMap;

use chrono::{DateTime, Days, LocalResult, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::activation::{self, ClassUpdate};
use crate::location::LocationGroup;
use crate::normalize::{NormalizedEvent, Schedule};
use crate::types::{ALL_TRACKS, EventId, TrackFilter};

/// Hours after the first day's midnight where the initial view starts.
const VIEW_START_HOUR: i64 = 15;
/// Hours after the second day's midnight where the initial view ends.
const VIEW_END_HOUR: i64 = 12;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error("no event with id {0} on the timeline")]
    UnknownEvent(EventId),
}

/// Group record for the rendering widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderGroup {
    pub id: String,
    pub content: String,
}

/// Item record for the rendering widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderItem {
    pub id: EventId,
    pub group: String,
    pub content: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub class_name: &'static str,
}

/// The visible range when the timeline first opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Normalized schedule plus live display state.
#[derive(Debug, Clone)]
pub struct Timeline {
    groups: Vec<LocationGroup>,
    tracks: Vec<String>,
    items: Vec<NormalizedEvent>,
    index: HashMap<EventId, usize>,
    earliest: Option<DateTime<Utc>>,
    version: u64,
}

impl From<Schedule> for Timeline {
    fn from(schedule: Schedule) -> Self {
        let index = schedule
            .items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id.clone(), pos))
            .collect();
        Self {
            groups: schedule.groups,
            tracks: schedule.tracks,
            items: schedule.items,
            index,
            earliest: schedule.earliest,
            version: 0,
        }
    }
}

impl Timeline {
    pub fn groups(&self) -> &[LocationGroup] {
        &self.groups
    }

    pub fn tracks(&self) -> &[String] {
        &self.tracks
    }

    pub fn items(&self) -> &[NormalizedEvent] {
        &self.items
    }

    pub const fn earliest(&self) -> Option<DateTime<Utc>> {
        self.earliest
    }

    /// Number of change batches applied since the model was built.
    pub const fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, id: &EventId) -> Option<&NormalizedEvent> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    /// Values for the track filter control: `"all"` then the catalog.
    pub fn filter_options(&self) -> Vec<String> {
        std::iter::once(ALL_TRACKS.to_string())
            .chain(self.tracks.iter().cloned())
            .collect()
    }

    /// Reclassifies every item and records the changes.
    ///
    /// Returns only the items whose class changed; calling it again with the
    /// same arguments returns nothing.
    pub fn refresh(&mut self, now: DateTime<Utc>, filter: &TrackFilter) -> Vec<ClassUpdate> {
        let updates = activation::recompute(now, filter, &self.items);
        if !updates.is_empty() {
            for update in &updates {
                if let Some(&pos) = self.index.get(&update.id) {
                    self.items[pos].display_class = update.class;
                }
            }
            self.version += 1;
        }
        updates
    }

    /// Applies externally computed class changes.
    ///
    /// Either every update applies or none do.
    pub fn apply(&mut self, updates: &[ClassUpdate]) -> Result<(), TimelineError> {
        let positions = updates
            .iter()
            .map(|update| {
                self.index
                    .get(&update.id)
                    .copied()
                    .ok_or_else(|| TimelineError::UnknownEvent(update.id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut changed = false;
        for (pos, update) in positions.into_iter().zip(updates) {
            let item = &mut self.items[pos];
            if item.display_class != update.class {
                item.display_class = update.class;
                changed = true;
            }
        }
        if changed {
            self.version += 1;
        }
        Ok(())
    }

    pub fn render_groups(&self) -> Vec<RenderGroup> {
        self.groups
            .iter()
            .map(|group| RenderGroup {
                id: group.name.clone(),
                content: group.name.clone(),
            })
            .collect()
    }

    pub fn render_items(&self) -> Vec<RenderItem> {
        self.items
            .iter()
            .map(|item| RenderItem {
                id: item.id.clone(),
                group: item.group.clone(),
                content: item.title.clone(),
                start: item.interval.start,
                end: item.interval.end,
                class_name: item.display_class.class_name(),
            })
            .collect()
    }

    /// Initial view: from mid-afternoon of the first day to midday of the
    /// next, in `tz`'s local time.
    pub fn view_window<Tz: TimeZone>(&self, tz: &Tz) -> Option<ViewWindow> {
        let first_day = self.earliest?.with_timezone(tz).date_naive();
        let next_day = first_day.checked_add_days(Days::new(1))?;

        let start = local_day_start(tz, first_day)? + TimeDelta::hours(VIEW_START_HOUR);
        let end = local_day_start(tz, next_day)? + TimeDelta::hours(VIEW_END_HOUR);
        Some(ViewWindow { start, end })
    }
}

/// Midnight of `day` in `tz`, as UTC. DST ambiguity picks the earlier time.
fn local_day_start<Tz: TimeZone>(tz: &Tz, day: chrono::NaiveDate) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&day.and_time(NaiveTime::MIN)) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}
