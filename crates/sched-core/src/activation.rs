//! Live display classification.
//!
//! Classification priority, highest first:
//!
//! 1. `now` strictly inside the item's interval: [`DisplayClass::Active`]
//! 2. the filter selects the item's track: [`DisplayClass::Highlighted`]
//! 3. otherwise [`DisplayClass::Normal`]
//!
//! The periodic tick and a filter change both go through
//! [`ActivationEngine::handle`], so there is one classification path.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::normalize::NormalizedEvent;
use crate::timeline::Timeline;
use crate::types::{DisplayClass, EventId, TrackFilter};

/// A single item whose class changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassUpdate {
    pub id: EventId,
    pub class: DisplayClass,
}

impl ClassUpdate {
    /// Class string for the rendering widget's incremental update.
    pub const fn class_name(&self) -> &'static str {
        self.class.class_name()
    }
}

/// Classifies one item.
pub fn classify(now: DateTime<Utc>, filter: &TrackFilter, item: &NormalizedEvent) -> DisplayClass {
    if item.interval.is_in_progress(now) {
        DisplayClass::Active
    } else if filter.highlights(item.track()) {
        DisplayClass::Highlighted
    } else {
        DisplayClass::Normal
    }
}

/// Classifies every item and returns those whose class differs from the one
/// currently recorded.
pub fn recompute(
    now: DateTime<Utc>,
    filter: &TrackFilter,
    items: &[NormalizedEvent],
) -> Vec<ClassUpdate> {
    items
        .iter()
        .filter_map(|item| {
            let class = classify(now, filter, item);
            (class != item.display_class()).then(|| ClassUpdate {
                id: item.id.clone(),
                class,
            })
        })
        .collect()
}

/// Why a recompute was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecomputeRequest {
    /// The periodic timer fired.
    Tick,
    /// The user picked a different track.
    FilterChanged(TrackFilter),
}

/// Owns the session's track filter and drives reclassification.
#[derive(Debug, Clone, Default)]
pub struct ActivationEngine {
    filter: TrackFilter,
}

impl ActivationEngine {
    pub const fn new(filter: TrackFilter) -> Self {
        Self { filter }
    }

    pub const fn filter(&self) -> &TrackFilter {
        &self.filter
    }

    /// Handles one request against the timeline, returning the changes made.
    pub fn handle(
        &mut self,
        request: RecomputeRequest,
        now: DateTime<Utc>,
        timeline: &mut Timeline,
    ) -> Vec<ClassUpdate> {
        match request {
            RecomputeRequest::Tick => {}
            RecomputeRequest::FilterChanged(filter) => {
                tracing::debug!(filter = %filter, "track filter changed");
                self.filter = filter;
            }
        }
        let updates = timeline.refresh(now, &self.filter);
        if !updates.is_empty() {
            tracing::debug!(
                changed = updates.len(),
                version = timeline.version(),
                "display classes updated"
            );
        }
        updates
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::event::RawEvent;
    use crate::normalize::normalize;
    use crate::resolve::DateTimeResolver;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 11, hour, minute, 0).unwrap()
    }

    fn workshops() -> TrackFilter {
        TrackFilter::Track("Workshops".to_string())
    }

    fn timeline() -> Timeline {
        let events: Vec<RawEvent> = serde_json::from_value(json!([
            {
                "id": "talk", "title": "Talk", "date": "November 11",
                "starts_at": "10.00AM", "ends_at": "11.00AM", "conferenceSlug": "lis25",
                "location": {"name": "Stage 1"}, "schedule_track": {"name": "Workshops"}
            },
            {
                "id": "lab", "title": "Lab", "date": "November 11",
                "starts_at": "1.00PM", "ends_at": "2.00PM", "conferenceSlug": "lis25",
                "location": {"name": "Stage 2"}, "schedule_track": {"name": "Workshops"}
            },
            {
                "id": "demo", "title": "Demo", "date": "November 11",
                "starts_at": "1.30PM", "ends_at": "3.00PM", "conferenceSlug": "lis25",
                "location": {"name": "Stage 3"}
            }
        ]))
        .unwrap();
        normalize(&events, &DateTimeResolver::new(Utc, 2031)).into()
    }

    fn classes(timeline: &Timeline) -> Vec<(String, DisplayClass)> {
        timeline
            .items()
            .iter()
            .map(|item| (item.id.to_string(), item.display_class()))
            .collect()
    }

    #[test]
    fn active_beats_matching_filter() {
        let timeline = timeline();
        let talk = &timeline.items()[0];
        assert_eq!(classify(at(10, 30), &workshops(), talk), DisplayClass::Active);
        assert_eq!(
            classify(at(10, 30), &TrackFilter::All, talk),
            DisplayClass::Active
        );
    }

    #[test]
    fn filter_highlights_when_not_in_progress() {
        let timeline = timeline();
        let talk = &timeline.items()[0];
        assert_eq!(
            classify(at(12, 0), &workshops(), talk),
            DisplayClass::Highlighted
        );
        assert_eq!(
            classify(at(12, 0), &TrackFilter::All, talk),
            DisplayClass::Normal
        );
    }

    #[test]
    fn boundaries_are_not_active() {
        let timeline = timeline();
        let talk = &timeline.items()[0];
        assert_eq!(
            classify(at(10, 0), &TrackFilter::All, talk),
            DisplayClass::Normal
        );
        assert_eq!(
            classify(at(11, 0), &TrackFilter::All, talk),
            DisplayClass::Normal
        );
    }

    #[test]
    fn untracked_event_never_highlighted() {
        let timeline = timeline();
        let demo = &timeline.items()[2];
        assert_eq!(classify(at(9, 0), &workshops(), demo), DisplayClass::Normal);
    }

    #[test]
    fn second_recompute_is_empty() {
        let mut timeline = timeline();
        let mut engine = ActivationEngine::new(workshops());

        let first = engine.handle(RecomputeRequest::Tick, at(13, 45), &mut timeline);
        assert_eq!(first.len(), 3);
        let second = engine.handle(RecomputeRequest::Tick, at(13, 45), &mut timeline);
        assert!(second.is_empty());
    }

    #[test]
    fn filter_change_reports_only_deltas() {
        let mut timeline = timeline();
        let mut engine = ActivationEngine::default();

        let updates = engine.handle(RecomputeRequest::Tick, at(13, 45), &mut timeline);
        assert_eq!(
            updates,
            vec![
                ClassUpdate {
                    id: EventId::new("lab").unwrap(),
                    class: DisplayClass::Active,
                },
                ClassUpdate {
                    id: EventId::new("demo").unwrap(),
                    class: DisplayClass::Active,
                },
            ]
        );

        // "lab" is in progress, so only "talk" changes.
        let updates = engine.handle(
            RecomputeRequest::FilterChanged(workshops()),
            at(13, 45),
            &mut timeline,
        );
        assert_eq!(
            updates,
            vec![ClassUpdate {
                id: EventId::new("talk").unwrap(),
                class: DisplayClass::Highlighted,
            }]
        );
        assert_eq!(engine.filter(), &workshops());
    }

    #[test]
    fn time_passing_moves_classes() {
        let mut timeline = timeline();
        let mut engine = ActivationEngine::new(workshops());

        engine.handle(RecomputeRequest::Tick, at(10, 30), &mut timeline);
        assert_eq!(
            classes(&timeline),
            vec![
                ("talk".to_string(), DisplayClass::Active),
                ("lab".to_string(), DisplayClass::Highlighted),
                ("demo".to_string(), DisplayClass::Normal),
            ]
        );

        let updates = engine.handle(RecomputeRequest::Tick, at(11, 30), &mut timeline);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].class_name(), "event-item event-highlighted");

        engine.handle(RecomputeRequest::FilterChanged(TrackFilter::All), at(11, 30), &mut timeline);
        assert!(
            timeline
                .items()
                .iter()
                .all(|item| item.display_class() == DisplayClass::Normal)
        );
    }
}
